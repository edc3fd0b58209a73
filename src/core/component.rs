//! Component trait: a state-machine object that can be exposed.

use super::state::State;

/// A state-machine object owning one [`State`] value.
///
/// `Default` is the construction used by generated factories; it must put the
/// component in its initial state and must not fail.
///
/// `state` is an in-process accessor for tests and diagnostics. It is never
/// part of the generated C surface.
pub trait Component: Default + 'static {
    /// The component's state enumeration.
    type State: State;

    /// Name used in logs and generated symbol tables.
    const NAME: &'static str;

    /// Current state.
    fn state(&self) -> Self::State;
}
