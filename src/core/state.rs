//! State enumeration trait for exposed components.
//!
//! Every component owns exactly one value of a type implementing [`State`].
//! The enumeration is fixed per component type and one variant is designated
//! as the initial state through `Default`.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for component state enumerations.
///
/// # Required Traits
///
/// - `Copy`: states are plain discriminants, copied out for inspection
/// - `PartialEq`: states are compared in tests and diagnostics
/// - `Debug`: states are debuggable for diagnostics
/// - `Default`: the default value is the designated initial state
/// - `Serialize` + `Deserialize`: states can be reported to tooling
///
/// # Example
///
/// ```rust
/// use ffi_expose::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
/// enum LampState {
///     #[default]
///     Off,
///     On,
/// }
///
/// impl State for LampState {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///         }
///     }
/// }
///
/// assert_eq!(LampState::default().name(), "Off");
/// assert!(LampState::Off.is_initial());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Default + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is the designated initial state.
    fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}
