//! Core component types.
//!
//! This module contains the component side of the crate:
//! - State enumerations via the `State` trait
//! - Exposable state-machine objects via the `Component` trait
//!
//! Nothing in this module touches the C ABI.

mod component;
mod state;

pub use component::Component;
pub use state::State;
