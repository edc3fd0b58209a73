//! Exposure of components through a flat C function table.
//!
//! [`expose_object!`](crate::expose_object) turns a component type and a list
//! of its transition methods into exported functions:
//!
//! | Symbol | C signature |
//! |---|---|
//! | `create_<Type>` | `void *create_<Type>(void)` |
//! | `<method>_<Type>` | `void <method>_<Type>(void *handle)` |
//! | `free_<Type>` | `void free_<Type>(void *handle)` |
//!
//! The same declaration implements [`Exposed`] for the type, so Rust code can
//! reach the generated functions through [`Exposed::TABLE`] without knowing
//! symbol names.
//!
//! # Example
//!
//! ```rust
//! use ffi_expose::{expose_object, Exposed, Instance};
//!
//! #[derive(Default)]
//! pub struct Lamp {
//!     lit: bool,
//! }
//!
//! impl Lamp {
//!     pub fn switch_on(&mut self) {
//!         self.lit = true;
//!     }
//!
//!     pub fn switch_off(&mut self) {
//!         self.lit = false;
//!     }
//! }
//!
//! expose_object!(Lamp: switch_on, switch_off);
//!
//! assert_eq!(Lamp::TABLE.create.symbol, "create_Lamp");
//! assert_eq!(Lamp::TABLE.transitions[0].symbol, "switch_on_Lamp");
//!
//! let mut lamp = Instance::<Lamp>::new();
//! lamp.invoke("switch_on").unwrap();
//! assert_eq!(lamp.peek(|lamp| lamp.lit), Some(true));
//! ```
//!
//! # Signature checks
//!
//! Every declared method must have the signature `fn(&mut self)`. Anything
//! else is rejected when the declaration is compiled.
//!
//! A method taking a parameter:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! #[derive(Default)]
//! pub struct Counter {
//!     value: u32,
//! }
//!
//! impl Counter {
//!     pub fn bump(&mut self, by: u32) {
//!         self.value += by;
//!     }
//! }
//!
//! // ERROR: `Counter::bump` is not `fn(&mut Counter)`
//! expose_object!(Counter: bump);
//! ```
//!
//! A method returning a value:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! #[derive(Default)]
//! pub struct Counter {
//!     value: u32,
//! }
//!
//! impl Counter {
//!     pub fn bump(&mut self) -> u32 {
//!         self.value += 1;
//!         self.value
//!     }
//! }
//!
//! // ERROR: `Counter::bump` returns `u32`
//! expose_object!(Counter: bump);
//! ```
//!
//! A method that cannot mutate its component:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! #[derive(Default)]
//! pub struct Counter {
//!     value: u32,
//! }
//!
//! impl Counter {
//!     pub fn report(&self) {
//!         let _ = self.value;
//!     }
//! }
//!
//! // ERROR: `Counter::report` takes `&self`
//! expose_object!(Counter: report);
//! ```
//!
//! A method that does not exist:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! #[derive(Default)]
//! pub struct Counter;
//!
//! // ERROR: no function or associated item named `reset` found
//! expose_object!(Counter: reset);
//! ```
//!
//! The same method listed twice:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! #[derive(Default)]
//! pub struct Counter;
//!
//! impl Counter {
//!     pub fn reset(&mut self) {}
//! }
//!
//! // ERROR: `reset` is defined multiple times
//! expose_object!(Counter: reset, reset);
//! ```
//!
//! A type without default construction:
//!
//! ```compile_fail
//! use ffi_expose::expose_object;
//!
//! pub struct Counter {
//!     value: u32,
//! }
//!
//! impl Counter {
//!     pub fn reset(&mut self) {
//!         self.value = 0;
//!     }
//! }
//!
//! // ERROR: `Counter: Default` is not satisfied
//! expose_object!(Counter: reset);
//! ```

mod error;
pub mod macros;

pub use error::ExposeError;

use crate::handle::Handle;
use serde::{Deserialize, Serialize};

/// Generated factory: allocates a default instance and returns its handle.
pub type Factory = extern "C" fn() -> Handle;

/// Generated destructor or trampoline: acts on the instance behind a handle.
pub type Trampoline = unsafe extern "C" fn(Handle);

/// A transition method of `T`: takes `&mut T`, nothing else, returns `()`.
///
/// Generated trampolines call methods only through this trait, which is what
/// rejects ill-formed declarations at compile time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be exposed as a transition of `{T}`",
    label = "exposed methods must be `fn(&mut self)`",
    note = "transitions take no arguments and return nothing"
)]
pub trait Transition<T> {
    /// Run the transition on `target`.
    fn invoke(self, target: &mut T);
}

impl<T, F> Transition<T> for F
where
    F: FnOnce(&mut T),
{
    fn invoke(self, target: &mut T) {
        self(target)
    }
}

/// How generated functions interpret the handle token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleMode {
    /// The token is the instance address. Misuse is undefined behaviour.
    Unchecked,
    /// The token is a registry id. Misuse is logged and ignored.
    Checked,
}

/// One generated function and the symbol it is exported under.
#[derive(Debug, Clone, Copy)]
pub struct ExposedFn<F> {
    /// Method name, or `create` / `free` for the lifecycle functions.
    pub name: &'static str,
    /// Exported symbol name.
    pub symbol: &'static str,
    /// The function itself.
    pub call: F,
}

/// Everything one exposure declaration generated for a component type.
#[derive(Debug, Clone, Copy)]
pub struct ExposureTable {
    pub component: &'static str,
    pub mode: HandleMode,
    pub create: ExposedFn<Factory>,
    pub free: ExposedFn<Trampoline>,
    /// Trampolines in declaration order.
    pub transitions: &'static [ExposedFn<Trampoline>],
}

impl ExposureTable {
    /// Find the trampoline generated for `method`.
    pub fn transition(&self, method: &str) -> Option<&'static ExposedFn<Trampoline>> {
        self.transitions.iter().find(|t| t.name == method)
    }

    /// All exported symbol names: factory, destructor, then trampolines.
    pub fn symbols(&self) -> Vec<&'static str> {
        [self.create.symbol, self.free.symbol]
            .into_iter()
            .chain(self.transitions.iter().map(|t| t.symbol))
            .collect()
    }

    /// C declarations for the exported functions.
    pub fn c_header(&self) -> String {
        let mut header = format!(
            "/* {} ({} handles) */\nvoid *{}(void);\nvoid {}(void *handle);\n",
            self.component,
            self.mode_name(),
            self.create.symbol,
            self.free.symbol,
        );
        for transition in self.transitions {
            header.push_str(&format!("void {}(void *handle);\n", transition.symbol));
        }
        header
    }

    /// Serializable description of the exported surface.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            component: self.component.to_owned(),
            mode: self.mode,
            create: self.create.symbol.to_owned(),
            free: self.free.symbol.to_owned(),
            transitions: self
                .transitions
                .iter()
                .map(|t| ManifestEntry {
                    method: t.name.to_owned(),
                    symbol: t.symbol.to_owned(),
                })
                .collect(),
        }
    }

    /// The manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExposeError> {
        Ok(serde_json::to_string_pretty(&self.manifest())?)
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            HandleMode::Unchecked => "unchecked",
            HandleMode::Checked => "checked",
        }
    }
}

/// Symbol names an orchestration runtime needs to bind one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub component: String,
    pub mode: HandleMode,
    pub create: String,
    pub free: String,
    pub transitions: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub method: String,
    pub symbol: String,
}

/// A type made callable across the C boundary by
/// [`expose_object!`](crate::expose_object).
///
/// Implemented by the macro only.
pub trait Exposed: Sized + 'static {
    /// The generated function table.
    const TABLE: ExposureTable;

    /// Read the instance behind `handle`.
    ///
    /// Returns `None` when a checked handle is not live.
    ///
    /// # Safety
    ///
    /// For [`HandleMode::Unchecked`] tables `handle` must be live and come
    /// from this table's factory.
    unsafe fn peek<R>(handle: Handle, f: impl FnOnce(&Self) -> R) -> Option<R>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expose_object;
    use crate::handle;

    #[derive(Default)]
    struct Valve {
        open: bool,
        cycles: u32,
    }

    impl Valve {
        fn open(&mut self) {
            self.open = true;
            self.cycles += 1;
        }

        fn close(&mut self) {
            self.open = false;
        }
    }

    expose_object!(Valve: open, close);

    #[derive(Default)]
    struct Damper {
        open: bool,
    }

    impl Damper {
        fn open(&mut self) {
            self.open = true;
        }
    }

    expose_object!(checked Damper: open);

    #[test]
    fn table_names_follow_declaration() {
        let table = Valve::TABLE;
        assert_eq!(table.component, "Valve");
        assert_eq!(table.mode, HandleMode::Unchecked);
        assert_eq!(table.create.symbol, "create_Valve");
        assert_eq!(table.free.symbol, "free_Valve");

        let names: Vec<_> = table.transitions.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["open", "close"]);
        assert_eq!(table.transitions[1].symbol, "close_Valve");
    }

    #[test]
    fn same_method_on_two_types_gets_two_symbols() {
        let valve = Valve::TABLE.transition("open").unwrap();
        let damper = Damper::TABLE.transition("open").unwrap();
        assert_eq!(valve.symbol, "open_Valve");
        assert_eq!(damper.symbol, "open_Damper");
    }

    #[test]
    fn transition_lookup_misses_undeclared_methods() {
        assert!(Valve::TABLE.transition("drain").is_none());
        assert!(Valve::TABLE.transition("create").is_none());
    }

    #[test]
    fn symbols_lists_lifecycle_first() {
        assert_eq!(
            Valve::TABLE.symbols(),
            vec!["create_Valve", "free_Valve", "open_Valve", "close_Valve"]
        );
    }

    #[test]
    fn generated_functions_drive_instance() {
        let table = Valve::TABLE;
        let handle = (table.create.call)();

        unsafe {
            (table.transition("open").unwrap().call)(handle);
            (table.transition("close").unwrap().call)(handle);
            (table.transition("open").unwrap().call)(handle);

            let (open, cycles) = handle::peek::<Valve, _>(handle, |v| (v.open, v.cycles));
            assert!(open);
            assert_eq!(cycles, 2);

            (table.free.call)(handle);
        }
    }

    #[test]
    fn c_header_declares_every_symbol() {
        let header = Valve::TABLE.c_header();
        assert!(header.starts_with("/* Valve (unchecked handles) */"));
        assert!(header.contains("void *create_Valve(void);"));
        assert!(header.contains("void free_Valve(void *handle);"));
        assert!(header.contains("void open_Valve(void *handle);"));
        assert!(header.contains("void close_Valve(void *handle);"));
        assert_eq!(header.lines().count(), 5);
    }

    #[test]
    fn checked_header_names_mode() {
        let header = Damper::TABLE.c_header();
        assert!(header.starts_with("/* Damper (checked handles) */"));
    }

    #[test]
    fn manifest_serializes_to_json() {
        let json = Valve::TABLE.to_json().unwrap();
        let manifest: Manifest = serde_json::from_str(&json).unwrap();

        assert_eq!(manifest, Valve::TABLE.manifest());
        assert_eq!(manifest.mode, HandleMode::Unchecked);
        assert_eq!(manifest.transitions.len(), 2);
        assert_eq!(manifest.transitions[0].symbol, "open_Valve");
        assert!(json.contains("\"mode\": \"unchecked\""));
    }

    #[test]
    fn transition_trait_accepts_closures() {
        let mut valve = Valve::default();
        Transition::invoke(|v: &mut Valve| v.cycles = 7, &mut valve);
        Transition::invoke(Valve::open, &mut valve);
        assert_eq!(valve.cycles, 8);
    }
}
