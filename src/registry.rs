//! Handle table backing the `checked` exposure form.
//!
//! Instances stay owned by the registry and the foreign caller only sees an
//! id. Ids come from one process-wide counter and are never reused, so a
//! released handle, a forged one or one issued for another component type is
//! recognised instead of dereferenced.
//!
//! The registry mutex is held while a transition runs. Calls on one checked
//! component type are therefore serialized, and a transition must not call
//! back into the surface of its own type.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::expose::ExposeError;
use crate::handle::Handle;

/// Next id to issue. Zero is never issued so a null handle is always invalid.
static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Owned instances of one component type keyed by issued id.
#[derive(Debug)]
pub struct HandleRegistry<T> {
    component: &'static str,
    slots: Mutex<BTreeMap<usize, T>>,
}

impl<T> HandleRegistry<T> {
    /// Create an empty registry. Usable in `static` items.
    pub const fn new(component: &'static str) -> Self {
        Self {
            component,
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// Take ownership of `instance` and return its handle.
    pub fn issue(&self, instance: T) -> Handle {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        self.slots().insert(id, instance);
        tracing::trace!(component = self.component, handle = id, "Issued checked handle");
        id as Handle
    }

    /// Run `f` on the instance behind `handle`.
    pub fn with<R>(&self, handle: Handle, f: impl FnOnce(&mut T) -> R) -> Result<R, ExposeError> {
        let mut slots = self.slots();
        let instance = slots
            .get_mut(&(handle as usize))
            .ok_or_else(|| self.invalid(handle))?;
        Ok(f(instance))
    }

    /// Read the instance behind `handle`.
    pub fn peek<R>(&self, handle: Handle, f: impl FnOnce(&T) -> R) -> Result<R, ExposeError> {
        let slots = self.slots();
        let instance = slots
            .get(&(handle as usize))
            .ok_or_else(|| self.invalid(handle))?;
        Ok(f(instance))
    }

    /// Remove the instance behind `handle` and hand it back.
    pub fn release(&self, handle: Handle) -> Result<T, ExposeError> {
        let instance = self
            .slots()
            .remove(&(handle as usize))
            .ok_or_else(|| self.invalid(handle))?;
        tracing::trace!(
            component = self.component,
            handle = handle as usize,
            "Released checked handle"
        );
        Ok(instance)
    }

    /// [`with`](Self::with) for generated trampolines: misuse is logged.
    pub fn with_or_log(&self, handle: Handle, f: impl FnOnce(&mut T)) {
        if let Err(err) = self.with(handle, f) {
            tracing::warn!(error = %err, "Ignored transition on invalid handle");
        }
    }

    /// [`release`](Self::release) for generated destructors: misuse is logged.
    pub fn release_or_log(&self, handle: Handle) {
        match self.release(handle) {
            Ok(instance) => drop(instance),
            Err(err) => tracing::warn!(error = %err, "Ignored release of invalid handle"),
        }
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    fn slots(&self) -> MutexGuard<'_, BTreeMap<usize, T>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn invalid(&self, handle: Handle) -> ExposeError {
        ExposeError::InvalidHandle {
            component: self.component,
            handle: handle as usize,
        }
    }
}
