//! In-process owner of an exposed handle.
//!
//! [`Instance`] drives a component the way a foreign runtime would, through
//! the generated table only, while tying the handle's lifetime to a Rust
//! value: the factory runs in `new`, the destructor runs exactly once in
//! `drop`, and nothing can touch the handle afterwards.

use std::fmt;
use std::marker::PhantomData;

use crate::expose::{ExposeError, Exposed};
use crate::handle::Handle;

/// RAII wrapper around a handle from `T`'s generated factory.
pub struct Instance<T: Exposed> {
    handle: Handle,
    _component: PhantomData<T>,
}

impl<T: Exposed> Instance<T> {
    /// Create a component through its generated factory.
    pub fn new() -> Self {
        Self {
            handle: (T::TABLE.create.call)(),
            _component: PhantomData,
        }
    }

    /// The raw handle, for passing to foreign code. Stays owned by `self`.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Call the trampoline generated for `method`.
    pub fn invoke(&mut self, method: &str) -> Result<(), ExposeError> {
        let transition =
            T::TABLE
                .transition(method)
                .ok_or_else(|| ExposeError::UnknownTransition {
                    component: T::TABLE.component,
                    method: method.to_owned(),
                })?;
        // SAFETY: the handle came from this table's factory and is released only on drop
        unsafe { (transition.call)(self.handle) };
        Ok(())
    }

    /// Read the component behind the handle.
    pub fn peek<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        // SAFETY: the handle came from this table's factory and is still live
        unsafe { T::peek(self.handle, f) }
    }
}

impl<T: Exposed> Default for Instance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Exposed> Drop for Instance<T> {
    fn drop(&mut self) {
        // SAFETY: released exactly once, here
        unsafe { (T::TABLE.free.call)(self.handle) };
    }
}

impl<T: Exposed> fmt::Debug for Instance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("component", &T::TABLE.component)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expose_object;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DROPS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Shutter {
        closed: bool,
    }

    impl Shutter {
        fn close(&mut self) {
            self.closed = true;
        }

        fn open(&mut self) {
            self.closed = false;
        }
    }

    expose_object!(Shutter: close, open);

    #[derive(Default)]
    struct Latch;

    impl Latch {
        fn engage(&mut self) {}
    }

    impl Drop for Latch {
        fn drop(&mut self) {
            DROPS.fetch_add(1, Ordering::SeqCst);
        }
    }

    expose_object!(Latch: engage);

    #[test]
    fn new_instance_starts_from_default() {
        let shutter = Instance::<Shutter>::new();
        assert_eq!(shutter.peek(|s| s.closed), Some(false));
    }

    #[test]
    fn invoke_dispatches_by_name() {
        let mut shutter = Instance::<Shutter>::new();
        shutter.invoke("close").unwrap();
        assert_eq!(shutter.peek(|s| s.closed), Some(true));
        shutter.invoke("open").unwrap();
        assert_eq!(shutter.peek(|s| s.closed), Some(false));
    }

    #[test]
    fn unknown_method_is_an_error() {
        let mut shutter = Instance::<Shutter>::new();
        let err = shutter.invoke("jam").unwrap_err();
        assert_eq!(
            err.to_string(),
            "`jam` is not an exposed transition of `Shutter`"
        );
    }

    #[test]
    fn drop_frees_exactly_once() {
        {
            let mut latch = Instance::<Latch>::new();
            latch.invoke("engage").unwrap();
            assert_eq!(DROPS.load(Ordering::SeqCst), 0);
        }
        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
    }
}
