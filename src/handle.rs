//! Raw opaque handles.
//!
//! A handle is a boxed instance whose ownership has been handed to a foreign
//! caller as an untyped pointer. The caller can only refer to it by identity
//! and must release it exactly once.

use std::any::type_name;
use std::ffi::c_void;

/// Opaque, pointer-sized token crossing the C boundary.
pub type Handle = *mut c_void;

/// Move `instance` to the heap and give up ownership as a handle.
pub fn into_handle<T>(instance: T) -> Handle {
    let handle = Box::into_raw(Box::new(instance)).cast::<c_void>();
    tracing::trace!(component = type_name::<T>(), ?handle, "Issued handle");
    handle
}

/// Run `f` on the instance behind `handle`.
///
/// # Safety
///
/// `handle` must come from [`into_handle::<T>`] and must not have been
/// released. No other reference to the instance may be live during the call.
pub unsafe fn with_instance<T, R>(handle: Handle, f: impl FnOnce(&mut T) -> R) -> R {
    debug_assert!(!handle.is_null(), "null {} handle", type_name::<T>());
    // SAFETY: upheld by the caller
    let instance = unsafe { &mut *handle.cast::<T>() };
    f(instance)
}

/// Read-only access to the instance behind `handle`.
///
/// # Safety
///
/// Same contract as [`with_instance`].
pub unsafe fn peek<T, R>(handle: Handle, f: impl FnOnce(&T) -> R) -> R {
    debug_assert!(!handle.is_null(), "null {} handle", type_name::<T>());
    // SAFETY: upheld by the caller
    let instance = unsafe { &*handle.cast::<T>() };
    f(instance)
}

/// Reclaim and drop the instance behind `handle`.
///
/// # Safety
///
/// `handle` must come from [`into_handle::<T>`] and must not have been
/// released before. The handle is dangling once this returns.
pub unsafe fn release<T>(handle: Handle) {
    debug_assert!(!handle.is_null(), "null {} handle", type_name::<T>());
    // SAFETY: upheld by the caller; ownership returns to this box
    drop(unsafe { Box::from_raw(handle.cast::<T>()) });
    tracing::trace!(component = type_name::<T>(), ?handle, "Released handle");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn handle_round_trip_mutates_in_place() {
        let handle = into_handle(41u32);

        unsafe {
            with_instance::<u32, _>(handle, |value| *value += 1);
            assert_eq!(peek::<u32, _>(handle, |value| *value), 42);
            release::<u32>(handle);
        }
    }

    #[test]
    fn release_drops_instance() {
        let tracker = Rc::new(());
        let handle = into_handle(Rc::clone(&tracker));
        assert_eq!(Rc::strong_count(&tracker), 2);

        unsafe { release::<Rc<()>>(handle) };

        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn distinct_instances_get_distinct_handles() {
        let first = into_handle(0u8);
        let second = into_handle(0u8);
        assert_ne!(first, second);

        unsafe {
            release::<u8>(first);
            release::<u8>(second);
        }
    }
}
