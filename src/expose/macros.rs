//! Macros for declaring components and exposing them.

/// Declare a component state enumeration with its initial variant.
///
/// Implements [`State`](crate::core::State) and makes the initial variant the
/// `Default`.
///
/// # Example
///
/// ```
/// use ffi_expose::core::State;
/// use ffi_expose::state_enum;
///
/// state_enum! {
///     pub enum PumpState {
///         Idle,
///         Priming,
///         Running,
///     }
///     initial: Idle
/// }
///
/// assert_eq!(PumpState::default(), PumpState::Idle);
/// assert_eq!(PumpState::Priming.name(), "Priming");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }

        initial: $initial:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::$initial
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

/// Export a component type and its transitions through the C ABI.
///
/// ```text
/// expose_object!(Type: method_1, method_2, ..., method_n);
/// expose_object!(checked Type: method_1, method_2, ..., method_n);
/// ```
///
/// Generates `create_Type`, `free_Type` and one `<method>_Type` per listed
/// method, and implements [`Exposed`](crate::expose::Exposed) for `Type`.
/// `Type` must be a plain identifier in scope, implement `Default`, and every
/// method must be `fn(&mut self)`.
///
/// The unchecked form hands out the instance address; using a handle after
/// `free_Type` or passing it to another type's functions is undefined
/// behaviour. The `checked` form keeps instances in a per-type
/// [`HandleRegistry`](crate::registry::HandleRegistry) and hands out ids
/// instead, so such misuse is logged and ignored. `Type` must be `Send` for
/// the checked form.
///
/// Each type can be exposed once. See [`crate::expose`] for examples.
#[macro_export]
macro_rules! expose_object {
    (@table $ty:ident, $mode:ident, $($method:ident),+) => {
        $crate::expose::ExposureTable {
            component: stringify!($ty),
            mode: $crate::expose::HandleMode::$mode,
            create: $crate::expose::ExposedFn {
                name: "create",
                symbol: concat!("create_", stringify!($ty)),
                call: __expose_create,
            },
            free: $crate::expose::ExposedFn {
                name: "free",
                symbol: concat!("free_", stringify!($ty)),
                call: __expose_free,
            },
            transitions: &[$(
                $crate::expose::ExposedFn {
                    name: stringify!($method),
                    symbol: concat!(stringify!($method), "_", stringify!($ty)),
                    call: $method,
                }
            ),+],
        }
    };

    (checked $ty:ident : $($method:ident),+ $(,)?) => {
        const _: () = {
            static REGISTRY: $crate::registry::HandleRegistry<$ty> =
                $crate::registry::HandleRegistry::new(stringify!($ty));

            #[export_name = concat!("create_", stringify!($ty))]
            extern "C" fn __expose_create() -> $crate::handle::Handle {
                REGISTRY.issue(<$ty as ::core::default::Default>::default())
            }

            #[export_name = concat!("free_", stringify!($ty))]
            extern "C" fn __expose_free(handle: $crate::handle::Handle) {
                REGISTRY.release_or_log(handle);
            }

            $(
                #[export_name = concat!(stringify!($method), "_", stringify!($ty))]
                extern "C" fn $method(handle: $crate::handle::Handle) {
                    REGISTRY.with_or_log(handle, |target| {
                        <_ as $crate::expose::Transition<$ty>>::invoke(<$ty>::$method, target)
                    });
                }
            )+

            impl $crate::expose::Exposed for $ty {
                const TABLE: $crate::expose::ExposureTable =
                    $crate::expose_object!(@table $ty, Checked, $($method),+);

                unsafe fn peek<R>(
                    handle: $crate::handle::Handle,
                    f: impl FnOnce(&Self) -> R,
                ) -> ::core::option::Option<R> {
                    REGISTRY.peek(handle, f).ok()
                }
            }
        };
    };

    ($ty:ident : $($method:ident),+ $(,)?) => {
        const _: () = {
            #[export_name = concat!("create_", stringify!($ty))]
            extern "C" fn __expose_create() -> $crate::handle::Handle {
                $crate::handle::into_handle(<$ty as ::core::default::Default>::default())
            }

            #[export_name = concat!("free_", stringify!($ty))]
            unsafe extern "C" fn __expose_free(handle: $crate::handle::Handle) {
                // SAFETY: the caller releases a live handle exactly once
                unsafe { $crate::handle::release::<$ty>(handle) }
            }

            $(
                #[export_name = concat!(stringify!($method), "_", stringify!($ty))]
                unsafe extern "C" fn $method(handle: $crate::handle::Handle) {
                    // SAFETY: the caller passes a live handle and serializes access to it
                    unsafe {
                        $crate::handle::with_instance(handle, |target: &mut $ty| {
                            <_ as $crate::expose::Transition<$ty>>::invoke(<$ty>::$method, target)
                        })
                    }
                }
            )+

            impl $crate::expose::Exposed for $ty {
                const TABLE: $crate::expose::ExposureTable =
                    $crate::expose_object!(@table $ty, Unchecked, $($method),+);

                unsafe fn peek<R>(
                    handle: $crate::handle::Handle,
                    f: impl FnOnce(&Self) -> R,
                ) -> ::core::option::Option<R> {
                    // SAFETY: upheld by the caller
                    ::core::option::Option::Some(unsafe { $crate::handle::peek::<Self, R>(handle, f) })
                }
            }
        };
    };
}
