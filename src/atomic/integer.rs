//! Native-width atomic integers.
//!
//! Each type wraps the matching standard atomic, so narrow types such as
//! `AtomicI8` and `AtomicU16` wrap at their own bounds rather than at a wider
//! slot's. Arithmetic goes straight to the hardware `fetch_add`/`fetch_sub`.

use core::sync::atomic::{self, Ordering};

use crate::cell::AtomicCell;
use crate::numeric::AtomicNumber;

macro_rules! impl_atomic_integer {
    ($(#[$meta:meta])* $name:ident, $std:ident, $value:ty) => {
        $(#[$meta])*
        #[repr(transparent)]
        pub struct $name {
            inner: atomic::$std,
        }

        impl $name {
            /// Creates a new atomic integer.
            #[inline(always)]
            pub const fn new(value: $value) -> Self {
                Self {
                    inner: atomic::$std::new(value),
                }
            }

            /// Stores the larger of the current value and `value`, returning the previous value.
            #[inline]
            pub fn get_and_max(&self, value: $value) -> $value {
                self.inner.fetch_max(value, Ordering::AcqRel)
            }

            /// Stores the smaller of the current value and `value`, returning the previous value.
            #[inline]
            pub fn get_and_min(&self, value: $value) -> $value {
                self.inner.fetch_min(value, Ordering::AcqRel)
            }

            /// Returns the underlying standard atomic.
            #[inline]
            pub fn inner(&self) -> &atomic::$std {
                &self.inner
            }

            /// Consumes the cell, returning the contained value.
            #[inline]
            pub fn into_inner(self) -> $value {
                self.inner.into_inner()
            }
        }

        impl AtomicCell for $name {
            type Value = $value;

            #[inline(always)]
            fn get(&self) -> $value {
                self.inner.load(Ordering::Acquire)
            }

            #[inline(always)]
            fn set(&self, value: $value) {
                self.inner.store(value, Ordering::SeqCst);
            }

            #[inline(always)]
            fn lazy_set(&self, value: $value) {
                self.inner.store(value, Ordering::Release);
            }

            #[inline(always)]
            fn compare_and_set(&self, expected: $value, update: $value) -> bool {
                self.inner
                    .compare_exchange(expected, update, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            }

            #[inline(always)]
            fn get_and_set(&self, update: $value) -> $value {
                self.inner.swap(update, Ordering::AcqRel)
            }
        }

        impl AtomicNumber for $name {
            type Delta = $value;

            #[inline(always)]
            fn unit() -> $value {
                1
            }

            #[inline(always)]
            fn get_and_add(&self, delta: $value) -> $value {
                self.inner.fetch_add(delta, Ordering::AcqRel)
            }

            #[inline(always)]
            fn add_and_get(&self, delta: $value) -> $value {
                self.get_and_add(delta).wrapping_add(delta)
            }

            #[inline(always)]
            fn get_and_subtract(&self, delta: $value) -> $value {
                self.inner.fetch_sub(delta, Ordering::AcqRel)
            }

            #[inline(always)]
            fn subtract_and_get(&self, delta: $value) -> $value {
                self.get_and_subtract(delta).wrapping_sub(delta)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0)
            }
        }

        impl From<$value> for $name {
            fn from(value: $value) -> Self {
                Self::new(value)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }
    };
}

impl_atomic_integer!(
    /// An atomic `i8`.
    AtomicI8, AtomicI8, i8
);
impl_atomic_integer!(
    /// An atomic `i16`.
    AtomicI16, AtomicI16, i16
);
impl_atomic_integer!(
    /// An atomic `i32`.
    AtomicI32, AtomicI32, i32
);
impl_atomic_integer!(
    /// An atomic `i64`.
    AtomicI64, AtomicI64, i64
);
impl_atomic_integer!(
    /// An atomic `isize`.
    AtomicIsize, AtomicIsize, isize
);
impl_atomic_integer!(
    /// An atomic `u8`.
    AtomicU8, AtomicU8, u8
);
impl_atomic_integer!(
    /// An atomic `u16`.
    AtomicU16, AtomicU16, u16
);
impl_atomic_integer!(
    /// An atomic `u32`.
    AtomicU32, AtomicU32, u32
);
impl_atomic_integer!(
    /// An atomic `u64`.
    ///
    /// The usual choice for shared counters.
    AtomicU64, AtomicU64, u64
);
impl_atomic_integer!(
    /// An atomic `usize`.
    AtomicUsize, AtomicUsize, usize
);
