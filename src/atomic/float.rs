//! Atomic floating-point numbers.
//!
//! The value lives in an integer slot of the same width as its IEEE-754 bit
//! pattern (`f32::to_bits` / `f64::to_bits`), which round-trips exactly.
//! Compare-and-set compares those bits: `-0.0` does not match `0.0`, and a NaN
//! matches a NaN with the same payload.

use core::sync::atomic::{self, Ordering};

use crate::cell::AtomicCell;
use crate::numeric::AtomicNumber;

macro_rules! impl_atomic_float {
    ($(#[$meta:meta])* $name:ident, $float:ty, $bits:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        pub struct $name {
            bits: atomic::$bits,
        }

        impl $name {
            /// Creates a new atomic float.
            #[inline]
            pub fn new(value: $float) -> Self {
                Self {
                    bits: atomic::$bits::new(value.to_bits()),
                }
            }

            /// Adds `delta` in a CAS loop over the raw bits, returning `(previous, new)`.
            #[inline]
            fn update(&self, delta: $float) -> ($float, $float) {
                // The new value is reported from the bits actually installed.
                let mut installed = 0;
                let step = |bits| {
                    installed = (<$float>::from_bits(bits) + delta).to_bits();
                    Some(installed)
                };
                let previous = match self.bits.fetch_update(Ordering::AcqRel, Ordering::Acquire, step) {
                    Ok(bits) | Err(bits) => bits,
                };
                (<$float>::from_bits(previous), <$float>::from_bits(installed))
            }

            /// Consumes the cell, returning the contained value.
            #[inline]
            pub fn into_inner(self) -> $float {
                <$float>::from_bits(self.bits.into_inner())
            }
        }

        impl AtomicCell for $name {
            type Value = $float;

            #[inline(always)]
            fn get(&self) -> $float {
                <$float>::from_bits(self.bits.load(Ordering::Acquire))
            }

            #[inline(always)]
            fn set(&self, value: $float) {
                self.bits.store(value.to_bits(), Ordering::SeqCst);
            }

            #[inline(always)]
            fn lazy_set(&self, value: $float) {
                self.bits.store(value.to_bits(), Ordering::Release);
            }

            #[inline(always)]
            fn compare_and_set(&self, expected: $float, update: $float) -> bool {
                self.bits
                    .compare_exchange(
                        expected.to_bits(),
                        update.to_bits(),
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    )
                    .is_ok()
            }

            #[inline(always)]
            fn get_and_set(&self, update: $float) -> $float {
                <$float>::from_bits(self.bits.swap(update.to_bits(), Ordering::AcqRel))
            }
        }

        impl AtomicNumber for $name {
            type Delta = $float;

            #[inline(always)]
            fn unit() -> $float {
                1.0
            }

            #[inline]
            fn get_and_add(&self, delta: $float) -> $float {
                self.update(delta).0
            }

            #[inline]
            fn add_and_get(&self, delta: $float) -> $float {
                self.update(delta).1
            }

            #[inline]
            fn get_and_subtract(&self, delta: $float) -> $float {
                self.update(-delta).0
            }

            #[inline]
            fn subtract_and_get(&self, delta: $float) -> $float {
                self.update(-delta).1
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0.0)
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
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

impl_atomic_float!(
    /// An atomic `f32` stored in an `AtomicU32`.
    AtomicF32, f32, AtomicU32
);
impl_atomic_float!(
    /// An atomic `f64` stored in an `AtomicU64`.
    AtomicF64, f64, AtomicU64
);

#[cfg(test)]
#[allow(clippy::approx_constant, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn set_get_is_bit_identical() {
        let x = AtomicF64::new(0.0);
        x.set(3.14);
        assert_eq!(x.get().to_bits(), 3.14f64.to_bits());

        let y = AtomicF32::new(f32::MIN_POSITIVE);
        assert_eq!(y.get().to_bits(), f32::MIN_POSITIVE.to_bits());
    }

    #[test]
    fn cas_matches_by_value() {
        let x = AtomicF64::new(3.14);
        let expected = "3.14".parse::<f64>().unwrap();
        assert!(x.compare_and_set(expected, 2.0));
        assert_eq!(x.get(), 2.0);
        assert!(!x.compare_and_set(3.14, 1.0));
        assert_eq!(x.get(), 2.0);
    }

    #[test]
    fn cas_compares_bit_patterns() {
        let zero = AtomicF64::new(0.0);
        assert!(!zero.compare_and_set(-0.0, 1.0));
        assert_eq!(zero.get(), 0.0);

        let nan = AtomicF32::new(f32::NAN);
        assert!(nan.compare_and_set(f32::NAN, 1.5));
        assert_eq!(nan.get(), 1.5);
    }

    #[test]
    fn arithmetic() {
        let x = AtomicF64::new(1.5);
        assert_eq!(x.get_and_add(1.0), 1.5);
        assert_eq!(x.add_and_get(0.5), 3.0);
        assert_eq!(x.subtract_and_get(2.0), 1.0);
        assert_eq!(x.get_and_subtract(0.25), 1.0);
        assert_eq!(x.increment_and_get(), 1.75);
        assert_eq!(x.get_and_decrement(), 1.75);
        assert_eq!(x.into_inner(), 0.75);
    }

    #[test]
    fn new_value_matches_the_stored_bits() {
        let x = AtomicF64::new(f64::NAN);
        assert_eq!(x.add_and_get(1.0).to_bits(), x.get().to_bits());
        assert_eq!(x.subtract_and_get(2.5).to_bits(), x.get().to_bits());

        let y = AtomicF32::new(f32::INFINITY);
        assert_eq!(y.decrement_and_get().to_bits(), y.get().to_bits());
        assert_eq!(y.get(), f32::INFINITY);
    }
}
