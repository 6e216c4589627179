//! Arithmetic on atomic cells.
//!
//! Only cells whose value type supports arithmetic implement [`AtomicNumber`];
//! calling `increment_and_get` on an `AtomicBool` or an `AtomicRef<String>`
//! does not compile. Primitive cells take the native path (hardware
//! `fetch_add`, or a CAS loop over the unboxed bits). `AtomicRef<T>` takes the
//! capability path and asks `T`'s [`NumericCapability`] for the arithmetic.

use crate::cell::AtomicCell;

/// Arithmetic for an arbitrary value type.
///
/// Blanket-implemented for every `num_traits::Num + Clone` type (big integers,
/// ratios, `Wrapping<_>`, ...). Custom numeric-like types can implement it by
/// hand to become usable with `AtomicRef`'s numeric operations.
pub trait NumericCapability: Clone + PartialEq {
    /// The unit used by increment and decrement.
    fn one() -> Self;

    /// Returns `self + rhs`.
    fn plus(&self, rhs: &Self) -> Self;

    /// Returns `self - rhs`.
    fn minus(&self, rhs: &Self) -> Self;

    /// Returns `self + 1`.
    #[inline]
    fn increment(&self) -> Self {
        self.plus(&Self::one())
    }

    /// Returns `self - 1`.
    #[inline]
    fn decrement(&self) -> Self {
        self.minus(&Self::one())
    }
}

impl<T> NumericCapability for T
where
    T: num_traits::Num + Clone,
{
    #[inline]
    fn one() -> Self {
        <T as num_traits::One>::one()
    }

    #[inline]
    fn plus(&self, rhs: &Self) -> Self {
        self.clone() + rhs.clone()
    }

    #[inline]
    fn minus(&self, rhs: &Self) -> Self {
        self.clone() - rhs.clone()
    }
}

/// The numeric operation group.
///
/// Implementors supply the four add/subtract primitives; everything else is
/// derived from them. Integer cells wrap at their own width, so an `AtomicU8`
/// holding `255` becomes `0` after an increment.
pub trait AtomicNumber: AtomicCell {
    /// The type of the amount added or subtracted.
    ///
    /// Equal to `Value` except for `AtomicChar`, which steps by an `i32`.
    type Delta;

    /// The delta used by increment and decrement.
    fn unit() -> Self::Delta;

    /// Adds `delta`, returning the previous value.
    fn get_and_add(&self, delta: Self::Delta) -> Self::Value;

    /// Adds `delta`, returning the new value.
    fn add_and_get(&self, delta: Self::Delta) -> Self::Value;

    /// Subtracts `delta`, returning the previous value.
    fn get_and_subtract(&self, delta: Self::Delta) -> Self::Value;

    /// Subtracts `delta`, returning the new value.
    fn subtract_and_get(&self, delta: Self::Delta) -> Self::Value;

    /// Adds `delta`.
    #[inline]
    fn add(&self, delta: Self::Delta) {
        self.get_and_add(delta);
    }

    /// Subtracts `delta`.
    #[inline]
    fn subtract(&self, delta: Self::Delta) {
        self.get_and_subtract(delta);
    }

    /// Adds one.
    #[inline]
    fn increment(&self) {
        self.get_and_add(Self::unit());
    }

    /// Subtracts one.
    #[inline]
    fn decrement(&self) {
        self.get_and_subtract(Self::unit());
    }

    /// Adds one, returning the new value.
    #[inline]
    fn increment_and_get(&self) -> Self::Value {
        self.add_and_get(Self::unit())
    }

    /// Adds one, returning the previous value.
    #[inline]
    fn get_and_increment(&self) -> Self::Value {
        self.get_and_add(Self::unit())
    }

    /// Subtracts one, returning the new value.
    #[inline]
    fn decrement_and_get(&self) -> Self::Value {
        self.subtract_and_get(Self::unit())
    }

    /// Subtracts one, returning the previous value.
    #[inline]
    fn get_and_decrement(&self) -> Self::Value {
        self.get_and_subtract(Self::unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::Wrapping;

    #[test]
    fn num_types_get_capability_for_free() {
        assert_eq!(7i32.plus(&5), 12);
        assert_eq!(7i32.minus(&5), 2);
        assert_eq!(Wrapping(u8::MAX).increment(), Wrapping(0));
        assert_eq!(1.5f64.decrement(), 0.5);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Meters(u32);

    impl NumericCapability for Meters {
        fn one() -> Self {
            Meters(1)
        }
        fn plus(&self, rhs: &Self) -> Self {
            Meters(self.0 + rhs.0)
        }
        fn minus(&self, rhs: &Self) -> Self {
            Meters(self.0 - rhs.0)
        }
    }

    #[test]
    fn custom_capability_uses_its_own_unit() {
        assert_eq!(Meters(4).increment(), Meters(5));
        assert_eq!(Meters(4).decrement(), Meters(3));
    }

    #[test]
    fn custom_capability_drives_reference_cells() {
        let cell = crate::AtomicRef::new(Meters(1));
        assert_eq!(cell.add_and_get(Meters(2)), Meters(3));
        assert_eq!(cell.get_and_add(Meters(4)), Meters(3));
        assert_eq!(cell.subtract_and_get(Meters(5)), Meters(2));
        assert_eq!(cell.get_and_subtract(Meters(1)), Meters(2));
        assert_eq!(cell.increment_and_get(), Meters(2));
        assert_eq!(cell.get_and_increment(), Meters(2));
        assert_eq!(cell.decrement_and_get(), Meters(2));
        assert_eq!(cell.get_and_decrement(), Meters(2));
        cell.increment();
        cell.add(Meters(10));
        cell.subtract(Meters(3));
        cell.decrement();
        assert_eq!(cell.get(), Meters(8));
    }
}
