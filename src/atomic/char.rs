//! An atomic `char`.
//!
//! The scalar value is packed into an `AtomicU32`. Arithmetic runs over the
//! 1,112,064 Unicode scalar values in order, stepping over the surrogate
//! range `U+D800..=U+DFFF`, and wraps at both ends: `char::MAX` plus one is
//! `'\0'`, and `'\u{D7FF}'` plus one is `'\u{E000}'`.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::cell::AtomicCell;
use crate::numeric::AtomicNumber;

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;
/// Number of Unicode scalar values.
const SCALAR_COUNT: u32 = 0x11_0000 - SURROGATE_LEN;

#[inline]
fn to_index(code: u32) -> u32 {
    if code < SURROGATE_START {
        code
    } else {
        code - SURROGATE_LEN
    }
}

#[inline]
fn from_index(index: u32) -> u32 {
    if index < SURROGATE_START {
        index
    } else {
        index + SURROGATE_LEN
    }
}

/// Moves `code` by `delta` positions in scalar-value order, wrapping.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step(code: u32, delta: i64) -> u32 {
    let index = (i64::from(to_index(code)) + delta).rem_euclid(i64::from(SCALAR_COUNT));
    // `rem_euclid` keeps the index in `0..SCALAR_COUNT`, which fits in u32.
    from_index(index as u32)
}

#[inline]
fn decode(code: u32) -> char {
    // SAFETY: the slot only ever holds values produced by `char as u32` or by
    // `step`, which maps scalar indices back onto scalar values.
    unsafe { char::from_u32_unchecked(code) }
}

/// An atomic `char`.
#[repr(transparent)]
pub struct AtomicChar {
    code: AtomicU32,
}

impl AtomicChar {
    /// Creates a new atomic char.
    #[inline(always)]
    pub const fn new(value: char) -> Self {
        Self {
            code: AtomicU32::new(value as u32),
        }
    }

    /// Moves the value by `delta` scalar positions, returning `(previous, new)`.
    #[inline]
    fn update(&self, delta: i64) -> (char, char) {
        let previous = match self.code.fetch_update(Ordering::AcqRel, Ordering::Acquire, |code| {
            Some(step(code, delta))
        }) {
            Ok(code) | Err(code) => code,
        };
        (decode(previous), decode(step(previous, delta)))
    }

    /// Consumes the cell, returning the contained value.
    #[inline]
    pub fn into_inner(self) -> char {
        decode(self.code.into_inner())
    }
}

impl AtomicCell for AtomicChar {
    type Value = char;

    #[inline(always)]
    fn get(&self) -> char {
        decode(self.code.load(Ordering::Acquire))
    }

    #[inline(always)]
    fn set(&self, value: char) {
        self.code.store(value as u32, Ordering::SeqCst);
    }

    #[inline(always)]
    fn lazy_set(&self, value: char) {
        self.code.store(value as u32, Ordering::Release);
    }

    #[inline(always)]
    fn compare_and_set(&self, expected: char, update: char) -> bool {
        self.code
            .compare_exchange(
                expected as u32,
                update as u32,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    #[inline(always)]
    fn get_and_set(&self, update: char) -> char {
        decode(self.code.swap(update as u32, Ordering::AcqRel))
    }
}

impl AtomicNumber for AtomicChar {
    type Delta = i32;

    #[inline(always)]
    fn unit() -> i32 {
        1
    }

    #[inline]
    fn get_and_add(&self, delta: i32) -> char {
        self.update(i64::from(delta)).0
    }

    #[inline]
    fn add_and_get(&self, delta: i32) -> char {
        self.update(i64::from(delta)).1
    }

    #[inline]
    fn get_and_subtract(&self, delta: i32) -> char {
        self.update(-i64::from(delta)).0
    }

    #[inline]
    fn subtract_and_get(&self, delta: i32) -> char {
        self.update(-i64::from(delta)).1
    }
}

impl Default for AtomicChar {
    fn default() -> Self {
        Self::new('\0')
    }
}

impl From<char> for AtomicChar {
    fn from(value: char) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Debug for AtomicChar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AtomicChar").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_wraps_to_min() {
        let c = AtomicChar::new(char::MAX);
        assert_eq!(c.increment_and_get(), '\0');
        assert_eq!(c.decrement_and_get(), char::MAX);
    }

    #[test]
    fn arithmetic_skips_surrogates() {
        let c = AtomicChar::new('\u{D7FF}');
        assert_eq!(c.increment_and_get(), '\u{E000}');
        assert_eq!(c.get_and_decrement(), '\u{E000}');
        assert_eq!(c.get(), '\u{D7FF}');
    }

    #[test]
    fn large_deltas_wrap_modulo_scalar_space() {
        let c = AtomicChar::new('a');
        let full_turn = i32::try_from(SCALAR_COUNT).unwrap();
        assert_eq!(c.add_and_get(full_turn), 'a');
        assert_eq!(c.subtract_and_get(full_turn + 1), '`');
        assert_eq!(c.subtract_and_get(i32::from(b'`')), '\0');
        assert_eq!(c.get_and_subtract(1), '\0');
        assert_eq!(c.get(), char::MAX);
    }

    #[test]
    fn extreme_deltas_stay_in_scalar_space() {
        let c = AtomicChar::new('a');
        assert_eq!(c.subtract_and_get(i32::MIN), '\u{16061}');
        assert_eq!(c.add_and_get(i32::MIN), 'a');
        assert_eq!(c.get_and_add(i32::MAX), 'a');
        assert_eq!(c.subtract_and_get(i32::MAX), 'a');
    }

    #[test]
    fn ascii_steps() {
        let c = AtomicChar::new('a');
        assert_eq!(c.get_and_add(2), 'a');
        assert_eq!(c.get(), 'c');
        assert_eq!(c.subtract_and_get(2), 'a');
        assert!(c.compare_and_set('a', 'z'));
        assert!(!c.compare_and_set('a', 'b'));
        assert_eq!(c.get_and_set('q'), 'z');
        assert_eq!(c.into_inner(), 'q');
    }
}
