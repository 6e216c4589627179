use core::sync::atomic::{self, Ordering};

use crate::cell::AtomicCell;

/// An atomic `bool`, stored in a two-state byte slot.
///
/// Commonly used as a once-only flag: [`test_and_set`](Self::test_and_set)
/// lets exactly one of many racing threads win.
#[repr(transparent)]
pub struct AtomicBool {
    inner: atomic::AtomicBool,
}

impl AtomicBool {
    /// Creates a new atomic bool.
    #[inline(always)]
    pub const fn new(value: bool) -> Self {
        Self {
            inner: atomic::AtomicBool::new(value),
        }
    }

    /// Sets the flag if it is currently `false`.
    ///
    /// Returns `true` if this call performed the transition.
    #[inline]
    pub fn test_and_set(&self) -> bool {
        self.compare_and_set(false, true)
    }

    /// Flips the flag, returning the previous value.
    #[inline]
    pub fn get_and_flip(&self) -> bool {
        self.inner.fetch_xor(true, Ordering::AcqRel)
    }

    /// Returns the underlying standard atomic.
    #[inline]
    pub fn inner(&self) -> &atomic::AtomicBool {
        &self.inner
    }

    /// Consumes the cell, returning the contained value.
    #[inline]
    pub fn into_inner(self) -> bool {
        self.inner.into_inner()
    }
}

impl AtomicCell for AtomicBool {
    type Value = bool;

    #[inline(always)]
    fn get(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    #[inline(always)]
    fn set(&self, value: bool) {
        self.inner.store(value, Ordering::SeqCst);
    }

    #[inline(always)]
    fn lazy_set(&self, value: bool) {
        self.inner.store(value, Ordering::Release);
    }

    #[inline(always)]
    fn compare_and_set(&self, expected: bool, update: bool) -> bool {
        self.inner
            .compare_exchange(expected, update, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[inline(always)]
    fn get_and_set(&self, update: bool) -> bool {
        self.inner.swap(update, Ordering::AcqRel)
    }
}

impl Default for AtomicBool {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<bool> for AtomicBool {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Debug for AtomicBool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AtomicBool").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn flag_round_trip() {
        let flag = AtomicBool::new(false);
        assert!(!flag.get());
        assert!(!flag.get_and_set(true));
        assert!(flag.get());
        assert!(!flag.compare_and_set(false, false));
        assert!(flag.compare_and_set(true, false));
        assert!(!flag.get_and_flip());
        assert!(flag.get());
    }

    #[test]
    fn exactly_one_thread_wins_test_and_set() {
        let flag = AtomicBool::default();
        let wins = thread::scope(|s| {
            let flag = &flag;
            let handles: Vec<_> = (0..8).map(|_| s.spawn(move || flag.test_and_set())).collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&won| won)
                .count()
        });
        assert_eq!(wins, 1);
        assert!(flag.into_inner());
    }
}
