//! The generic atomic cell for arbitrary value types.
//!
//! The value lives behind a heap pointer that is swapped atomically. Readers
//! pin the current epoch before dereferencing, and replaced values are handed
//! to `crossbeam_epoch` for deferred destruction, so a value is never freed
//! while another thread is still looking at it.
//!
//! `compare_and_set` is structural: it succeeds when the current value is
//! `==` to `expected`, even if it is a different allocation. This is what a
//! retry loop over immutable, persistent values needs. Wrap the value in
//! [`Identity`] to compare by identity instead.

use core::sync::atomic::Ordering;
use std::sync::Arc;

use crossbeam_epoch::{self as epoch, Atomic, Owned};

use crate::cell::AtomicCell;
use crate::numeric::{AtomicNumber, NumericCapability};

/// An atomic cell holding any `Clone + PartialEq` value.
///
/// Replaced values are destroyed by the epoch collector at some later point,
/// possibly on another thread, so `T` must not borrow anything:
///
/// ```compile_fail
/// use atomcell::{AtomicCell, AtomicRef};
///
/// let owner = String::from("scratch");
/// let cell = AtomicRef::new(owner.as_str());
/// cell.set("other");
/// ```
pub struct AtomicRef<T: 'static> {
    slot: Atomic<T>,
}

impl<T: 'static> AtomicRef<T> {
    /// Creates a new cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            slot: Atomic::new(value),
        }
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = epoch::pin();
        let current = self.slot.load(Ordering::Acquire, &guard);
        // SAFETY: the slot is never null, and the pinned guard keeps the
        // value alive until it is dropped at the end of this call.
        f(unsafe { current.deref() })
    }

    /// Consumes the cell, returning the contained value.
    pub fn into_inner(self) -> T {
        let this = core::mem::ManuallyDrop::new(self);
        // SAFETY: we own the cell, so no other thread can reach the slot.
        unsafe {
            let current = this.slot.load(Ordering::Relaxed, epoch::unprotected());
            *current.into_owned().into_box()
        }
    }
}

impl<T> AtomicCell for AtomicRef<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Value = T;

    fn get(&self) -> T {
        self.with(T::clone)
    }

    fn set(&self, value: T) {
        let guard = epoch::pin();
        let previous = self.slot.swap(Owned::new(value), Ordering::SeqCst, &guard);
        // SAFETY: `previous` is unlinked; only pinned readers can still see it.
        unsafe { guard.defer_destroy(previous) };
    }

    fn lazy_set(&self, value: T) {
        let guard = epoch::pin();
        let previous = self.slot.swap(Owned::new(value), Ordering::Release, &guard);
        // SAFETY: as in `set`.
        unsafe { guard.defer_destroy(previous) };
    }

    fn compare_and_set(&self, expected: T, update: T) -> bool {
        let guard = epoch::pin();
        let mut current = self.slot.load(Ordering::Acquire, &guard);
        let mut update = Owned::new(update);
        loop {
            // SAFETY: never null; protected by `guard`.
            if unsafe { current.deref() } != &expected {
                return false;
            }
            match self.slot.compare_exchange(
                current,
                update,
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    // SAFETY: `current` was just unlinked by this thread.
                    unsafe { guard.defer_destroy(current) };
                    return true;
                }
                // Another write landed; it may still be structurally equal.
                Err(err) => {
                    current = err.current;
                    update = err.new;
                }
            }
        }
    }

    fn get_and_set(&self, update: T) -> T {
        let guard = epoch::pin();
        let previous = self.slot.swap(Owned::new(update), Ordering::AcqRel, &guard);
        // SAFETY: never null; `guard` keeps it alive until the clone is taken.
        let value = unsafe { previous.deref() }.clone();
        // SAFETY: `previous` is unlinked.
        unsafe { guard.defer_destroy(previous) };
        value
    }

    /// Compares the slot against the exact allocation `f` saw, so nothing is
    /// cloned for the comparison and a successful exchange proves the value
    /// did not change in between.
    fn transform_and_extract<R, F>(&self, mut f: F) -> R
    where
        F: FnMut(&Self::Value) -> (R, Self::Value),
    {
        let guard = epoch::pin();
        let mut current = self.slot.load(Ordering::Acquire, &guard);
        loop {
            // SAFETY: never null; protected by `guard`.
            let (result, update) = f(unsafe { current.deref() });
            match self.slot.compare_exchange(
                current,
                Owned::new(update),
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    // SAFETY: `current` was just unlinked by this thread.
                    unsafe { guard.defer_destroy(current) };
                    return result;
                }
                Err(err) => current = err.current,
            }
        }
    }
}

impl<T> AtomicNumber for AtomicRef<T>
where
    T: NumericCapability + Send + Sync + 'static,
{
    type Delta = T;

    fn unit() -> T {
        T::one()
    }

    fn get_and_add(&self, delta: T) -> T {
        self.get_and_transform(|v| v.plus(&delta))
    }

    fn add_and_get(&self, delta: T) -> T {
        self.transform_and_get(|v| v.plus(&delta))
    }

    fn get_and_subtract(&self, delta: T) -> T {
        self.get_and_transform(|v| v.minus(&delta))
    }

    fn subtract_and_get(&self, delta: T) -> T {
        self.transform_and_get(|v| v.minus(&delta))
    }
}

impl<T: 'static> Drop for AtomicRef<T> {
    fn drop(&mut self) {
        // SAFETY: `&mut self` means no other thread holds the cell; values it
        // replaced earlier were already deferred to the collector.
        unsafe {
            let current = self.slot.load(Ordering::Relaxed, epoch::unprotected());
            drop(current.into_owned());
        }
    }
}

impl<T: Default + 'static> Default for AtomicRef<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> From<T> for AtomicRef<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: core::fmt::Debug + 'static> core::fmt::Debug for AtomicRef<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.with(|value| f.debug_tuple("AtomicRef").field(value).finish())
    }
}

/// A shared value compared by identity.
///
/// Two `Identity` handles are equal iff they point at the same allocation, so
/// `AtomicRef<Identity<T>>::compare_and_set` only succeeds against the exact
/// handle that was stored.
pub struct Identity<T>(Arc<T>);

impl<T> Identity<T> {
    /// Allocates `value` behind a fresh identity.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the shared allocation.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for Identity<T> {}

impl<T> core::ops::Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<Arc<T>> for Identity<T> {
    fn from(arc: Arc<T>) -> Self {
        Self(arc)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Identity").field(&*self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn cas_is_structural() {
        let cell = AtomicRef::new(vec![1, 2, 3]);
        // A freshly built, equal vector matches.
        assert!(cell.compare_and_set(vec![1, 2, 3], vec![4]));
        assert_eq!(cell.get(), vec![4]);
        assert!(!cell.compare_and_set(vec![1, 2, 3], vec![5]));
        assert_eq!(cell.get(), vec![4]);
    }

    #[test]
    fn identity_cas_requires_same_allocation() {
        let first = Identity::new(String::from("x"));
        let cell = AtomicRef::new(first.clone());
        assert!(!cell.compare_and_set(Identity::new(String::from("x")), Identity::new(String::new())));
        assert!(cell.compare_and_set(first, Identity::new(String::from("y"))));
        assert_eq!(cell.with(|v| v.as_str().to_owned()), "y");
    }

    #[test]
    fn transform_and_extract_dequeues() {
        let cell = AtomicRef::new(VecDeque::from(vec!['a', 'b']));
        let head = cell.transform_and_extract(|q| {
            let mut rest = q.clone();
            let head = rest.pop_front();
            (head, rest)
        });
        assert_eq!(head, Some('a'));
        assert_eq!(cell.get(), VecDeque::from(vec!['b']));
    }

    #[test]
    fn get_and_set_returns_previous() {
        let cell = AtomicRef::new(String::from("old"));
        assert_eq!(cell.get_and_set(String::from("new")), "old");
        cell.lazy_set(String::from("newer"));
        assert_eq!(cell.into_inner(), "newer");
    }

    #[test]
    fn drop_releases_value() {
        let shared = Arc::new(());
        {
            let cell = AtomicRef::new(Arc::clone(&shared));
            drop(cell);
        }
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn replaced_values_are_eventually_destroyed() {
        let owner = Arc::new(());
        let cell = AtomicRef::new(Arc::clone(&owner));
        for _ in 0..3 {
            cell.set(Arc::clone(&owner));
        }
        assert!(cell.compare_and_set(Arc::clone(&owner), Arc::clone(&owner)));
        drop(cell);

        // Deferred destructors run once the global epoch has moved on.
        for _ in 0..100_000 {
            if Arc::strong_count(&owner) == 1 {
                break;
            }
            epoch::pin().flush();
            std::thread::yield_now();
        }
        assert_eq!(Arc::strong_count(&owner), 1);
    }

    #[test]
    fn debug_shows_value() {
        assert_eq!(format!("{:?}", AtomicRef::new(Some(2))), "AtomicRef(Some(2))");
    }
}
