//! The uniform operation surface shared by every atomic cell.

use crate::transform::transform_loop;

/// A single slot of mutable memory shared across threads.
///
/// Every representation (primitive, floating point, character, generic
/// reference, padded) implements this trait. The four single-step operations
/// are wait-free; the transform family is lock-free and built on
/// [`compare_and_set`](AtomicCell::compare_and_set).
///
/// # Memory ordering
///
/// - `get` uses `Acquire`.
/// - `set` uses `SeqCst`; `lazy_set` uses `Release` only.
/// - `get_and_set` and a successful `compare_and_set` use `AcqRel`; a failed
///   `compare_and_set` uses `Acquire`.
///
/// Successful writes to one cell form a single total order. Nothing is
/// promised across distinct cells.
pub trait AtomicCell: Send + Sync {
    /// The value type held by the cell.
    type Value: Clone;

    /// Returns the current value.
    fn get(&self) -> Self::Value;

    /// Replaces the current value.
    fn set(&self, value: Self::Value);

    /// Replaces the current value with release ordering only.
    ///
    /// A later `get` on another thread may still observe the previous value
    /// for a short while; use it for publishing flags and counters where a
    /// full fence is not needed.
    fn lazy_set(&self, value: Self::Value);

    /// Stores `update` iff the current value equals `expected`.
    ///
    /// Returns `true` on success. On failure the cell is left untouched.
    /// What "equals" means is fixed per representation: value equality for
    /// integers, `bool` and `char`, bit equality for floats, and `PartialEq`
    /// for [`AtomicRef`](crate::AtomicRef).
    fn compare_and_set(&self, expected: Self::Value, update: Self::Value) -> bool;

    /// Replaces the current value, returning the previous one.
    fn get_and_set(&self, update: Self::Value) -> Self::Value;

    /// Applies `f` to the current value and installs the second half of its
    /// result, returning the first half.
    ///
    /// `f` may run more than once when other threads win the race, so it must
    /// not have side effects.
    ///
    /// ```
    /// use std::collections::VecDeque;
    /// use atomcell::{AtomicCell, AtomicRef};
    ///
    /// let queue = AtomicRef::new(VecDeque::from(vec![1, 2]));
    /// let head = queue.transform_and_extract(|q| {
    ///     let mut rest = q.clone();
    ///     let head = rest.pop_front();
    ///     (head, rest)
    /// });
    /// assert_eq!(head, Some(1));
    /// assert_eq!(queue.get(), VecDeque::from(vec![2]));
    /// ```
    #[inline]
    fn transform_and_extract<R, F>(&self, f: F) -> R
    where
        F: FnMut(&Self::Value) -> (R, Self::Value),
    {
        transform_loop(self, f)
    }

    /// Applies `f` to the current value and returns the installed value.
    #[inline]
    fn transform_and_get<F>(&self, mut f: F) -> Self::Value
    where
        F: FnMut(&Self::Value) -> Self::Value,
    {
        self.transform_and_extract(|current| {
            let update = f(current);
            (update.clone(), update)
        })
    }

    /// Applies `f` to the current value and returns the value it replaced.
    #[inline]
    fn get_and_transform<F>(&self, mut f: F) -> Self::Value
    where
        F: FnMut(&Self::Value) -> Self::Value,
    {
        self.transform_and_extract(|current| (current.clone(), f(current)))
    }

    /// Applies `f` to the current value.
    #[inline]
    fn transform<F>(&self, mut f: F)
    where
        F: FnMut(&Self::Value) -> Self::Value,
    {
        self.transform_and_extract(|current| ((), f(current)));
    }
}
