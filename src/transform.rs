//! The compare-and-set retry loop behind every transform operation.
//!
//! The loop reads the current value, computes `(result, update)` from it and
//! tries to install `update` with a single `compare_and_set`. A failed attempt
//! means another thread's write landed in between; the loop starts over from
//! the fresh value. Exactly one successful CAS decides the transition, so the
//! operation is linearizable. It is lock-free but not wait-free: some thread
//! always makes progress, while an unlucky caller may retry indefinitely.

use crate::cell::AtomicCell;

/// Runs the read-transform-write loop on `cell` until an update sticks.
///
/// `f` receives the value read at the start of each attempt and returns the
/// caller's result together with the value to install. It may be invoked
/// several times per call and must be free of side effects.
///
/// This is the engine behind [`AtomicCell::transform_and_extract`]; it is
/// public so cells implemented outside this crate can reuse it.
pub fn transform_loop<C, R, F>(cell: &C, mut f: F) -> R
where
    C: AtomicCell + ?Sized,
    F: FnMut(&C::Value) -> (R, C::Value),
{
    #[cfg(feature = "tracing")]
    let mut retries: u32 = 0;

    loop {
        let current = cell.get();
        let (result, update) = f(&current);
        if cell.compare_and_set(current, update) {
            #[cfg(feature = "tracing")]
            {
                if retries > 0 {
                    tracing::trace!(retries, "transform settled after contention");
                }
            }
            return result;
        }

        #[cfg(feature = "tracing")]
        {
            retries = retries.saturating_add(1);
        }
    }
}
