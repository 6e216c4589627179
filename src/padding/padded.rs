//! The padding decorator.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;

use super::PaddingStrategy;
use crate::cell::AtomicCell;
use crate::error::PaddingError;
use crate::numeric::AtomicNumber;

/// An atomic cell surrounded by cache-line filler.
///
/// The cell and its filler share one heap block. Because the filler is part
/// of the allocation's layout rather than a struct field, the optimizer cannot
/// strip it; [`footprint`](Self::footprint),
/// [`padding_before`](Self::padding_before) and
/// [`padding_after`](Self::padding_after) report what was actually reserved.
///
/// Every operation is forwarded unchanged to the wrapped cell.
pub struct Padded<C> {
    block: NonNull<u8>,
    layout: Layout,
    offset: usize,
    strategy: PaddingStrategy,
    _cell: PhantomData<C>,
}

// SAFETY: `Padded<C>` uniquely owns its block and the `C` inside it.
unsafe impl<C: Send> Send for Padded<C> {}
// SAFETY: shared access only ever hands out `&C`.
unsafe impl<C: Sync> Sync for Padded<C> {}

impl<C> Padded<C> {
    /// Moves `cell` into a freshly allocated, padded block.
    ///
    /// # Errors
    /// Returns [`PaddingError::Layout`] when the padded block would exceed the
    /// platform's addressable size and [`PaddingError::OutOfMemory`] when the
    /// allocator refuses it.
    pub fn new(cell: C, strategy: PaddingStrategy) -> Result<Self, PaddingError> {
        let (layout, offset) = plan::<C>(strategy)?;

        // SAFETY: `plan` never returns a zero-sized layout.
        let raw = unsafe { std::alloc::alloc_zeroed(layout) };
        let block = NonNull::new(raw).ok_or(PaddingError::OutOfMemory {
            bytes: layout.size(),
        })?;

        // SAFETY: `offset` is in bounds and aligned for `C` by construction.
        unsafe { block.as_ptr().add(offset).cast::<C>().write(cell) };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?strategy,
            footprint = layout.size(),
            align = layout.align(),
            offset,
            "laid out padded cell"
        );

        Ok(Self {
            block,
            layout,
            offset,
            strategy,
            _cell: PhantomData,
        })
    }

    /// The wrapped cell.
    #[inline(always)]
    pub fn inner(&self) -> &C {
        // SAFETY: the cell was written at `offset` in `new` and lives until drop.
        unsafe { &*self.block.as_ptr().add(self.offset).cast::<C>() }
    }

    /// The strategy this block was laid out with.
    pub fn strategy(&self) -> PaddingStrategy {
        self.strategy
    }

    /// Total bytes reserved for the cell and its filler.
    pub fn footprint(&self) -> usize {
        self.layout.size()
    }

    /// Filler bytes in front of the cell.
    pub fn padding_before(&self) -> usize {
        self.offset
    }

    /// Filler bytes behind the cell.
    pub fn padding_after(&self) -> usize {
        self.layout.size() - self.offset - core::mem::size_of::<C>()
    }

    /// Moves the cell out, releasing the filler.
    pub fn into_inner(self) -> C {
        let this = core::mem::ManuallyDrop::new(self);
        // SAFETY: the cell is read exactly once and the block freed without
        // running `Drop`, which would drop the cell a second time.
        unsafe {
            let cell = this.block.as_ptr().add(this.offset).cast::<C>().read();
            std::alloc::dealloc(this.block.as_ptr(), this.layout);
            cell
        }
    }
}

/// Computes the block layout for `C` under `strategy` and the cell's offset.
fn plan<C>(strategy: PaddingStrategy) -> Result<(Layout, usize), PaddingError> {
    let line = strategy.line().map_or(1, |line| line.bytes());
    let cell = Layout::new::<C>();
    let align = cell.align().max(line);

    let before = Layout::from_size_align(strategy.left_bytes(), align)?;
    let (with_cell, offset) = before.extend(cell)?;
    let after = Layout::from_size_align(strategy.right_bytes(), 1)?;
    let (block, _) = with_cell.extend(after)?;

    let layout = Layout::from_size_align(block.size().max(1), block.align())?.pad_to_align();
    Ok((layout, offset))
}

impl<C> Drop for Padded<C> {
    fn drop(&mut self) {
        // SAFETY: the cell is live and is dropped exactly once, before the
        // block that holds it is returned with its original layout.
        unsafe {
            core::ptr::drop_in_place(self.block.as_ptr().add(self.offset).cast::<C>());
            std::alloc::dealloc(self.block.as_ptr(), self.layout);
        }
    }
}

impl<C> core::ops::Deref for Padded<C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.inner()
    }
}

impl<C: AtomicCell> AtomicCell for Padded<C> {
    type Value = C::Value;

    #[inline(always)]
    fn get(&self) -> C::Value {
        self.inner().get()
    }

    #[inline(always)]
    fn set(&self, value: C::Value) {
        self.inner().set(value);
    }

    #[inline(always)]
    fn lazy_set(&self, value: C::Value) {
        self.inner().lazy_set(value);
    }

    #[inline(always)]
    fn compare_and_set(&self, expected: C::Value, update: C::Value) -> bool {
        self.inner().compare_and_set(expected, update)
    }

    #[inline(always)]
    fn get_and_set(&self, update: C::Value) -> C::Value {
        self.inner().get_and_set(update)
    }

    #[inline(always)]
    fn transform_and_extract<R, F>(&self, f: F) -> R
    where
        F: FnMut(&Self::Value) -> (R, Self::Value),
    {
        self.inner().transform_and_extract(f)
    }
}

impl<C: AtomicNumber> AtomicNumber for Padded<C> {
    type Delta = C::Delta;

    #[inline(always)]
    fn unit() -> C::Delta {
        C::unit()
    }

    #[inline(always)]
    fn get_and_add(&self, delta: C::Delta) -> C::Value {
        self.inner().get_and_add(delta)
    }

    #[inline(always)]
    fn add_and_get(&self, delta: C::Delta) -> C::Value {
        self.inner().add_and_get(delta)
    }

    #[inline(always)]
    fn get_and_subtract(&self, delta: C::Delta) -> C::Value {
        self.inner().get_and_subtract(delta)
    }

    #[inline(always)]
    fn subtract_and_get(&self, delta: C::Delta) -> C::Value {
        self.inner().subtract_and_get(delta)
    }
}

impl<C: core::fmt::Debug> core::fmt::Debug for Padded<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Padded")
            .field("strategy", &self.strategy)
            .field("cell", self.inner())
            .finish()
    }
}
