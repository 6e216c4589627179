//! Type-directed cell construction.
//!
//! [`create`] picks the narrowest representation for the initial value's
//! static type: integers, floats, `bool` and `char` get their dedicated
//! unboxed cells, other supported types land in [`AtomicRef`]. The choice is
//! made by trait resolution, so it costs nothing at runtime.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use crate::atomic::{
    AtomicBool, AtomicChar, AtomicF32, AtomicF64, AtomicI16, AtomicI32, AtomicI64, AtomicI8,
    AtomicIsize, AtomicRef, AtomicU16, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Identity,
};
use crate::cell::AtomicCell;
use crate::error::PaddingError;
use crate::padding::{Padded, PaddingStrategy};

/// Maps a value type to the cell that stores it best.
///
/// Implement it for your own types with [`atomic_builder!`](crate::atomic_builder).
pub trait AtomicBuilder: Sized {
    /// The cell representation for `Self`.
    type Cell: AtomicCell<Value = Self>;

    /// Builds a cell holding `self`.
    fn build(self) -> Self::Cell;
}

/// Creates the most specialized cell for `initial`.
///
/// ```
/// use atomcell::{create, AtomicCell, AtomicNumber};
///
/// let hits = create(0u64); // an `AtomicU64`
/// hits.increment();
/// assert_eq!(hits.get(), 1);
///
/// let name = create(String::from("a")); // an `AtomicRef<String>`
/// assert!(name.compare_and_set(String::from("a"), String::from("b")));
/// ```
#[inline]
pub fn create<V: AtomicBuilder>(initial: V) -> V::Cell {
    initial.build()
}

/// Creates the most specialized cell for `initial`, wrapped in cache-line
/// padding.
///
/// # Errors
/// Returns a [`PaddingError`] when the padded block cannot be laid out or
/// allocated.
#[inline]
pub fn create_with_padding<V: AtomicBuilder>(
    initial: V,
    strategy: PaddingStrategy,
) -> Result<Padded<V::Cell>, PaddingError> {
    Padded::new(initial.build(), strategy)
}

macro_rules! impl_builder {
    ($($value:ty => $cell:ty),* $(,)?) => {
        $(
            impl AtomicBuilder for $value {
                type Cell = $cell;

                #[inline]
                fn build(self) -> $cell {
                    <$cell>::new(self)
                }
            }
        )*
    };
}

impl_builder! {
    bool => AtomicBool,
    char => AtomicChar,
    f32 => AtomicF32,
    f64 => AtomicF64,
    i8 => AtomicI8,
    i16 => AtomicI16,
    i32 => AtomicI32,
    i64 => AtomicI64,
    isize => AtomicIsize,
    u8 => AtomicU8,
    u16 => AtomicU16,
    u32 => AtomicU32,
    u64 => AtomicU64,
    usize => AtomicUsize,
    String => AtomicRef<String>,
    &'static str => AtomicRef<&'static str>,
    i128 => AtomicRef<i128>,
    u128 => AtomicRef<u128>,
}

/// Routes a type to [`AtomicRef`] when passed to [`create`](crate::create).
///
/// ```
/// use atomcell::{atomic_builder, create, AtomicCell};
///
/// #[derive(Clone, PartialEq)]
/// struct Config { retries: u32 }
/// atomic_builder!(Config);
///
/// let cell = create(Config { retries: 3 });
/// assert_eq!(cell.get().retries, 3);
/// ```
#[macro_export]
macro_rules! atomic_builder {
    ($($value:ty),+ $(,)?) => {
        $(
            impl $crate::AtomicBuilder for $value {
                type Cell = $crate::AtomicRef<$value>;

                #[inline]
                fn build(self) -> Self::Cell {
                    $crate::AtomicRef::new(self)
                }
            }
        )+
    };
}

macro_rules! impl_generic_builder {
    ($($value:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> AtomicBuilder for $value<$($param),+>
            where
                $value<$($param),+>: Clone + PartialEq + Send + Sync + 'static,
            {
                type Cell = AtomicRef<Self>;

                #[inline]
                fn build(self) -> Self::Cell {
                    AtomicRef::new(self)
                }
            }
        )*
    };
}

impl_generic_builder! {
    Vec<T>,
    VecDeque<T>,
    Option<T>,
    Box<T>,
    Arc<T>,
    Identity<T>,
    BTreeSet<T>,
    BTreeMap<K, V>,
}

impl<A, B> AtomicBuilder for (A, B)
where
    (A, B): Clone + PartialEq + Send + Sync + 'static,
{
    type Cell = AtomicRef<Self>;

    #[inline]
    fn build(self) -> Self::Cell {
        AtomicRef::new(self)
    }
}
