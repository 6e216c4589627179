//! Concrete cell representations.
//!
//! Primitive values get a dedicated, unboxed representation backed by a
//! hardware atomic of matching width. Everything else goes through
//! [`AtomicRef`], an epoch-reclaimed pointer slot.

/// Atomic `bool`.
pub mod bool;
/// Atomic `char`.
pub mod char;
/// Atomic `f32` and `f64`.
pub mod float;
/// Atomic signed and unsigned integers.
pub mod integer;
/// Atomic cell for arbitrary values.
pub mod reference;

pub use self::bool::AtomicBool;
pub use self::char::AtomicChar;
pub use self::float::{AtomicF32, AtomicF64};
pub use self::integer::{
    AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32, AtomicU64,
    AtomicU8, AtomicUsize,
};
pub use self::reference::{AtomicRef, Identity};
