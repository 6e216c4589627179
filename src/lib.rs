//! # `atomcell` - Lock-Free Atomic Cells
//!
//! A uniform abstraction over single-slot mutable memory shared between
//! threads. Every cell supports `get`, `set`, `compare_and_set` and
//! `get_and_set`, a family of CAS-driven transform operations, and, where the
//! value type is numeric, increment/decrement/add/subtract.
//!
//! ## Representations
//!
//! [`create`] selects a representation from the initial value's static type:
//!
//! | Value type                  | Cell            | Storage                          |
//! |-----------------------------|-----------------|----------------------------------|
//! | `i8` .. `u64`, `isize`, `usize` | `AtomicI8` ..  | native atomic of the same width   |
//! | `f32`, `f64`                | `AtomicF32/F64` | IEEE bits in `AtomicU32/U64`     |
//! | `bool`                      | `AtomicBool`    | two-state byte                   |
//! | `char`                      | `AtomicChar`    | scalar value in `AtomicU32`      |
//! | anything else               | `AtomicRef<T>`  | epoch-reclaimed heap pointer     |
//!
//! ## Guarantees
//!
//! - **Value equality**: `compare_and_set` compares values (bit patterns for
//!   floats, `PartialEq` for `AtomicRef`), never addresses.
//! - **No torn reads**: a `get` returns a value some earlier write installed.
//! - **Linearizability**: successful writes to one cell form a total order.
//! - **Lock freedom**: transforms retry on contention and never block.
//! - **Capability gating**: numeric operations only exist on numeric cells;
//!   misuse is a compile error, not a runtime fault.
//!
//! ## Example
//!
//! ```rust
//! use atomcell::{create, create_with_padding, AtomicCell, AtomicNumber, PaddingStrategy};
//! use std::thread;
//!
//! let hits = create_with_padding(0u64, PaddingStrategy::LEFT_RIGHT_128).unwrap();
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..1000 {
//!                 hits.increment();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.get(), 4000);
//!
//! let queue = create(vec!['a', 'b']);
//! let head = queue.transform_and_extract(|q| (q[0], q[1..].to_vec()));
//! assert_eq!(head, 'a');
//! assert_eq!(queue.get(), vec!['b']);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod atomic;
pub mod builder;
pub mod cell;
pub mod error;
pub mod numeric;
pub mod padding;
pub mod transform;

pub use atomic::{
    AtomicBool, AtomicChar, AtomicF32, AtomicF64, AtomicI16, AtomicI32, AtomicI64, AtomicI8,
    AtomicIsize, AtomicRef, AtomicU16, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Identity,
};
pub use builder::{create, create_with_padding, AtomicBuilder};
pub use cell::AtomicCell;
pub use error::PaddingError;
pub use numeric::{AtomicNumber, NumericCapability};
pub use padding::{CacheLine, Padded, PaddingStrategy};
pub use transform::transform_loop;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Primitive cells are unboxed: exactly the size of their backing slot.
    assert!(mem::size_of::<AtomicBool>() == mem::size_of::<bool>());
    assert!(mem::size_of::<AtomicI8>() == 1);
    assert!(mem::size_of::<AtomicU16>() == 2);
    assert!(mem::size_of::<AtomicChar>() == mem::size_of::<u32>());
    assert!(mem::size_of::<AtomicF32>() == mem::size_of::<f32>());
    assert!(mem::size_of::<AtomicF64>() == mem::size_of::<f64>());

    // The generic cell is a single pointer.
    assert!(mem::size_of::<AtomicRef<String>>() == mem::size_of::<usize>());
};
