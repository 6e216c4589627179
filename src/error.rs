//! Configuration errors.
//!
//! Atomic operations themselves never fail: a rejected `compare_and_set` is an
//! ordinary `false`. The only erroneous input is a padding layout the platform
//! cannot honor, which is rejected when the padded cell is built.

use core::alloc::LayoutError;

/// The error type for rejected padding configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaddingError {
    /// The requested cache-line size is not a power of two.
    NotPowerOfTwo {
        /// The rejected byte count.
        bytes: usize,
    },
    /// The requested cache-line size lies outside the supported range.
    OutOfRange {
        /// The rejected byte count.
        bytes: usize,
        /// Smallest accepted line size.
        min: usize,
        /// Largest accepted line size.
        max: usize,
    },
    /// The padded block cannot be described by a valid `Layout`.
    Layout(LayoutError),
    /// The allocator could not provide the padded block.
    OutOfMemory {
        /// Size of the block that was requested.
        bytes: usize,
    },
}

impl core::fmt::Display for PaddingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotPowerOfTwo { bytes } => {
                write!(f, "cache line of {bytes} bytes is not a power of two")
            }
            Self::OutOfRange { bytes, min, max } => write!(
                f,
                "cache line of {bytes} bytes is outside the supported range {min}..={max}"
            ),
            Self::Layout(err) => write!(f, "padded layout rejected: {err}"),
            Self::OutOfMemory { bytes } => {
                write!(f, "failed to allocate a padded block of {bytes} bytes")
            }
        }
    }
}

impl std::error::Error for PaddingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for PaddingError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}
