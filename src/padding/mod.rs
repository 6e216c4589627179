//! Cache-line padding for atomic cells.
//!
//! A heavily written counter that shares a cache line with unrelated data
//! drags that data's line between cores on every write (false sharing).
//! [`Padded`] places a cell in its own heap block with filler bytes before
//! and/or after it, as described by a [`PaddingStrategy`].

mod padded;

pub use padded::Padded;

use serde::{Deserialize, Serialize};

use crate::error::PaddingError;

/// A validated cache-line size in bytes.
///
/// Must be a power of two between [`CacheLine::MIN`] and [`CacheLine::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CacheLine(usize);

impl CacheLine {
    /// Smallest accepted line size.
    pub const MIN: usize = 16;
    /// Largest accepted line size (one small page).
    pub const MAX: usize = 4096;

    /// 64-byte lines (most x86-64 and ARM cores).
    pub const B64: Self = Self(64);
    /// 128-byte lines (Apple silicon, adjacent-line prefetch on x86-64).
    pub const B128: Self = Self(128);
    /// 256-byte lines (some POWER and s390x cores).
    pub const B256: Self = Self(256);

    /// Validates a line size.
    ///
    /// # Errors
    /// Returns [`PaddingError::NotPowerOfTwo`] or [`PaddingError::OutOfRange`]
    /// when `bytes` cannot describe a cache line.
    pub fn new(bytes: usize) -> Result<Self, PaddingError> {
        if !bytes.is_power_of_two() {
            return Err(rejected(PaddingError::NotPowerOfTwo { bytes }));
        }
        if !(Self::MIN..=Self::MAX).contains(&bytes) {
            return Err(rejected(PaddingError::OutOfRange {
                bytes,
                min: Self::MIN,
                max: Self::MAX,
            }));
        }
        Ok(Self(bytes))
    }

    /// The cache-line size this target is tuned for.
    pub fn platform() -> Self {
        let align = core::mem::align_of::<crossbeam_utils::CachePadded<u8>>();
        Self(align.clamp(Self::MIN, Self::MAX))
    }

    /// The line size in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for CacheLine {
    type Error = PaddingError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<CacheLine> for usize {
    fn from(line: CacheLine) -> usize {
        line.0
    }
}

fn rejected(err: PaddingError) -> PaddingError {
    #[cfg(feature = "tracing")]
    tracing::warn!(error = %err, "rejected cache-line configuration");
    err
}

/// Where filler bytes go around a cell.
///
/// Each padded side receives one full line of filler, and the block is
/// aligned to the line size so the value never straddles a line boundary it
/// shares with a neighbour on the padded side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "side", content = "line", rename_all = "kebab-case")]
pub enum PaddingStrategy {
    /// No filler; the cell is stored as-is.
    #[default]
    NoPadding,
    /// One line of filler before the value.
    Left(CacheLine),
    /// One line of filler after the value.
    Right(CacheLine),
    /// One line of filler on each side.
    LeftRight(CacheLine),
}

impl PaddingStrategy {
    /// 64 bytes before the value.
    pub const LEFT_64: Self = Self::Left(CacheLine::B64);
    /// 64 bytes after the value.
    pub const RIGHT_64: Self = Self::Right(CacheLine::B64);
    /// 64 bytes on each side.
    pub const LEFT_RIGHT_64: Self = Self::LeftRight(CacheLine::B64);
    /// 128 bytes before the value.
    pub const LEFT_128: Self = Self::Left(CacheLine::B128);
    /// 128 bytes after the value.
    pub const RIGHT_128: Self = Self::Right(CacheLine::B128);
    /// 128 bytes on each side.
    pub const LEFT_RIGHT_128: Self = Self::LeftRight(CacheLine::B128);
    /// 256 bytes before the value.
    pub const LEFT_256: Self = Self::Left(CacheLine::B256);
    /// 256 bytes after the value.
    pub const RIGHT_256: Self = Self::Right(CacheLine::B256);
    /// 256 bytes on each side.
    pub const LEFT_RIGHT_256: Self = Self::LeftRight(CacheLine::B256);

    /// The line size this strategy targets, if any.
    pub const fn line(self) -> Option<CacheLine> {
        match self {
            Self::NoPadding => None,
            Self::Left(line) | Self::Right(line) | Self::LeftRight(line) => Some(line),
        }
    }

    /// Filler bytes requested before the value.
    pub const fn left_bytes(self) -> usize {
        match self {
            Self::Left(line) | Self::LeftRight(line) => line.bytes(),
            Self::NoPadding | Self::Right(_) => 0,
        }
    }

    /// Filler bytes requested after the value.
    pub const fn right_bytes(self) -> usize {
        match self {
            Self::Right(line) | Self::LeftRight(line) => line.bytes(),
            Self::NoPadding | Self::Left(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_line_validation() {
        assert_eq!(CacheLine::new(64), Ok(CacheLine::B64));
        assert_eq!(
            CacheLine::new(96),
            Err(PaddingError::NotPowerOfTwo { bytes: 96 })
        );
        assert_eq!(
            CacheLine::new(8192),
            Err(PaddingError::OutOfRange {
                bytes: 8192,
                min: CacheLine::MIN,
                max: CacheLine::MAX
            })
        );
        assert!(CacheLine::new(0).is_err());
    }

    #[test]
    fn platform_line_is_valid() {
        let line = CacheLine::platform();
        assert_eq!(CacheLine::new(line.bytes()), Ok(line));
    }

    #[test]
    fn strategy_byte_budgets() {
        assert_eq!(PaddingStrategy::NoPadding.left_bytes(), 0);
        assert_eq!(PaddingStrategy::LEFT_64.left_bytes(), 64);
        assert_eq!(PaddingStrategy::LEFT_64.right_bytes(), 0);
        assert_eq!(PaddingStrategy::RIGHT_128.right_bytes(), 128);
        assert_eq!(PaddingStrategy::LEFT_RIGHT_256.left_bytes(), 256);
        assert_eq!(PaddingStrategy::LEFT_RIGHT_256.right_bytes(), 256);
        assert_eq!(PaddingStrategy::default().line(), None);
    }
}
