//! Endian-aware primitive reading and writing over mapped bytes.
//!
//! Shared memory windows are usually laid out as fixed binary records agreed on by every
//! process mapping them. This module provides the bounds-checked, endian-explicit primitive
//! accessors that [`crate::SharedMemory::read_le`] and [`crate::SharedMemory::write_le`] build on.
//!
//! # Key Components
//!
//! - [`crate::io::RegionIO`] - Trait converting primitive types to and from fixed byte arrays
//! - [`crate::io::read_le_at`] / [`crate::io::read_be_at`] - Read at an offset, advancing it
//! - [`crate::io::write_le_at`] / [`crate::io::write_be_at`] - Write at an offset, advancing it
//!
//! # Examples
//!
//! ```rust
//! use shmregion::io::{read_le_at, write_le_at};
//!
//! let mut data = [0u8; 6];
//! let mut offset = 0;
//! write_le_at(&mut data, &mut offset, 0xBEEF_u16)?;
//! write_le_at(&mut data, &mut offset, 7_u32)?;
//! assert_eq!(offset, 6);
//!
//! let mut offset = 0;
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second), (0xBEEF, 7));
//! # Ok::<(), shmregion::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Every function returns [`crate::Error::OutOfBounds`] when the buffer is too short, including
//! when `offset + size_of::<T>()` would overflow.

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive types that can be stored in a shared memory window.
///
/// Each implementation names the fixed-size byte array used for its representation
/// (e.g. `[u8; 4]` for `u32`) and forwards to the standard library conversions.
pub trait RegionIO: Sized {
    /// Byte array representation of this type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_region_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RegionIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_region_io!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, usize, isize);

fn checked_range<T>(len: usize, offset: usize) -> Result<std::ops::Range<usize>> {
    let Some(end) = offset.checked_add(std::mem::size_of::<T>()) else {
        return Err(OutOfBounds);
    };

    if end > len {
        return Err(OutOfBounds);
    }

    Ok(offset..end)
}

/// Reads a little-endian `T` at `offset` and advances `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: RegionIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let range = checked_range::<T>(data.len(), *offset)?;
    let Ok(read) = data[range.clone()].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = range.end;
    Ok(T::from_le_bytes(read))
}

/// Reads a big-endian `T` at `offset` and advances `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: RegionIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let range = checked_range::<T>(data.len(), *offset)?;
    let Ok(read) = data[range.clone()].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = range.end;
    Ok(T::from_be_bytes(read))
}

/// Writes `value` little-endian at `offset` and advances `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too short; nothing is written then.
pub fn write_le_at<T: RegionIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let range = checked_range::<T>(data.len(), *offset)?;
    data[range.clone()].copy_from_slice(value.to_le_bytes().as_ref());

    *offset = range.end;
    Ok(())
}

/// Writes `value` big-endian at `offset` and advances `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too short; nothing is written then.
pub fn write_be_at<T: RegionIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let range = checked_range::<T>(data.len(), *offset)?;
    data[range.clone()].copy_from_slice(value.to_be_bytes().as_ref());

    *offset = range.end;
    Ok(())
}
