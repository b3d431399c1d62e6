use thiserror::Error;

use crate::region::Capability;

macro_rules! unsupported_error {
    ($capability:expr) => {{
        log::debug!(
            "{} refused: capability is unavailable in this execution context",
            $capability
        );
        crate::Error::Unsupported($capability)
    }};
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants separate three kinds of failure. A capability that this execution context does
/// not provide at all is reported as [`Error::Unsupported`], so callers can tell "not possible
/// here" apart from "tried and failed". Ordinary lifecycle failures ([`Error::InvalidHandle`],
/// [`Error::AlreadyMapped`], [`Error::NotMapped`], ...) describe a region in the wrong state for
/// the requested operation. OS-call failures carry the underlying [`std::io::Error`].
///
/// # Error Categories
///
/// ## Capability Errors
/// - [`Error::Unsupported`] - Creation, naming, sharing or locking is not available
///
/// ## Lifecycle Errors
/// - [`Error::InvalidHandle`] - The region holds no usable descriptor
/// - [`Error::AlreadyMapped`] - A mapping is already active
/// - [`Error::NotMapped`] - No mapping is active
/// - [`Error::InvalidSize`] - A zero-length mapping was requested
/// - [`Error::ReadOnly`] - Write access was requested on a read-only region
/// - [`Error::OutOfBounds`] - Access outside of the active mapping
///
/// ## OS Errors
/// - [`Error::MapFailed`] - `mmap` rejected the request
/// - [`Error::Io`] - Any other descriptor operation failed
///
/// # Examples
///
/// ```rust,no_run
/// use shmregion::{Error, SharedMemory, SharedMemoryHandle};
///
/// let mut region = SharedMemory::from_handle(SharedMemoryHandle::new(3), false);
/// match region.map(4096) {
///     Ok(()) => println!("mapped {} bytes", region.mapped_size()),
///     Err(Error::InvalidHandle) => eprintln!("no descriptor to map"),
///     Err(Error::MapFailed(io_err)) => eprintln!("mmap failed: {}", io_err),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The requested capability is categorically absent in this execution context.
    ///
    /// Minting new shared memory objects, opening or deleting named regions, transferring
    /// descriptors to other processes and advisory locking all require privileges this
    /// variant of the region does not have. The operation was refused before any state changed.
    #[error("{0} is not supported in this execution context")]
    Unsupported(Capability),

    /// The region does not hold a valid descriptor.
    ///
    /// Returned for regions constructed without a handle, regions built from a negative
    /// descriptor, and regions that have already been closed.
    #[error("Region does not hold a valid descriptor")]
    InvalidHandle,

    /// The region is already mapped.
    ///
    /// A region carries at most one mapping; unmap the current one before mapping again.
    #[error("Region is already mapped")]
    AlreadyMapped,

    /// The region is not mapped.
    #[error("Region is not mapped")]
    NotMapped,

    /// A mapping of zero bytes was requested.
    #[error("Cannot map a zero-length region")]
    InvalidSize,

    /// Write access was requested on a region mapped read-only.
    #[error("Region is mapped read-only")]
    ReadOnly,

    /// An out of bound access was attempted on the mapping.
    ///
    /// This error occurs when an accessor would read or write beyond the end of the active
    /// mapping. It's a safety check, the mapping itself is never touched outside its length.
    #[error("Out of Bound access would have occurred!")]
    OutOfBounds,

    /// The underlying `mmap` call failed.
    ///
    /// The region's mapping state is left cleared, and the region can be mapped again later.
    #[error("Failed to map region - {0}")]
    MapFailed(std::io::Error),

    /// Descriptor I/O error.
    ///
    /// Wraps standard I/O errors from descriptor operations such as `dup`.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
