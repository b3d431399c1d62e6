//! Descriptor handles for shared memory regions.
//!
//! A [`crate::SharedMemoryHandle`] is a plain value naming a descriptor. It does not close
//! anything on drop; ownership is a convention between the code that received the descriptor
//! and the [`crate::SharedMemory`] it is handed to. [`crate::BorrowedHandle`] is the view a
//! region gives out of its own descriptor: it is tied to the region's lifetime and offers no way
//! to close the descriptor.

use std::{
    marker::PhantomData,
    os::fd::{AsRawFd, RawFd},
};

use crate::Result;

/// Value naming the descriptor backing a shared memory region.
///
/// Two handles are equal exactly when they name the same descriptor value. Negative descriptor
/// values are invalid; [`SharedMemoryHandle::NULL`] is the canonical invalid handle.
///
/// # Examples
///
/// ```rust
/// use shmregion::SharedMemoryHandle;
///
/// assert!(!SharedMemoryHandle::NULL.is_valid());
/// assert!(SharedMemoryHandle::new(0).is_valid());
/// assert_eq!(SharedMemoryHandle::new(7), SharedMemoryHandle::new(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedMemoryHandle {
    fd: RawFd,
}

impl SharedMemoryHandle {
    /// The canonical invalid handle.
    pub const NULL: SharedMemoryHandle = SharedMemoryHandle { fd: -1 };

    /// Wraps a raw descriptor value. The value is not checked.
    pub const fn new(fd: RawFd) -> Self {
        SharedMemoryHandle { fd }
    }

    /// The raw descriptor value.
    pub const fn fd(&self) -> RawFd {
        self.fd
    }

    /// Returns `true` for any non-negative descriptor value.
    pub const fn is_valid(&self) -> bool {
        self.fd >= 0
    }

    /// Duplicates the descriptor with `dup(2)`.
    ///
    /// The returned handle names a new descriptor for the same backing object; the caller owns
    /// it and is responsible for closing it, typically by handing it to a
    /// [`crate::SharedMemory`].
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidHandle`] for an invalid handle and [`crate::Error::Io`]
    /// if `dup` fails.
    pub fn duplicate(&self) -> Result<SharedMemoryHandle> {
        if !self.is_valid() {
            return Err(crate::Error::InvalidHandle);
        }

        // SAFETY: dup only reads the descriptor table entry; a stale fd yields EBADF.
        let fd = unsafe { libc::dup(self.fd) };
        if fd < 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        Ok(SharedMemoryHandle { fd })
    }
}

impl Default for SharedMemoryHandle {
    fn default() -> Self {
        SharedMemoryHandle::NULL
    }
}

impl AsRawFd for SharedMemoryHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl From<RawFd> for SharedMemoryHandle {
    fn from(fd: RawFd) -> Self {
        SharedMemoryHandle { fd }
    }
}

/// Non-owning view of the descriptor held by a [`crate::SharedMemory`].
///
/// The view borrows the region, so it cannot outlive it, and it has no close operation.
/// [`BorrowedHandle::to_handle`] copies the descriptor value out when a plain handle is needed,
/// for example to [`SharedMemoryHandle::duplicate`] it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowedHandle<'a> {
    handle: SharedMemoryHandle,
    _region: PhantomData<&'a ()>,
}

impl<'a> BorrowedHandle<'a> {
    pub(crate) fn new(handle: SharedMemoryHandle) -> Self {
        BorrowedHandle {
            handle,
            _region: PhantomData,
        }
    }

    /// Returns `true` if the region currently holds a valid descriptor.
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Copies the descriptor value out of the view.
    ///
    /// The region still owns the descriptor; closing the returned handle while the region is
    /// alive leads to a double close.
    pub fn to_handle(&self) -> SharedMemoryHandle {
        self.handle
    }

    /// Duplicates the underlying descriptor, see [`SharedMemoryHandle::duplicate`].
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidHandle`] or [`crate::Error::Io`].
    pub fn duplicate(&self) -> Result<SharedMemoryHandle> {
        self.handle.duplicate()
    }
}

impl AsRawFd for BorrowedHandle<'_> {
    fn as_raw_fd(&self) -> RawFd {
        self.handle.fd
    }
}

/// Closes `handle` with `close(2)`, logging on failure.
///
/// The caller guarantees that `handle` is valid; passing an invalid one is a programming error.
pub(crate) fn close_handle(handle: SharedMemoryHandle) {
    debug_assert!(handle.is_valid(), "close_handle on invalid descriptor");

    // SAFETY: the caller owns the descriptor and does not use it after this call.
    if unsafe { libc::close(handle.fd) } < 0 {
        log::error!(
            "close({}) failed: {}",
            handle.fd,
            std::io::Error::last_os_error()
        );
    }
}
