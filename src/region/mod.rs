//! Shared memory regions backed by an externally supplied descriptor.
//!
//! This module provides [`crate::region::SharedMemory`], an object that owns exactly one
//! descriptor and, while mapped, exactly one shared mapping of it. The region's lifecycle is a
//! small state machine over {unmapped, mapped} crossed with {open, closed}:
//!
//! ```text
//!   from_handle ──► unmapped ──map──► mapped
//!                      ▲  ◄──unmap───   │
//!                      │                │
//!                    close ◄────────── close (unmaps first)
//!                      │
//!                      ▼
//!                   closed (descriptor released, terminal)
//! ```
//!
//! # Architecture
//!
//! The full operation set of a shared memory region lives in the
//! [`crate::region::SharedMemoryOps`] trait. Some of those operations (minting new regions,
//! opening or deleting named regions, handing the descriptor to another process, advisory
//! locking) need a capability outside the region. [`crate::region::SharedMemory`] is the variant
//! for execution contexts that withhold all of them: it only ever consumes a descriptor received
//! from elsewhere, and refuses the rest with [`crate::Error::Unsupported`].
//!
//! # Key Components
//!
//! - [`crate::region::SharedMemory`] - The region itself
//! - [`crate::region::SharedMemoryOps`] - Capability-checked operation set
//! - [`crate::region::SharedMemoryHandle`] - Descriptor value consumed by regions
//! - [`crate::region::BorrowedHandle`] - Non-owning view returned by [`crate::region::SharedMemory::handle`]
//! - [`crate::region::CreateOptions`] - Creation request for capable implementations
//! - [`crate::region::Capability`] - Names of the capability-dependent operations
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use shmregion::{SharedMemory, SharedMemoryHandle};
//!
//! // A descriptor inherited at process start
//! let mut region = SharedMemory::from_handle(SharedMemoryHandle::new(3), false);
//! region.map(4096)?;
//! region.write_at(0, b"hello")?;
//! assert_eq!(region.data_slice(0, 5)?, b"hello");
//!
//! region.unmap()?;
//! region.close();
//! # Ok::<(), shmregion::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! A region is `Send` and `Sync`, but every state transition takes `&mut self`, so concurrent
//! mapping, unmapping and closing of one region is ruled out by the borrow checker. Independent
//! regions mapping the same backing object share memory without any arbitration; that is the job
//! of the advisory lock, which this variant does not provide.

mod capability;
mod handle;
mod mapping;
mod options;

pub use capability::Capability;
pub use handle::{BorrowedHandle, SharedMemoryHandle};
pub use options::{CreateOptions, ProcessId};

use mapping::{Mapping, MappingState};

use crate::{
    io::{self, RegionIO},
    Error::{AlreadyMapped, InvalidHandle, InvalidSize, NotMapped},
    Result,
};

/// The complete operation set of a shared memory region.
///
/// Implementations differ in which [`Capability`] they support. Unsupported operations must fail
/// with [`crate::Error::Unsupported`] and leave every piece of state untouched, so a caller can
/// always distinguish "this is not possible here" from "this was tried and failed".
pub trait SharedMemoryOps {
    /// Returns `true` if `capability` is available.
    fn supports(&self, capability: Capability) -> bool;

    /// Creates a new region described by `options`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if creation is unavailable.
    fn create(&mut self, options: &CreateOptions) -> Result<()>;

    /// Creates a new anonymous region of `size` bytes and maps it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if creation is unavailable.
    fn create_and_map_anonymous(&mut self, size: usize) -> Result<()>;

    /// Opens the existing region registered as `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if the named region namespace is unavailable.
    fn open(&mut self, name: &str, read_only: bool) -> Result<()>;

    /// Deletes the region registered as `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if the named region namespace is unavailable.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Maps `bytes` bytes of the region, starting at offset 0.
    ///
    /// # Errors
    /// See [`SharedMemory::map`].
    fn map(&mut self, bytes: usize) -> Result<()>;

    /// Releases the active mapping.
    ///
    /// # Errors
    /// See [`SharedMemory::unmap`].
    fn unmap(&mut self) -> Result<()>;

    /// Unmaps if mapped and releases the descriptor. Idempotent.
    fn close(&mut self);

    /// Acquires the advisory, process-wide exclusive lock over the whole region.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if locking is unavailable.
    fn lock(&mut self) -> Result<()>;

    /// Releases the lock acquired with [`SharedMemoryOps::lock`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if locking is unavailable.
    fn unlock(&mut self) -> Result<()>;

    /// Duplicates the descriptor into `process`'s descriptor table.
    ///
    /// When `close_self` is set, the source side is closed after a successful transfer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unsupported`] if descriptor transfer is unavailable.
    fn share_to_process_common(
        &mut self,
        process: ProcessId,
        close_self: bool,
    ) -> Result<SharedMemoryHandle>;
}

/// A shared memory region owning one descriptor and at most one mapping of it.
///
/// [`SharedMemory`] consumes a descriptor obtained elsewhere (inherited at process start, or
/// received over an IPC channel), maps it on request and closes it when the region is closed or
/// dropped. It cannot create, open, delete or transfer regions; those operations return
/// [`crate::Error::Unsupported`].
///
/// The descriptor is validated lazily: constructing from an invalid handle succeeds, and the
/// first [`SharedMemory::map`] reports [`crate::Error::InvalidHandle`].
///
/// # Examples
///
/// ```rust,no_run
/// use shmregion::{SharedMemory, SharedMemoryHandle};
///
/// let mut writer = SharedMemory::from_handle(SharedMemoryHandle::new(3), false);
/// writer.map(4096)?;
/// writer.write_le(0, 0xC0FFEE_u32)?;
///
/// // A second, read-only view of the same backing object
/// let mut reader = SharedMemory::from_handle(writer.handle().duplicate()?, true);
/// reader.map(4096)?;
/// assert_eq!(reader.read_le::<u32>(0)?, 0xC0FFEE);
/// # Ok::<(), shmregion::Error>(())
/// ```
#[derive(Debug)]
pub struct SharedMemory {
    /// Owned descriptor, [`SharedMemoryHandle::NULL`] when there is none
    descriptor: SharedMemoryHandle,
    /// Active mapping
    mapping: Option<Mapping>,
    /// Fixed at construction
    read_only: bool,
    /// Size requested by a creation path; creation is unavailable, so always 0
    created_size: usize,
    /// Set by `close`; terminal
    closed: bool,
}

impl SharedMemory {
    /// Creates a region without a descriptor.
    ///
    /// Such a region can never be mapped; it only becomes usable through a creation path, and
    /// none is available in this variant.
    pub fn new() -> SharedMemory {
        SharedMemory {
            descriptor: SharedMemoryHandle::NULL,
            mapping: None,
            read_only: false,
            created_size: 0,
            closed: false,
        }
    }

    /// Creates a region from a previously obtained handle.
    ///
    /// The region takes ownership of the descriptor and closes it on [`SharedMemory::close`] or
    /// drop. The handle is not validated and nothing is mapped yet.
    ///
    /// ## Arguments
    /// * 'handle'    - Descriptor of the backing object
    /// * 'read_only' - Map without write access, fixed for the lifetime of the region
    pub fn from_handle(handle: SharedMemoryHandle, read_only: bool) -> SharedMemory {
        SharedMemory {
            descriptor: handle,
            mapping: None,
            read_only,
            created_size: 0,
            closed: false,
        }
    }

    /// Returns `true` if `handle` names a descriptor (non-negative value).
    pub fn is_handle_valid(handle: &SharedMemoryHandle) -> bool {
        handle.is_valid()
    }

    /// The canonical invalid handle.
    pub fn null_handle() -> SharedMemoryHandle {
        SharedMemoryHandle::NULL
    }

    /// Closes `handle` unconditionally, logging if `close(2)` fails.
    ///
    /// The caller guarantees `handle` is valid and not owned by a live region. Passing an
    /// invalid handle is a programming error and trips a debug assertion.
    pub fn close_handle(handle: SharedMemoryHandle) {
        handle::close_handle(handle);
    }

    /// Creates a new anonymous region of `size` bytes.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`]: this execution context cannot mint
    /// descriptors.
    pub fn create_anonymous(&mut self, _size: usize) -> Result<()> {
        Err(unsupported_error!(Capability::CreateAnonymous))
    }

    /// Creates a named region of `size` bytes, reusing an existing one if `open_existing`.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`].
    pub fn create_named(
        &mut self,
        _name: &str,
        _open_existing: bool,
        _size: usize,
    ) -> Result<()> {
        Err(unsupported_error!(Capability::CreateNamed))
    }

    /// Maps `bytes` bytes of the descriptor from offset 0.
    ///
    /// The mapping is shared: writes through it are visible to every other mapping of the same
    /// backing object. It is writable unless the region is read-only.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidHandle`] if the region holds no valid descriptor or is closed
    /// - [`crate::Error::AlreadyMapped`] if a mapping is active; it stays untouched
    /// - [`crate::Error::InvalidSize`] if `bytes` is 0
    /// - [`crate::Error::MapFailed`] if `mmap` fails; the region stays unmapped and can retry
    pub fn map(&mut self, bytes: usize) -> Result<()> {
        if self.closed || !self.descriptor.is_valid() {
            return Err(InvalidHandle);
        }

        if self.mapping.is_some() {
            return Err(AlreadyMapped);
        }

        if bytes == 0 {
            return Err(InvalidSize);
        }

        match Mapping::new(self.descriptor.fd(), bytes, self.read_only) {
            Ok(mapping) => {
                log::trace!(
                    "mapped {} bytes of fd {} at {:p} (read_only: {})",
                    bytes,
                    self.descriptor.fd(),
                    mapping.as_ptr(),
                    self.read_only
                );
                self.mapping = Some(mapping);
                Ok(())
            }
            Err(error) => {
                log::warn!(
                    "mapping {} bytes of fd {} failed: {}",
                    bytes,
                    self.descriptor.fd(),
                    error
                );
                self.mapping = None;
                Err(error)
            }
        }
    }

    /// Releases the active mapping.
    ///
    /// This gives up the region's claim on the mapping. Bookkeeping is reset unconditionally;
    /// the release of the address range itself is best effort and not reported.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`] if there is no active mapping.
    pub fn unmap(&mut self) -> Result<()> {
        let Some(mapping) = self.mapping.take() else {
            return Err(NotMapped);
        };

        log::trace!(
            "unmapping {} bytes at {:p}",
            mapping.len(),
            mapping.as_ptr()
        );
        drop(mapping);
        Ok(())
    }

    /// Non-owning view of the current descriptor.
    ///
    /// The view cannot close the descriptor and cannot outlive the region.
    pub fn handle(&self) -> BorrowedHandle<'_> {
        BorrowedHandle::new(self.descriptor)
    }

    /// Unmaps the region and hands ownership of the descriptor to the caller.
    ///
    /// Afterwards the region holds no descriptor; closing or dropping it does not close the
    /// returned handle.
    pub fn take_handle(&mut self) -> SharedMemoryHandle {
        let _ = self.unmap();
        std::mem::replace(&mut self.descriptor, SharedMemoryHandle::NULL)
    }

    /// Unmaps the region if mapped and closes its descriptor.
    ///
    /// Descriptor 0 is treated as never opened: the region lets go of it without closing it.
    /// Safe to call any number of times; only the first call has an effect. Failures are
    /// logged and otherwise ignored, since there is nothing a caller could retry.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let _ = self.unmap();

        // Descriptor 0 is never owned by a region
        if self.descriptor.fd() > 0 {
            log::trace!("closing fd {}", self.descriptor.fd());
            handle::close_handle(self.descriptor);
        }
        self.descriptor = SharedMemoryHandle::NULL;
    }

    /// Acquires the advisory whole-region lock.
    ///
    /// A complete implementation serializes independent mappers of the same backing object
    /// through this lock. This variant provides no such lock.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`].
    pub fn lock(&mut self) -> Result<()> {
        log::error!("lock() called on a region without locking support");
        Err(crate::Error::Unsupported(Capability::Lock))
    }

    /// Releases the advisory whole-region lock.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`].
    pub fn unlock(&mut self) -> Result<()> {
        log::error!("unlock() called on a region without locking support");
        Err(crate::Error::Unsupported(Capability::Unlock))
    }

    /// Duplicates the descriptor into `process`, keeping this region open.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`].
    pub fn share_to_process(&mut self, process: ProcessId) -> Result<SharedMemoryHandle> {
        self.share_to_process_common(process, false)
    }

    /// Duplicates the descriptor into `process` and closes this region on success.
    ///
    /// # Errors
    /// Always returns [`crate::Error::Unsupported`]; the region is left open.
    pub fn give_to_process(&mut self, process: ProcessId) -> Result<SharedMemoryHandle> {
        self.share_to_process_common(process, true)
    }

    /// Flushes outstanding writes of the mapping to the backing object.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`] or [`crate::Error::Io`] if `msync` fails.
    pub fn flush(&self) -> Result<()> {
        self.mapping.active()?.flush()
    }

    /// The mapped bytes, `None` while unmapped.
    pub fn memory(&self) -> Option<&[u8]> {
        self.mapping.as_ref().map(Mapping::data)
    }

    /// The mapped bytes for writing.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`] or [`crate::Error::ReadOnly`].
    pub fn memory_mut(&mut self) -> Result<&mut [u8]> {
        self.mapping.active_mut()?.data_mut()
    }

    /// Returns `len` mapped bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`] or [`crate::Error::OutOfBounds`].
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.mapping.active()?.data_slice(offset, len)
    }

    /// Copies `bytes` into the mapping at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`], [`crate::Error::ReadOnly`] or
    /// [`crate::Error::OutOfBounds`]; nothing is written on error.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let data = self.memory_mut()?;
        let Some(offset_end) = offset.checked_add(bytes.len()) else {
            return Err(crate::Error::OutOfBounds);
        };

        if offset_end > data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        data[offset..offset_end].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads a little-endian `T` at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`] or [`crate::Error::OutOfBounds`].
    pub fn read_le<T: RegionIO>(&self, offset: usize) -> Result<T> {
        let mut offset = offset;
        io::read_le_at(self.mapping.active()?.data(), &mut offset)
    }

    /// Writes `value` little-endian at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotMapped`], [`crate::Error::ReadOnly`] or
    /// [`crate::Error::OutOfBounds`].
    pub fn write_le<T: RegionIO>(&mut self, offset: usize, value: T) -> Result<()> {
        let mut offset = offset;
        io::write_le_at(self.memory_mut()?, &mut offset, value)
    }

    /// Length of the active mapping, 0 while unmapped.
    pub fn mapped_size(&self) -> usize {
        self.mapping.as_ref().map_or(0, Mapping::len)
    }

    /// Size requested when the region was created; 0 for regions built from a handle.
    pub fn requested_size(&self) -> usize {
        self.created_size
    }

    /// Returns `true` if the region was constructed read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns `true` while a mapping is active.
    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    /// Returns `true` once [`SharedMemory::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for SharedMemory {
    fn default() -> Self {
        SharedMemory::new()
    }
}

impl Drop for SharedMemory {
    fn drop(&mut self) {
        self.close();
    }
}

impl SharedMemoryOps for SharedMemory {
    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    fn create(&mut self, _options: &CreateOptions) -> Result<()> {
        Err(unsupported_error!(Capability::Create))
    }

    fn create_and_map_anonymous(&mut self, _size: usize) -> Result<()> {
        Err(unsupported_error!(Capability::CreateAndMapAnonymous))
    }

    fn open(&mut self, _name: &str, _read_only: bool) -> Result<()> {
        Err(unsupported_error!(Capability::Open))
    }

    fn delete(&mut self, _name: &str) -> Result<()> {
        Err(unsupported_error!(Capability::Delete))
    }

    fn map(&mut self, bytes: usize) -> Result<()> {
        SharedMemory::map(self, bytes)
    }

    fn unmap(&mut self) -> Result<()> {
        SharedMemory::unmap(self)
    }

    fn close(&mut self) {
        SharedMemory::close(self);
    }

    fn lock(&mut self) -> Result<()> {
        SharedMemory::lock(self)
    }

    fn unlock(&mut self) -> Result<()> {
        SharedMemory::unlock(self)
    }

    fn share_to_process_common(
        &mut self,
        _process: ProcessId,
        _close_self: bool,
    ) -> Result<SharedMemoryHandle> {
        Err(unsupported_error!(Capability::ShareToProcess))
    }
}

#[cfg(test)]
mod tests {
    use std::os::fd::IntoRawFd;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::Error;

    fn backing(len: u64) -> SharedMemoryHandle {
        let file = tempfile::tempfile().unwrap();
        file.set_len(len).unwrap();
        SharedMemoryHandle::new(file.into_raw_fd())
    }

    #[test]
    fn empty_region_never_maps() {
        let mut region = SharedMemory::new();

        assert!(matches!(region.map(4096), Err(Error::InvalidHandle)));
        assert!(region.memory().is_none());
        assert_eq!(region.mapped_size(), 0);
        assert!(!region.is_read_only());
        assert!(!region.handle().is_valid());
    }

    #[test]
    fn invalid_handle_never_maps() {
        let mut region = SharedMemory::from_handle(SharedMemory::null_handle(), false);
        assert!(matches!(region.map(1), Err(Error::InvalidHandle)));
        assert!(!region.is_mapped());
    }

    #[test]
    fn map_and_unmap() {
        let mut region = SharedMemory::from_handle(backing(8192), false);

        region.map(8192).unwrap();
        assert!(region.is_mapped());
        assert_eq!(region.mapped_size(), 8192);
        assert_eq!(region.memory().unwrap().len(), 8192);

        region.unmap().unwrap();
        assert!(region.memory().is_none());
        assert_eq!(region.mapped_size(), 0);
        assert!(matches!(region.unmap(), Err(Error::NotMapped)));
    }

    #[test]
    fn unmap_never_mapped() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        assert!(matches!(region.unmap(), Err(Error::NotMapped)));
        assert!(region.handle().is_valid());
    }

    #[test]
    fn map_twice_keeps_first_mapping() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        region.map(4096).unwrap();
        region.write_at(0, &[1, 2, 3]).unwrap();
        let base = region.memory().unwrap().as_ptr();

        assert!(matches!(region.map(2048), Err(Error::AlreadyMapped)));
        assert_eq!(region.mapped_size(), 4096);
        assert_eq!(region.memory().unwrap().as_ptr(), base);
        assert_eq!(region.data_slice(0, 3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn zero_length_map() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        assert!(matches!(region.map(0), Err(Error::InvalidSize)));
        assert!(!region.is_mapped());
    }

    #[test]
    fn failed_map_allows_retry() {
        let mut region = SharedMemory::from_handle(backing(4096), false);

        assert!(matches!(region.map(usize::MAX), Err(Error::MapFailed(_))));
        assert!(region.memory().is_none());
        assert_eq!(region.mapped_size(), 0);

        region.map(4096).unwrap();
        assert_eq!(region.mapped_size(), 4096);
    }

    #[test]
    fn close_is_idempotent() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        region.map(4096).unwrap();

        region.close();
        assert!(region.is_closed());
        assert!(!region.is_mapped());
        assert!(!region.handle().is_valid());

        region.close();
        assert!(region.is_closed());
        assert!(!region.handle().is_valid());
        assert!(matches!(region.map(4096), Err(Error::InvalidHandle)));
    }

    #[test]
    fn close_empty_region() {
        let mut region = SharedMemory::default();
        region.close();
        region.close();
        assert!(region.is_closed());
    }

    #[test]
    fn take_handle_releases_ownership() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        region.map(4096).unwrap();

        let handle = region.take_handle();
        assert!(handle.is_valid());
        assert!(!region.is_mapped());
        assert!(!region.handle().is_valid());

        region.close();
        // Still open: the region no longer owned it
        assert!(unsafe { libc::fcntl(handle.fd(), libc::F_GETFD) } != -1);
        SharedMemory::close_handle(handle);
    }

    #[test]
    fn read_only_region() {
        let mut region = SharedMemory::from_handle(backing(4096), true);
        region.map(4096).unwrap();

        assert!(region.is_read_only());
        assert!(matches!(region.memory_mut(), Err(Error::ReadOnly)));
        assert!(matches!(region.write_at(0, &[1]), Err(Error::ReadOnly)));
        assert!(matches!(region.write_le(0, 1_u8), Err(Error::ReadOnly)));
        assert_eq!(region.read_le::<u64>(0).unwrap(), 0);
    }

    #[test]
    fn accessors_require_mapping() {
        let mut region = SharedMemory::from_handle(backing(4096), false);

        assert!(matches!(region.data_slice(0, 1), Err(Error::NotMapped)));
        assert!(matches!(region.memory_mut(), Err(Error::NotMapped)));
        assert!(matches!(region.read_le::<u32>(0), Err(Error::NotMapped)));
        assert!(matches!(region.write_at(0, &[0]), Err(Error::NotMapped)));
        assert!(matches!(region.flush(), Err(Error::NotMapped)));
    }

    #[test]
    fn typed_access_and_bounds() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        region.map(16).unwrap();

        region.write_le(8, 0x1122_3344_5566_7788_u64).unwrap();
        assert_eq!(region.read_le::<u64>(8).unwrap(), 0x1122_3344_5566_7788);
        assert_eq!(region.data_slice(8, 1).unwrap(), &[0x88]);

        assert!(matches!(region.write_le(9, 0_u64), Err(Error::OutOfBounds)));
        assert!(matches!(region.write_at(15, &[0, 0]), Err(Error::OutOfBounds)));
        assert!(matches!(
            region.write_at(usize::MAX, &[0]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(region.read_le::<u32>(13), Err(Error::OutOfBounds)));
        region.flush().unwrap();
    }

    #[test]
    fn creation_family_is_unsupported() {
        let mut region = SharedMemory::new();
        let options = CreateOptions::anonymous(4096).with_name("region");

        assert!(matches!(
            region.create(&options),
            Err(Error::Unsupported(Capability::Create))
        ));
        assert!(matches!(
            region.create_anonymous(4096),
            Err(Error::Unsupported(Capability::CreateAnonymous))
        ));
        assert!(matches!(
            region.create_and_map_anonymous(4096),
            Err(Error::Unsupported(Capability::CreateAndMapAnonymous))
        ));
        assert!(matches!(
            region.create_named("region", true, 4096),
            Err(Error::Unsupported(Capability::CreateNamed))
        ));
        assert!(matches!(
            region.open("region", false),
            Err(Error::Unsupported(Capability::Open))
        ));
        assert!(matches!(
            region.delete("region"),
            Err(Error::Unsupported(Capability::Delete))
        ));

        assert!(!region.handle().is_valid());
        assert!(!region.is_mapped());
        assert_eq!(region.requested_size(), 0);
    }

    #[test]
    fn sharing_and_locking_are_unsupported() {
        let mut region = SharedMemory::from_handle(backing(4096), false);
        region.map(4096).unwrap();
        let before = region.handle().to_handle();

        assert!(matches!(
            region.share_to_process(ProcessId::current()),
            Err(Error::Unsupported(Capability::ShareToProcess))
        ));
        assert!(matches!(
            region.give_to_process(ProcessId::current()),
            Err(Error::Unsupported(Capability::ShareToProcess))
        ));
        assert!(matches!(
            region.lock(),
            Err(Error::Unsupported(Capability::Lock))
        ));
        assert!(matches!(
            region.unlock(),
            Err(Error::Unsupported(Capability::Unlock))
        ));

        assert!(!region.is_closed());
        assert!(region.is_mapped());
        assert_eq!(region.handle().to_handle(), before);
    }

    #[test]
    fn no_capability_is_supported() {
        let region = SharedMemory::new();
        assert!(Capability::iter().all(|capability| !region.supports(capability)));
    }

    #[test]
    fn trait_object_dispatch() {
        let mut region: Box<dyn SharedMemoryOps> =
            Box::new(SharedMemory::from_handle(backing(4096), false));

        region.map(4096).unwrap();
        region.unmap().unwrap();
        assert!(matches!(region.unmap(), Err(Error::NotMapped)));
        region.close();
        assert!(matches!(region.map(4096), Err(Error::InvalidHandle)));
    }

    #[test]
    fn static_handle_utilities() {
        assert!(!SharedMemory::is_handle_valid(&SharedMemory::null_handle()));
        assert!(SharedMemory::is_handle_valid(&SharedMemoryHandle::new(0)));
    }
}
