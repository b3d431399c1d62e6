use std::os::fd::RawFd;

use memmap2::{Mmap, MmapMut, MmapOptions};

use crate::{
    Error::{MapFailed, NotMapped, OutOfBounds, ReadOnly},
    Result,
};

/// A single shared mapping of a descriptor, starting at offset 0.
///
/// Both variants are `MAP_SHARED`, so writes through a read-write mapping are visible to every
/// other mapping of the same backing object. A read-only mapping is created without
/// `PROT_WRITE`; the protection is enforced by the OS, not by this type. Dropping a `Mapping`
/// releases it.
#[derive(Debug)]
pub(crate) enum Mapping {
    /// `PROT_READ`
    ReadOnly(Mmap),
    /// `PROT_READ | PROT_WRITE`
    ReadWrite(MmapMut),
}

impl Mapping {
    /// Maps `len` bytes of `fd` from offset 0.
    ///
    /// ## Arguments
    /// * 'fd'        - Descriptor of the backing object, must be valid
    /// * 'len'       - Number of bytes to map, must be non-zero
    /// * 'read_only' - Omit `PROT_WRITE`
    ///
    /// # Errors
    /// Returns [`crate::Error::MapFailed`] with the OS error if `mmap` fails.
    pub(crate) fn new(fd: RawFd, len: usize, read_only: bool) -> Result<Mapping> {
        let mut options = MmapOptions::new();
        options.len(len);

        // SAFETY: the mapping is shared with other mappers by design; its contents may change
        // underneath us, which is why access only goes through byte slices.
        let mapping = if read_only {
            unsafe { options.map(fd) }.map(Mapping::ReadOnly)
        } else {
            unsafe { options.map_mut(fd) }.map(Mapping::ReadWrite)
        };

        mapping.map_err(MapFailed)
    }

    pub(crate) fn len(&self) -> usize {
        self.data().len()
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.data().as_ptr()
    }

    pub(crate) fn data(&self) -> &[u8] {
        match self {
            Mapping::ReadOnly(map) => map.as_ref(),
            Mapping::ReadWrite(map) => map.as_ref(),
        }
    }

    pub(crate) fn data_mut(&mut self) -> Result<&mut [u8]> {
        match self {
            Mapping::ReadOnly(_) => Err(ReadOnly),
            Mapping::ReadWrite(map) => Ok(map.as_mut()),
        }
    }

    pub(crate) fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data()[offset..offset_end])
    }

    /// Flushes outstanding writes with `msync`; read-only mappings have none.
    pub(crate) fn flush(&self) -> Result<()> {
        match self {
            Mapping::ReadOnly(_) => Ok(()),
            Mapping::ReadWrite(map) => Ok(map.flush()?),
        }
    }
}

/// Extension for `Option<Mapping>` as held by a region.
pub(crate) trait MappingState {
    fn active(&self) -> Result<&Mapping>;
    fn active_mut(&mut self) -> Result<&mut Mapping>;
}

impl MappingState for Option<Mapping> {
    fn active(&self) -> Result<&Mapping> {
        self.as_ref().ok_or(NotMapped)
    }

    fn active_mut(&mut self) -> Result<&mut Mapping> {
        self.as_mut().ok_or(NotMapped)
    }
}

#[cfg(test)]
mod tests {
    use std::os::fd::AsRawFd;

    use super::*;

    fn backing(len: u64) -> std::fs::File {
        let file = tempfile::tempfile().unwrap();
        file.set_len(len).unwrap();
        file
    }

    #[test]
    fn read_write_mapping() {
        let file = backing(4096);
        let mut mapping = Mapping::new(file.as_raw_fd(), 4096, false).unwrap();

        assert_eq!(mapping.len(), 4096);
        assert!(!mapping.as_ptr().is_null());

        mapping.data_mut().unwrap()[10..14].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(mapping.data_slice(10, 4).unwrap(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        mapping.flush().unwrap();
    }

    #[test]
    fn read_only_mapping_refuses_mut() {
        let file = backing(4096);
        let mut mapping = Mapping::new(file.as_raw_fd(), 4096, true).unwrap();

        assert!(matches!(mapping.data_mut(), Err(ReadOnly)));
        assert!(mapping.data().iter().all(|&b| b == 0));
        mapping.flush().unwrap();
    }

    #[test]
    fn bad_descriptor_fails() {
        let result = Mapping::new(-1, 4096, false);
        match result {
            Err(MapFailed(io_error)) => assert_eq!(io_error.raw_os_error(), Some(libc::EBADF)),
            _ => panic!("Expected MapFailed"),
        }
    }

    #[test]
    fn data_slice_bounds() {
        let file = backing(4096);
        let mapping = Mapping::new(file.as_raw_fd(), 4096, true).unwrap();

        assert!(matches!(mapping.data_slice(usize::MAX, 1), Err(OutOfBounds)));
        assert!(matches!(mapping.data_slice(4096, 1), Err(OutOfBounds)));
        assert!(matches!(mapping.data_slice(4095, 2), Err(OutOfBounds)));
        assert_eq!(mapping.data_slice(4095, 1).unwrap().len(), 1);
        assert_eq!(mapping.data_slice(4096, 0).unwrap().len(), 0);
    }

    #[test]
    fn mapping_state() {
        let mut state: Option<Mapping> = None;
        assert!(matches!(state.active(), Err(NotMapped)));
        assert!(matches!(state.active_mut(), Err(NotMapped)));

        let file = backing(4096);
        state = Some(Mapping::new(file.as_raw_fd(), 4096, false).unwrap());
        assert_eq!(state.active().unwrap().len(), 4096);
    }
}
