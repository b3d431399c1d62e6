// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![cfg(unix)]
#![doc(html_no_source)]
#![deny(missing_docs)]
// - 'region/mapping.rs' uses mmap to map a descriptor into memory
// - 'region/handle.rs' calls dup(2) and close(2) on raw descriptors

//! # shmregion
//!
//! Shared memory regions that own a descriptor received from elsewhere, map it into the
//! process on request, and release both mapping and descriptor deterministically.
//!
//! ## Features
//!
//! - **Explicit lifecycle** - A region is either unmapped or mapped, open or closed; every
//!   transition is a method returning [`Result`]
//! - **Single ownership** - The region closes its descriptor exactly once, on
//!   [`SharedMemory::close`] or drop; [`SharedMemory::handle`] hands out a borrowed view only
//! - **Capability-checked interface** - [`SharedMemoryOps`] names the full operation set;
//!   operations this execution context cannot provide fail with [`Error::Unsupported`]
//! - **Bounds-checked access** - Byte and little-endian typed accessors over the mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shmregion::prelude::*;
//!
//! // Descriptor 3 was inherited from the parent process
//! let mut region = SharedMemory::from_handle(SharedMemoryHandle::new(3), false);
//! region.map(4096)?;
//!
//! region.write_le(0, 42_u32)?;
//! assert_eq!(region.read_le::<u32>(0)?, 42);
//!
//! region.close();
//! # Ok::<(), shmregion::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`region`] - [`SharedMemory`], handles, options and the [`SharedMemoryOps`] capability trait
//! - [`io`] - Endian-aware primitive reads and writes used by the typed accessors
//! - [`prelude`] - Re-exports of the commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Unsupported Capabilities
//!
//! Minting new regions, opening and deleting named regions, handing descriptors to other
//! processes and advisory locking all need a capability outside the region. [`SharedMemory`]
//! runs where none of them is granted, and says so:
//!
//! ```rust
//! use shmregion::{Capability, Error, SharedMemory, SharedMemoryOps};
//!
//! let mut region = SharedMemory::new();
//! assert!(!region.supports(Capability::CreateAndMapAnonymous));
//! assert!(matches!(
//!     region.create_and_map_anonymous(4096),
//!     Err(Error::Unsupported(Capability::CreateAndMapAnonymous))
//! ));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger. Failures that cannot
//! be reported to a caller, such as `close(2)` failing during teardown, are logged at `error`.

#[macro_use]
pub(crate) mod error;

/// Shared memory regions and their descriptor handles.
///
/// See [`region::SharedMemory`] for the lifecycle and [`region::SharedMemoryOps`] for the
/// capability-checked operation set.
pub mod region;

/// Endian-aware primitive reading and writing over mapped bytes.
pub mod io;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use shmregion::prelude::*;
///
/// let mut region = SharedMemory::from_handle(SharedMemoryHandle::new(3), true);
/// region.map(4096)?;
/// println!("first byte: {:#04x}", region.read_le::<u8>(0)?);
/// # Ok::<(), shmregion::Error>(())
/// ```
pub mod prelude;

/// `shmregion` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `shmregion` Error type
///
/// # Examples
///
/// ```rust
/// use shmregion::{Error, SharedMemory};
///
/// let mut region = SharedMemory::new();
/// match region.map(4096) {
///     Err(Error::InvalidHandle) => println!("nothing to map"),
///     Err(e) => println!("Error: {}", e),
///     Ok(()) => unreachable!(),
/// }
/// ```
pub use error::Error;

/// The shared memory region and its supporting types.
pub use region::{
    BorrowedHandle, Capability, CreateOptions, ProcessId, SharedMemory, SharedMemoryHandle,
    SharedMemoryOps,
};
