//! # shmregion Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the shmregion library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all shmregion operations
pub use crate::Error;

/// The result type used throughout shmregion
pub use crate::Result;

// ================================================================================================
// Regions
// ================================================================================================

/// The shared memory region and its capability-checked operation set
pub use crate::region::{SharedMemory, SharedMemoryOps};

/// Descriptor handles consumed and handed out by regions
pub use crate::region::{BorrowedHandle, SharedMemoryHandle};

/// Creation requests and capability names
pub use crate::region::{Capability, CreateOptions, ProcessId};

// ================================================================================================
// Typed Access
// ================================================================================================

/// Primitive types storable in a mapping
pub use crate::io::RegionIO;
