use strum::{Display, EnumCount, EnumIter};

/// Operations of the shared memory interface that depend on a capability outside the region.
///
/// Every variant names one entry point of [`crate::SharedMemoryOps`] that needs something the
/// region itself cannot provide: an authority able to mint new descriptors, a namespace of named
/// regions, a channel for passing descriptors between processes, or an advisory lock over the
/// backing store. Implementations report which of them they support through
/// [`crate::SharedMemoryOps::supports`], and refuse the rest with
/// [`crate::Error::Unsupported`] carrying the matching variant.
///
/// ## Capability Groups
///
/// ### Creation
/// - **`Create`**: Create a region from [`crate::CreateOptions`]
/// - **`CreateAnonymous`**: Create an unnamed region of a given size
/// - **`CreateAndMapAnonymous`**: Create an unnamed region and map it in one step
/// - **`CreateNamed`**: Create (or reuse) a region registered under a name
///
/// ### Named Region Namespace
/// - **`Open`**: Open an existing named region
/// - **`Delete`**: Remove a named region
///
/// ### Transfer
/// - **`ShareToProcess`**: Duplicate the descriptor into another process
///
/// ### Locking
/// - **`Lock`** / **`Unlock`**: Advisory, process-wide exclusive lock over the whole region
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
pub enum Capability {
    /// Create a region from a full set of creation options.
    Create,
    /// Create an anonymous region of a given size.
    CreateAnonymous,
    /// Create an anonymous region and map it immediately.
    CreateAndMapAnonymous,
    /// Create a named region, optionally reusing an existing one.
    CreateNamed,
    /// Open an existing named region.
    Open,
    /// Delete a named region.
    Delete,
    /// Duplicate the descriptor into another process's descriptor table.
    ShareToProcess,
    /// Acquire the advisory whole-region lock.
    Lock,
    /// Release the advisory whole-region lock.
    Unlock,
}
