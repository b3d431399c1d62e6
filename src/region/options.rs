/// Options for creating a new shared memory region.
///
/// Creation is delegated to an authority that may or may not exist in the current execution
/// context. The options describe the request in full regardless, so the same value can be handed
/// to any [`crate::SharedMemoryOps`] implementation.
///
/// # Examples
///
/// ```rust
/// use shmregion::CreateOptions;
///
/// let options = CreateOptions::default()
///     .with_name("frame-buffer")
///     .with_size(64 * 1024)
///     .with_open_existing(true);
///
/// assert_eq!(options.name.as_deref(), Some("frame-buffer"));
/// assert_eq!(options.size, 65536);
/// assert!(!options.executable);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Name of the region, `None` for an anonymous region
    pub name: Option<String>,

    /// Size of the region in bytes
    pub size: usize,

    /// Reuse a named region of the same name if one already exists, instead of failing
    pub open_existing: bool,

    /// Request that mappings of the region may be made executable
    pub executable: bool,

    /// Allow read-only copies of the handle to be handed out to other processes
    pub share_read_only: bool,
}

impl CreateOptions {
    /// Options for an anonymous region of `size` bytes.
    pub fn anonymous(size: usize) -> Self {
        CreateOptions {
            size,
            ..Default::default()
        }
    }

    /// Sets the region name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the region size in bytes.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets whether an existing named region may be reused.
    #[must_use]
    pub fn with_open_existing(mut self, open_existing: bool) -> Self {
        self.open_existing = open_existing;
        self
    }

    /// Sets whether mappings may be executable.
    #[must_use]
    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// Sets whether read-only handles may be shared.
    #[must_use]
    pub fn with_share_read_only(mut self, share_read_only: bool) -> Self {
        self.share_read_only = share_read_only;
        self
    }

    /// Returns `true` if no name was set.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }
}

/// Identifier of a process a descriptor could be shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub libc::pid_t);

impl ProcessId {
    /// The calling process.
    pub fn current() -> Self {
        ProcessId(std::process::id() as libc::pid_t)
    }
}
