//! External collaborators the simulation consumes.
//!
//! Texture loading and GPU memory live outside this crate. The simulation
//! only needs a path-to-handle resolver and a byte sink for instance records.
//! The in-memory implementations here serve tests and headless hosts.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque texture handle issued by a [`TextureResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Get the raw handle value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps texture file paths to handles.
pub trait TextureResolver {
    /// Handle for `path`, loading it on first request.
    fn resolve(&mut self, path: &str) -> TextureHandle;
}

/// Resolver that hands out sequential handles and remembers each path.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    handles: HashMap<String, TextureHandle>,
}

impl TextureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for an already registered path.
    pub fn get(&self, path: &str) -> Option<TextureHandle> {
        self.handles.get(path).copied()
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl TextureResolver for TextureRegistry {
    fn resolve(&mut self, path: &str) -> TextureHandle {
        if let Some(handle) = self.handles.get(path) {
            return *handle;
        }
        let handle = TextureHandle(self.handles.len() as u32);
        debug!("Registered texture {} as handle {}", path, handle);
        self.handles.insert(path.to_string(), handle);
        handle
    }
}

/// A writable GPU-visible memory region.
pub trait GpuBuffer {
    /// Size in bytes.
    fn size(&self) -> usize;

    /// Mapped bytes.
    fn as_bytes_mut(&mut self) -> &mut [u8];
}

/// Allocates GPU-visible buffers.
pub trait BufferAllocator {
    /// Buffer type produced.
    type Buffer: GpuBuffer;

    /// Allocate `size` bytes.
    fn allocate(&mut self, size: usize) -> Result<Self::Buffer>;
}

/// Heap-backed buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBuffer {
    data: Vec<u8>,
}

impl HostBuffer {
    /// Zero-filled buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl GpuBuffer for HostBuffer {
    #[inline]
    fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Allocator producing [`HostBuffer`]s, with an optional total budget.
#[derive(Debug, Clone, Default)]
pub struct HostAllocator {
    budget: Option<usize>,
    allocated: usize,
}

impl HostAllocator {
    /// Unbounded allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator that fails once `budget` bytes have been handed out.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            allocated: 0,
        }
    }

    /// Bytes handed out so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl BufferAllocator for HostAllocator {
    type Buffer = HostBuffer;

    fn allocate(&mut self, size: usize) -> Result<HostBuffer> {
        if size == 0 {
            return Err(Error::Allocation {
                requested: size,
                reason: "zero-sized buffer".into(),
            });
        }
        if let Some(budget) = self.budget {
            let remaining = budget.saturating_sub(self.allocated);
            if size > remaining {
                return Err(Error::Allocation {
                    requested: size,
                    reason: format!("only {} bytes left in budget", remaining),
                });
            }
        }
        self.allocated += size;
        Ok(HostBuffer::new(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_reuses_handles() {
        let mut textures = TextureRegistry::new();
        let a = textures.resolve("circle.png");
        let b = textures.resolve("uvChecker.png");
        assert_ne!(a, b);
        assert_eq!(textures.resolve("circle.png"), a);
        assert_eq!(textures.len(), 2);
        assert_eq!(textures.get("uvChecker.png"), Some(b));
        assert_eq!(textures.get("missing.png"), None);
    }

    #[test]
    fn test_allocator_budget() {
        let mut alloc = HostAllocator::with_budget(128);
        let buf = alloc.allocate(100).unwrap();
        assert_eq!(buf.size(), 100);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));

        let err = alloc.allocate(64).unwrap_err();
        assert!(matches!(err, Error::Allocation { requested: 64, .. }));
        assert_eq!(alloc.allocated(), 100);
    }

    #[test]
    fn test_zero_sized_allocation_fails() {
        assert!(HostAllocator::new().allocate(0).is_err());
    }
}
