// src/provider/mod.rs
// =============================================================================
// This module defines the narrow capability the rest of the tool needs from
// a remote repository host: "list the entries under a path" and "give me the
// raw bytes of the file at a path".
//
// The walker and serializer only ever talk to the ContentProvider trait, so
// tests can swap in an in-memory tree and the real GitHub client lives in
// src/github/.
//
// Rust concepts:
// - Traits: Shared behaviour that several types can implement
// - async-trait: Lets trait methods be async
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

/// Whether an entry is a directory (expandable) or a file (fetchable).
///
/// Anything the host reports that is not a directory (symlinks, submodules)
/// is treated as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One node of the remote tree, as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Slash-separated path relative to the repository root (e.g. "src/a.py")
    pub path: String,
    /// Last path segment (e.g. "a.py")
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

// Shorthand constructors for building trees in tests
#[cfg(test)]
impl Entry {
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    // The name is always the last segment of the path
    fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name, kind }
    }
}

/// Everything that can go wrong when talking to the repository host.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("unexpected HTTP {status} for '{path}': {message}")]
    Status {
        status: u16,
        path: String,
        message: String,
    },

    #[error("unexpected response for '{path}': {message}")]
    InvalidResponse { path: String, message: String },
}

/// The remote capability the traversal and serialization depend on.
///
/// Implementations are bound to one repository; paths are relative to its
/// root and "" means the root itself.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// List the entries directly under `path`, in the host's order
    async fn list_directory(&self, path: &str) -> Result<Vec<Entry>, ProviderError>;

    /// Fetch the raw, undecoded bytes of the file at `path`
    async fn fetch_file_bytes(&self, path: &str) -> Result<Vec<u8>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_is_last_segment() {
        let entry = Entry::file("src/nested/lib.rs");
        assert_eq!(entry.name, "lib.rs");
        assert!(!entry.is_dir());

        let dir = Entry::directory("docs");
        assert_eq!(dir.name, "docs");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_error_messages() {
        let err = ProviderError::NotFound("README.md".to_string());
        assert_eq!(err.to_string(), "not found: README.md");

        let err = ProviderError::Status {
            status: 500,
            path: "src".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected HTTP 500 for 'src': boom");
    }
}
