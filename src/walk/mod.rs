// src/walk/mod.rs
// =============================================================================
// This module handles repository traversal.
//
// Features:
// - Depth-first walk driven by an explicit stack (no recursion)
// - Each directory is listed at most once
// - Path-prefix exclusions, checked before anything is listed or fetched
//
// Rust concepts:
// - Modules: stack.rs holds the walker, this file holds the exclude rules
// - Collections: HashSet for visited directories, Vec as a stack
// =============================================================================

mod stack;

// Re-export the walker and its results
pub use stack::{TreeWalker, WalkedFile};

/// Path prefixes to leave out of the document.
///
/// Matching is a plain string-prefix test on the provider path, so "src"
/// excludes "src/main.rs" and also "srcfoo".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    prefixes: Vec<String>,
}

impl ExcludeSet {
    // Empty prefixes are dropped: "" would match every path
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
