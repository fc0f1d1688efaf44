// src/walk/stack.rs
// =============================================================================
// This module walks a repository tree with an explicit stack.
//
// How it works:
// 1. List the root directory and push it onto a stack
// 2. Pop a directory, go through its entries in the order the host gave them
// 3. Excluded entries are dropped (no structure line, no listing, no fetch)
// 4. Directories we haven't seen yet get a structure line, get listed, and
//    are pushed onto the stack
// 5. Files get a structure line and are remembered for serialization
// 6. Repeat until the stack is empty
//
// Why a stack instead of recursion?
// - Deep repositories can't blow the call stack
// - async recursion in Rust needs boxing; a loop doesn't
//
// Rust concepts:
// - HashSet: To track visited directories (O(1) lookup)
// - Vec as a stack: push() and pop() both work on the end
// - Generics with ?Sized: Works with both concrete providers and &dyn
// =============================================================================

use super::ExcludeSet;
use crate::provider::{ContentProvider, Entry};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::debug;

/// A file found during the walk, with the path used in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// "{parent display path}/{name}", e.g. "/src/a.py"
    pub display_path: String,
    pub entry: Entry,
}

/// Result of one traversal
#[derive(Debug, Default)]
pub struct Walk {
    /// One line per directory ("/src/") or file ("/src/a.py"), in walk order
    pub structure: Vec<String>,
    /// Every non-excluded file, in walk order
    pub files: Vec<WalkedFile>,
}

/// Depth-first walker over a ContentProvider
pub struct TreeWalker<'a, P: ContentProvider + ?Sized> {
    provider: &'a P,
    excludes: &'a ExcludeSet,
    progress: ProgressBar,
}

impl<'a, P: ContentProvider + ?Sized> TreeWalker<'a, P> {
    pub fn new(provider: &'a P, excludes: &'a ExcludeSet) -> Self {
        Self {
            provider,
            excludes,
            progress: ProgressBar::hidden(),
        }
    }

    /// Show the directory being processed on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    // Walks the whole tree
    //
    // Returns: the structure lines and the file list
    // Errors: the first directory listing that fails aborts the walk
    pub async fn walk(&self) -> Result<Walk> {
        let root = self.list("").await?;

        // Stack of (display path, already-fetched listing)
        let mut pending: Vec<(String, Vec<Entry>)> = vec![(String::new(), root)];

        // Keyed by provider path; a directory is marked when pushed so the
        // same directory can never be queued twice
        let mut visited: HashSet<String> = HashSet::from([String::new()]);

        let mut walk = Walk::default();

        while let Some((dir, entries)) = pending.pop() {
            self.progress.set_message(format!("Processing {}/", dir));

            for entry in entries {
                self.progress.tick();

                if self.excludes.is_excluded(&entry.path) {
                    debug!(path = %entry.path, "excluded");
                    continue;
                }

                let display_path = format!("{}/{}", dir, entry.name);

                if entry.is_dir() {
                    if !visited.insert(entry.path.clone()) {
                        debug!(path = %entry.path, "directory already visited");
                        continue;
                    }
                    walk.structure.push(format!("{}/", display_path));
                    let listing = self.list(&entry.path).await?;
                    pending.push((display_path, listing));
                } else {
                    walk.structure.push(display_path.clone());
                    walk.files.push(WalkedFile {
                        display_path,
                        entry,
                    });
                }
            }
        }

        debug!(
            lines = walk.structure.len(),
            files = walk.files.len(),
            directories = visited.len(),
            "walk finished"
        );
        Ok(walk)
    }

    async fn list(&self, path: &str) -> Result<Vec<Entry>> {
        debug!(path, "listing directory");
        self.provider
            .list_directory(path)
            .await
            .with_context(|| format!("Failed to list directory '/{}'", path))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does HashSet::insert return?
//    - true if the value was new, false if it was already there
//    - So `if !visited.insert(x)` means "skip if we've seen x before"
//      and marks it as seen in the same step
//
// 2. Why is the display path different from entry.path?
//    - entry.path is what the API understands ("src/a.py")
//    - display_path is what we print ("/src/a.py"), built from the parent
//
// 3. Why `P: ContentProvider + ?Sized`?
//    - By default generic types must have a known size at compile time
//    - ?Sized relaxes that so P can also be `dyn ContentProvider`
// -----------------------------------------------------------------------------
