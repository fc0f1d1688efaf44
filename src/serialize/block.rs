// src/serialize/block.rs
// =============================================================================
// This module turns each discovered file into a text block:
//
//   File: /src/a.py
//   Content:
//   print(1)
//   <blank line>
//
// Per file:
// - Fetch the raw bytes
// - Valid UTF-8 → the decoded text goes into the document
// - Anything else → "Content: Skipped binary file"
// - Fetch failed → "Content: Skipped due to error: ..." and move on
//
// A failing file never stops the rest of the files from being processed.
//
// Rust concepts:
// - Enums with data: BlockContent carries the text or the error message
// - String::from_utf8: Strict UTF-8 check that hands the bytes back on failure
// =============================================================================

use crate::provider::ContentProvider;
use crate::walk::WalkedFile;
use indicatif::ProgressBar;
use tracing::{debug, warn};

/// What ended up in a block after fetching and classifying a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// Valid UTF-8, decoded
    Text(String),
    /// Failed the UTF-8 check
    Binary,
    /// The fetch itself failed; holds the error message
    Error(String),
}

/// The rendered record for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedBlock {
    pub path: String,
    pub content: BlockContent,
}

impl SerializedBlock {
    // Header, body, blank separator. Each item becomes one '\n'-terminated
    // segment of the document.
    pub fn lines(&self) -> [String; 3] {
        let body = match &self.content {
            BlockContent::Text(text) => format!("Content:\n{}", text),
            BlockContent::Binary => "Content: Skipped binary file".to_string(),
            BlockContent::Error(message) => format!("Content: Skipped due to error: {}", message),
        };
        [format!("File: {}", self.path), body, String::new()]
    }
}

/// Strict UTF-8 decode: success is text, failure is binary.
///
/// This is a heuristic; a binary format that happens to be valid UTF-8 is
/// treated as text.
pub fn classify(bytes: Vec<u8>) -> BlockContent {
    match String::from_utf8(bytes) {
        Ok(text) => BlockContent::Text(text),
        Err(_) => BlockContent::Binary,
    }
}

pub async fn serialize_file<P: ContentProvider + ?Sized>(
    provider: &P,
    file: &WalkedFile,
) -> SerializedBlock {
    let content = match provider.fetch_file_bytes(&file.entry.path).await {
        Ok(bytes) => classify(bytes),
        Err(e) => {
            warn!(path = %file.entry.path, error = %e, "skipping file after fetch error");
            BlockContent::Error(e.to_string())
        }
    };

    if content == BlockContent::Binary {
        debug!(path = %file.entry.path, "skipping binary file");
    }

    SerializedBlock {
        path: file.display_path.clone(),
        content,
    }
}

// Serializes files one after another, in the order given
//
// Sequential on purpose: it keeps API usage predictable for rate limits.
pub async fn serialize_files<P: ContentProvider + ?Sized>(
    provider: &P,
    files: &[WalkedFile],
    progress: &ProgressBar,
) -> Vec<SerializedBlock> {
    let mut blocks = Vec::with_capacity(files.len());
    for file in files {
        progress.set_message(format!("Downloading {}", file.display_path));
        blocks.push(serialize_file(provider, file).await);
        progress.tick();
    }
    blocks
}
