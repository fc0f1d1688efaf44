// src/serialize/mod.rs
// =============================================================================
// This module turns repository content into text.
//
// Submodules:
// - block: One text block per file (text, binary-skipped or error-skipped)
// - readme: README.md with a fixed fallback
//
// Rust concepts:
// - pub use: Re-export items so callers write `serialize::fetch_readme()`
//   instead of `serialize::readme::fetch_readme()`
// =============================================================================

mod block;
mod readme;

pub use block::{serialize_files, BlockContent, SerializedBlock};
pub use readme::fetch_readme;
