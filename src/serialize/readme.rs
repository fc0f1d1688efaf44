// src/serialize/readme.rs
// Fetches README.md from the repository root. Any failure (missing file,
// not UTF-8, network) falls back to a fixed text; no retry.

use crate::provider::ContentProvider;
use tracing::warn;

pub const README_PATH: &str = "README.md";
pub const README_FALLBACK: &str = "README not found.";

pub async fn fetch_readme<P: ContentProvider + ?Sized>(provider: &P) -> String {
    let bytes = match provider.fetch_file_bytes(README_PATH).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "could not fetch README");
            return README_FALLBACK.to_string();
        }
    };

    String::from_utf8(bytes).unwrap_or_else(|_| {
        warn!("README is not valid UTF-8");
        README_FALLBACK.to_string()
    })
}
