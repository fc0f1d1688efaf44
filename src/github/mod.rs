// src/github/mod.rs
// =============================================================================
// This module is the GitHub side of the tool.
//
// Currently implements:
// - A ContentProvider backed by the GitHub REST API "contents" endpoint
// - Token authentication for private repos and higher rate limits
//
// The rest of the program never sees HTTP or JSON; it only uses the
// ContentProvider trait from src/provider/.
// =============================================================================

mod fetch;

// Re-export the provider from fetch.rs
pub use fetch::GitHubProvider;
