// src/config.rs
// =============================================================================
// This module resolves everything the run needs before any network call:
// - The GitHub token (from the GITHUB_TOKEN environment variable)
// - The API base URL (GITHUB_API_URL, defaults to https://api.github.com)
// - Which repository to read (parsed from a URL or "owner/name")
//
// The token is resolved exactly once at startup and handed to the pipeline
// as a plain value. A missing token falls back to a placeholder, and the
// placeholder is rejected right here so we fail before touching the network.
//
// Rust concepts:
// - thiserror: For a small, typed error enum
// - Option<T>: For values that may not be set
// =============================================================================

use thiserror::Error;
use url::Url;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const API_URL_ENV: &str = "GITHUB_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

// What you get when GITHUB_TOKEN was never set
pub const PLACEHOLDER_TOKEN: &str = "YOUR TOKEN HERE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set the 'GITHUB_TOKEN' environment variable to a GitHub access token.")]
    MissingToken,

    #[error("Invalid repository '{0}': expected https://github.com/<owner>/<name> or <owner>/<name>")]
    InvalidRepo(String),
}

/// Settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(API_URL_ENV).ok(),
        )
    }

    /// Same resolution as `from_env`, from explicit values
    pub fn from_values(token: Option<String>, api_url: Option<String>) -> Result<Self, ConfigError> {
        let token = token.unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());
        let token = token.trim();
        if token.is_empty() || token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::MissingToken);
        }

        let api_url = api_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            token: token.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// A GitHub repository, identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    // Parses a repository reference
    //
    // Supported formats:
    //   - https://github.com/owner/repo
    //   - https://github.com/owner/repo.git
    //   - https://github.com/owner/repo/tree/main (extra segments ignored)
    //   - github.com/owner/repo
    //   - owner/repo
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepo(input.to_string());
        let trimmed = input.trim();

        let path = if trimmed.contains("://") {
            let url = Url::parse(trimmed).map_err(|_| invalid())?;
            match url.host_str() {
                Some("github.com") | Some("www.github.com") => {}
                _ => return Err(invalid()),
            }
            url.path().to_string()
        } else if let Some(rest) = trimmed
            .strip_prefix("www.github.com/")
            .or_else(|| trimmed.strip_prefix("github.com/"))
        {
            rest.to_string()
        } else {
            trimmed.to_string()
        };

        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let owner = parts.next().ok_or_else(invalid)?;
        let name = parts.next().ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        // A bare reference must be exactly owner/name
        if !trimmed.contains("github.com") && parts.next().is_some() {
            return Err(invalid());
        }
        if owner.contains('.') && !trimmed.contains("github.com") {
            return Err(invalid());
        }
        if name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// "owner/name", the form the API paths use
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Default output file for this repository
    pub fn output_filename(&self) -> String {
        format!("{}_contents.txt", self.name)
    }
}

/// Splits a comma-separated exclude list into trimmed, non-empty prefixes
pub fn parse_excludes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(String::from)
        .collect()
}
