// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API "contents" endpoint.
//
// Strategy:
// - One endpoint serves both of our needs:
//     GET /repos/{owner}/{repo}/contents/{path}
// - With `Accept: application/vnd.github+json` a directory path returns a
//   JSON array describing its entries
// - With `Accept: application/vnd.github.raw` a file path returns the raw
//   file bytes (no base64 step on our side)
// - Every request carries the token as a Bearer header
//
// Why the API instead of raw.githubusercontent.com?
// - raw.githubusercontent.com can't list directories
// - The API works for private repositories with a token
// - Authenticated requests get a much higher rate limit
//
// Rust concepts:
// - async functions: For network I/O
// - Trait implementations: GitHubProvider implements ContentProvider
// - serde: To turn JSON into Rust structs
// =============================================================================

use crate::config::{Config, RepoRef};
use crate::provider::{ContentProvider, Entry, EntryKind, ProviderError};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("repo-to-text/", env!("CARGO_PKG_VERSION"));

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";

// One item of a directory listing as GitHub sends it.
// GitHub sends many more fields (sha, size, urls...); serde ignores them.
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
}

impl From<ContentItem> for Entry {
    fn from(item: ContentItem) -> Self {
        // "file", "symlink" and "submodule" all count as files
        let kind = if item.item_type == "dir" {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Entry {
            path: item.path,
            name: item.name,
            kind,
        }
    }
}

// Error bodies look like {"message": "Not Found", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// ContentProvider backed by the GitHub REST API, bound to one repository
pub struct GitHubProvider {
    client: Client,
    base_url: Url,
    repo: RepoRef,
}

impl GitHubProvider {
    // Creates a provider for `repo` using the token and API URL from `config`
    //
    // The HTTP client is created once and reused for every request
    // (connection pooling), with the auth header baked in.
    pub fn new(config: &Config, repo: RepoRef) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid GitHub API URL '{}'", config.api_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid GitHub API URL '{}'", config.api_url));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .context("GitHub token contains characters that are not allowed in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            repo,
        })
    }

    // Builds {base}/repos/{owner}/{repo}/contents/{path}
    //
    // Each path segment is percent-encoded by the url crate, so names with
    // spaces or '#' survive the trip.
    fn contents_url(&self, path: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProviderError::InvalidResponse {
                    path: path.to_string(),
                    message: "API URL cannot be used as a base".to_string(),
                })?;
            segments
                .pop_if_empty()
                .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str(), "contents"])
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        Ok(url)
    }

    async fn get(&self, path: &str, accept: &'static str) -> Result<Response, ProviderError> {
        let url = self.contents_url(path)?;
        debug!(%url, accept, "GET");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await?;

        check_status(response, path).await
    }
}

#[async_trait]
impl ContentProvider for GitHubProvider {
    async fn list_directory(&self, path: &str) -> Result<Vec<Entry>, ProviderError> {
        let response = self.get(path, ACCEPT_JSON).await?;
        let body = response.bytes().await?;

        // A file path answers with a single object instead of an array,
        // which fails here as "not a directory listing"
        let items: Vec<ContentItem> =
            serde_json::from_slice(&body).map_err(|e| ProviderError::InvalidResponse {
                path: path.to_string(),
                message: format!("not a directory listing ({})", e),
            })?;

        debug!(path, entries = items.len(), "listed directory");
        Ok(items.into_iter().map(Entry::from).collect())
    }

    async fn fetch_file_bytes(&self, path: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.get(path, ACCEPT_RAW).await?;
        let bytes = response.bytes().await?;

        debug!(path, bytes = bytes.len(), "fetched file");
        Ok(bytes.to_vec())
    }
}

// Turns non-2xx responses into a ProviderError
//
// GitHub status codes we care about:
// - 404: path (or repository) does not exist, or the token can't see it
// - 401: bad or expired token
// - 403/429 with x-ratelimit-remaining: 0 → rate limited
async fn check_status(response: Response, path: &str) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"));

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status);

    Err(match status {
        StatusCode::NOT_FOUND => ProviderError::NotFound(path.to_string()),
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized(message),
        _ if rate_limited => ProviderError::RateLimited(message),
        _ => ProviderError::Status {
            status: status.as_u16(),
            path: path.to_string(),
            message,
        },
    })
}

// Prefers GitHub's JSON "message", falls back to the raw body or the
// status reason phrase
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - Rust traits can't (easily) have async methods on their own
//    - The async-trait macro rewrites them into methods returning boxed futures
//    - The impl block needs the same attribute as the trait definition
//
// 2. Why HeaderValue::set_sensitive(true)?
//    - Marks the Authorization header as secret
//    - reqwest/http then leave it out of Debug output and logs
//
// 3. What does #[serde(rename = "type")] do?
//    - `type` is a keyword in Rust, so the field can't be called that
//    - rename tells serde to read the JSON key "type" into `item_type`
//
// 4. What is From<ContentItem> for Entry?
//    - A conversion trait; it lets us write Entry::from(item) or item.into()
//    - Keeps the GitHub JSON shape out of the rest of the program
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};

    fn provider_for(server: &ServerGuard) -> GitHubProvider {
        let config = Config::from_values(Some("test-token".to_string()), Some(server.url())).unwrap();
        let repo = RepoRef::parse("octocat/hello").unwrap();
        GitHubProvider::new(&config, repo).unwrap()
    }

    #[tokio::test]
    async fn test_list_root_directory() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello/contents")
            .match_header("authorization", "Bearer test-token")
            .match_header("accept", ACCEPT_JSON)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"name": "README.md", "path": "README.md", "type": "file", "sha": "abc", "size": 5},
                    {"name": "src", "path": "src", "type": "dir", "sha": "def", "size": 0},
                    {"name": "vendor", "path": "vendor", "type": "submodule", "sha": "123", "size": 0}
                ]"#,
            )
            .create_async()
            .await;

        let entries = provider_for(&server).list_directory("").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            entries,
            vec![
                Entry::file("README.md"),
                Entry::directory("src"),
                Entry::file("vendor"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_nested_directory() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello/contents/src/util")
            .with_status(200)
            .with_body(r#"[{"name": "a.py", "path": "src/util/a.py", "type": "file"}]"#)
            .create_async()
            .await;

        let entries = provider_for(&server).list_directory("src/util").await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries, vec![Entry::file("src/util/a.py")]);
    }

    #[tokio::test]
    async fn test_fetch_file_bytes_uses_raw_media_type() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello/contents/src/b.bin")
            .match_header("accept", ACCEPT_RAW)
            .with_status(200)
            .with_body(vec![0xffu8, 0xfe, 0x00])
            .create_async()
            .await;

        let bytes = provider_for(&server).fetch_file_bytes("src/b.bin").await.unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, vec![0xff, 0xfe, 0x00]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/hello/contents/README.md")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let err = provider_for(&server).fetch_file_bytes("README.md").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(ref p) if p == "README.md"));
    }

    #[tokio::test]
    async fn test_unauthorized_uses_api_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/hello/contents")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com"}"#)
            .create_async()
            .await;

        let err = provider_for(&server).list_directory("").await.unwrap_err();
        assert_eq!(err.to_string(), "unauthorized: Bad credentials");
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/hello/contents")
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let err = provider_for(&server).list_directory("").await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_file_path_is_not_a_listing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/hello/contents/README.md")
            .with_status(200)
            .with_body(r#"{"name": "README.md", "path": "README.md", "type": "file"}"#)
            .create_async()
            .await;

        let err = provider_for(&server).list_directory("README.md").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        let config = Config::from_values(
            Some("t".to_string()),
            Some("https://ghe.example.com/api/v3".to_string()),
        )
        .unwrap();
        let provider = GitHubProvider::new(&config, RepoRef::parse("o/r").unwrap()).unwrap();

        let url = provider.contents_url("docs/my notes#1.md").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/o/r/contents/docs/my%20notes%231.md"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message("", StatusCode::BAD_GATEWAY), "Bad Gateway");
        assert_eq!(error_message("oops\n", StatusCode::BAD_GATEWAY), "oops");
    }
}
