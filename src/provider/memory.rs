// src/provider/memory.rs
// In-memory ContentProvider used by the unit tests. Records every call so
// tests can assert how many times a directory was listed.

use super::{ContentProvider, Entry, ProviderError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryProvider {
    listings: HashMap<String, Vec<Entry>>,
    files: HashMap<String, Vec<u8>>,
    broken_files: HashMap<String, String>,
    listed: Mutex<Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and register it in its parent directory listing
    pub fn with_file(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), bytes.into());
        self.push_entry(Entry::file(path));
        self
    }

    /// Add a file whose fetch always fails with `message`
    pub fn with_broken_file(mut self, path: &str, message: &str) -> Self {
        self.broken_files.insert(path.to_string(), message.to_string());
        self.push_entry(Entry::file(path));
        self
    }

    /// Add a directory (its listing starts empty)
    pub fn with_dir(mut self, path: &str) -> Self {
        self.listings.entry(path.to_string()).or_default();
        self.push_entry(Entry::directory(path));
        self
    }

    /// Append an arbitrary entry to the listing of `parent`, even one that
    /// points somewhere else in the tree
    pub fn with_raw_entry(mut self, parent: &str, entry: Entry) -> Self {
        self.listings.entry(parent.to_string()).or_default().push(entry);
        self
    }

    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn push_entry(&mut self, entry: Entry) {
        let parent = match entry.path.rfind('/') {
            Some(idx) => entry.path[..idx].to_string(),
            None => String::new(),
        };
        self.listings.entry(parent).or_default().push(entry);
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn list_directory(&self, path: &str) -> Result<Vec<Entry>, ProviderError> {
        self.listed.lock().unwrap().push(path.to_string());
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }

    async fn fetch_file_bytes(&self, path: &str) -> Result<Vec<u8>, ProviderError> {
        self.fetched.lock().unwrap().push(path.to_string());
        if let Some(message) = self.broken_files.get(path) {
            return Err(ProviderError::Status {
                status: 500,
                path: path.to_string(),
                message: message.clone(),
            });
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }
}
