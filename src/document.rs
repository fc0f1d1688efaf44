// src/document.rs
// =============================================================================
// This module puts the final text document together.
//
// Layout of the output, in order:
// 1. A fixed prompt telling the model how to study the repository
// 2. README:\n<readme text>
// 3. Repository Structure: <name>, then one line per directory/file
// 4. One block per file (see src/serialize/block.rs)
//
// Everything is collected in memory first (as a list of lines joined once
// at the end), so a failed run never leaves a half-written file behind.
//
// Rust concepts:
// - Generics: build_document works with any ContentProvider
// - String::with_capacity: One allocation for the whole document
// =============================================================================

use crate::provider::ContentProvider;
use crate::serialize::{fetch_readme, serialize_files, BlockContent, SerializedBlock};
use crate::walk::{ExcludeSet, TreeWalker};
use anyhow::Result;
use indicatif::ProgressBar;
use tracing::info;

const ANALYSIS_STEPS: [&str; 10] = [
    "Read the README file to gain an overview of the project, its goals, and any setup instructions.",
    "Examine the repository structure to understand how the files and directories are organized.",
    "Identify the main entry point of the application (e.g., main.py, app.py, index.js) and start analyzing the code flow from there.",
    "Study the dependencies and libraries used in the project to understand the external tools and frameworks being utilized.",
    "Analyze the core functionality of the project by examining the key modules, classes, and functions.",
    "Look for any configuration files (e.g., config.py, .env) to understand how the project is configured and what settings are available.",
    "Investigate any tests or test directories to see how the project ensures code quality and handles different scenarios.",
    "Review any documentation or inline comments to gather insights into the codebase and its intended behavior.",
    "Identify any potential areas for improvement, optimization, or further exploration based on your analysis.",
    "Provide a summary of your findings, including the project's purpose, key features, and any notable observations or recommendations.",
];

/// The instruction prompt placed at the top of every document
pub fn instructions(repo_name: &str) -> String {
    let mut text = format!(
        "Prompt: Analyze the {} repository to understand its structure, purpose, and functionality. \
         Follow these steps to study the codebase:\n\n",
        repo_name
    );
    for (i, step) in ANALYSIS_STEPS.iter().enumerate() {
        text.push_str(&format!("{}. {}\n\n", i + 1, step));
    }
    text.push_str("Use the files and contents provided below to complete this analysis:\n\n");
    text
}

/// Everything fetched for one repository, ready to render
#[derive(Debug)]
pub struct Document {
    pub repo_name: String,
    pub readme: String,
    pub structure: Vec<String>,
    pub blocks: Vec<SerializedBlock>,
}

/// How the file blocks came out
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub text: usize,
    pub binary: usize,
    pub errors: usize,
}

impl Document {
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.estimated_len());

        out.push_str(&instructions(&self.repo_name));
        out.push_str(&format!("README:\n{}\n\n", self.readme));

        out.push_str(&format!("Repository Structure: {}\n", self.repo_name));
        for line in &self.structure {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\n\n");

        for block in &self.blocks {
            for line in block.lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }

        out
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for block in &self.blocks {
            match block.content {
                BlockContent::Text(_) => summary.text += 1,
                BlockContent::Binary => summary.binary += 1,
                BlockContent::Error(_) => summary.errors += 1,
            }
        }
        summary
    }

    // Rough upper bound so render() doesn't keep reallocating
    fn estimated_len(&self) -> usize {
        let structure: usize = self.structure.iter().map(|l| l.len() + 1).sum();
        let blocks: usize = self
            .blocks
            .iter()
            .map(|b| {
                let body = match &b.content {
                    BlockContent::Text(text) => text.len(),
                    BlockContent::Error(message) => message.len(),
                    BlockContent::Binary => 0,
                };
                b.path.len() + body + 64
            })
            .sum();
        2048 + self.readme.len() + structure + blocks
    }
}

// Runs the whole pipeline against one provider
//
// Steps:
//   1. README (never fails, falls back to "README not found.")
//   2. Walk the tree (a failed directory listing aborts everything)
//   3. Fetch and classify every file found by the walk (per-file failures
//      are recorded in the document, not returned)
pub async fn build_document<P: ContentProvider + ?Sized>(
    provider: &P,
    repo_name: &str,
    excludes: &ExcludeSet,
    progress: &ProgressBar,
) -> Result<Document> {
    println!("📖 Fetching README for: {}", repo_name);
    let readme = fetch_readme(provider).await;

    println!("🌳 Fetching repository structure for: {}", repo_name);
    let walk = TreeWalker::new(provider, excludes)
        .with_progress(progress.clone())
        .walk()
        .await?;
    info!(files = walk.files.len(), "repository walked");

    println!("📥 Fetching file contents for: {}", repo_name);
    let blocks = serialize_files(provider, &walk.files, progress).await;

    Ok(Document {
        repo_name: repo_name.to_string(),
        readme,
        structure: walk.structure,
        blocks,
    })
}
