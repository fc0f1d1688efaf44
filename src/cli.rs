// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Option<T>: For arguments the user may leave out
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo-to-text",
    version,
    about = "Turn a GitHub repository into a single text file for LLM context",
    long_about = "repo-to-text downloads a GitHub repository's README, directory structure and \
                  file contents through the GitHub API and writes them to one text file, \
                  prefixed with a prompt for analysing the codebase.\n\n\
                  The GITHUB_TOKEN environment variable must hold a GitHub access token."
)]
pub struct Cli {
    /// GitHub repository URL or owner/name (e.g., https://github.com/user/repo)
    ///
    /// If left out, you are asked for it (and for exclusions) interactively
    pub repo: Option<String>,

    /// Comma-separated path prefixes to leave out (e.g., --exclude docs,tests/fixtures)
    ///
    /// Matching is a plain prefix test: "src" also excludes "srcfoo"
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Where to write the document (default: <repo name>_contents.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show debug logs (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "repo-to-text",
            "https://github.com/user/repo",
            "--exclude",
            "docs,tests/fixtures",
            "-o",
            "out.txt",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.repo.as_deref(), Some("https://github.com/user/repo"));
        assert_eq!(cli.exclude, vec!["docs", "tests/fixtures"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_repo_is_optional() {
        let cli = Cli::try_parse_from(["repo-to-text"]).unwrap();
        assert!(cli.repo.is_none());
        assert!(cli.exclude.is_empty());
        assert!(!cli.verbose);
    }
}
