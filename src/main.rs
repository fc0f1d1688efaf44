// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve the configuration (GitHub token) once, before anything else
// 3. Ask for the repository interactively if it wasn't given
// 4. Build the whole document in memory
// 5. Write it to <repo name>_contents.txt
// 6. Exit with proper code (0 = success, 1 = fetch/write failed, 2 = config error)
//
// Rust concepts used:
// - async/await: For the network requests to GitHub
// - Result<T, E>: For error handling (T = success type, E = error type)
// - downcast_ref: To tell configuration errors apart from the rest
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - token, API URL, repository parsing
mod document;      // src/document.rs - assembles the final text
mod github;        // src/github/ - GitHub REST API provider
mod provider;      // src/provider/ - the ContentProvider trait
mod serialize;     // src/serialize/ - file blocks and README
mod walk;          // src/walk/ - repository traversal

use anyhow::{Context, Result};
use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use config::{parse_excludes, Config, ConfigError, RepoRef};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use walk::ExcludeSet;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            if let Some(config_error) = e.downcast_ref::<ConfigError>() {
                // Configuration problems: say what's wrong, write nothing
                eprintln!("Error: {}", config_error);
                2
            } else {
                eprintln!("An error occurred: {:#}", e);
                eprintln!("Please check the repository URL and try again.");
                1
            }
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with the progress lines on stdout.
// RUST_LOG wins over --verbose when both are set.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "repo_to_text=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// This is the main application logic
async fn run(cli: Cli) -> Result<()> {
    // Token first: a missing token must fail before any prompt or request
    let config = Config::from_env()?;

    let (repo_input, excludes) = match cli.repo {
        Some(repo) => (repo, ExcludeSet::new(&cli.exclude)),
        None => {
            let repo = prompt("Please enter the GitHub repository URL: ")?;
            let excludes =
                prompt("Enter paths to exclude (comma-separated, or press Enter to skip): ")?;
            (repo, ExcludeSet::new(parse_excludes(&excludes)))
        }
    };

    let repo = RepoRef::parse(&repo_input)?;
    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(repo.output_filename()));

    println!("🔍 Reading GitHub repository: {}", repo.full_name());
    if !excludes.is_empty() {
        println!("🚫 Excluding paths starting with: {}", excludes.prefixes().join(", "));
    }

    let repo_name = repo.name.clone();
    let provider = github::GitHubProvider::new(&config, repo)?;

    let progress = spinner();
    let result = document::build_document(&provider, &repo_name, &excludes, &progress).await;
    progress.finish_and_clear();
    let document = result?;

    let summary = document.summary();
    println!(
        "📄 {} file(s): {} text, {} binary skipped, {} failed",
        document.blocks.len(),
        summary.text,
        summary.binary,
        summary.errors
    );

    // The document is complete in memory; only now touch the filesystem
    tokio::fs::write(&output_path, document.render())
        .await
        .with_context(|| format!("Failed to write '{}'", output_path.display()))?;

    println!("✅ Repository contents saved to '{}'.", output_path.display());
    Ok(())
}

// Asks a question on stdout and reads one line from stdin
fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

// Spinner on stderr showing the directory/file being processed.
// indicatif hides it automatically when stderr is not a terminal.
fn spinner() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}
