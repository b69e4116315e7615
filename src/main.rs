//! Binary entry point for authorgraph.
//!
//! A text-mode stand-in for the site's author modal: loads the two JSON
//! datasets, opens an author, and prints what a presentation layer would
//! render: header, works, domains, top related authors, and the biography
//! once it resolves.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow prints in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use authorgraph::{
    AuthorStore, AuthorgraphConfig, BioCache, BioState, ModalController, WikipediaClient,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// How many related authors the modal displays.
const RELATED_DISPLAY_LIMIT: usize = 3;

/// Authorgraph - relatedness and biographies for the bridge-authors explorer.
#[derive(Parser)]
#[command(name = "authorgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the authors dataset.
    #[arg(long, global = true, env = "AUTHORGRAPH_AUTHORS")]
    authors: Option<PathBuf>,

    /// Path to the category dataset.
    #[arg(long, global = true, env = "AUTHORGRAPH_CATEGORIES")]
    categories: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Open the detail modal for an author and print its data.
    Open {
        /// The author key, as used in the datasets.
        key: String,
        /// Skip the biography fetch.
        #[arg(long)]
        no_bio: bool,
    },
    /// Print the full ranked related-author list for an author.
    Related {
        /// The author key, as used in the datasets.
        key: String,
    },
    /// List all loaded author keys.
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("authorgraph=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run_command(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = AuthorgraphConfig::from_env();
    if let Some(path) = cli.authors {
        config = config.with_authors_path(path);
    }
    if let Some(path) = cli.categories {
        config = config.with_categories_path(path);
    }

    let store = Arc::new(load_store(&config)?);

    match cli.command {
        Commands::Open { key, no_bio } => {
            let fetcher = Arc::new(
                WikipediaClient::new().with_endpoint(config.wikipedia_endpoint.clone()),
            );
            let controller = ModalController::new(store, BioCache::in_memory(), fetcher);
            let modal = controller.open(&key)?;

            println!("{}", modal.author.full_name);
            println!("{}", modal.author.wikipedia_url);

            if !modal.domains.is_empty() {
                let badges: Vec<String> = modal
                    .domains
                    .iter()
                    .map(|d| format!("{} [{}]", d.name, d.kind.as_str()))
                    .collect();
                println!("\nDomains: {}", badges.join(", "));
            }

            if !modal.works.is_empty() {
                println!("\nWorks:");
                for work in &modal.works {
                    println!("  - {work}");
                }
            }

            println!("\nRelated authors:");
            if modal.related.is_empty() {
                println!("  (none found)");
            }
            for conn in modal.related.iter().take(RELATED_DISPLAY_LIMIT) {
                println!("  {} ({}): {}", conn.key, conn.score, conn.reason_summary());
            }

            if !no_bio {
                controller.load_biography().await;
                print_biography(&controller);
            }
            Ok(())
        },
        Commands::Related { key } => {
            let fetcher = Arc::new(WikipediaClient::new());
            let controller = ModalController::new(store, BioCache::in_memory(), fetcher);
            let modal = controller.open(&key)?;
            for conn in &modal.related {
                println!("{} ({}): {}", conn.key, conn.score, conn.reason_summary());
            }
            Ok(())
        },
        Commands::List => {
            for key in store.keys() {
                println!("{key}");
            }
            Ok(())
        },
    }
}

/// Loads the store, degrading per dataset rather than failing outright.
fn load_store(config: &AuthorgraphConfig) -> anyhow::Result<AuthorStore> {
    let authors_json = std::fs::read_to_string(&config.authors_path)
        .with_context(|| format!("reading {}", config.authors_path.display()))?;
    let categories_json = std::fs::read_to_string(&config.categories_path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %config.categories_path.display(),
            error = %e,
            "categories file unreadable, category features will be empty"
        );
        String::new()
    });
    Ok(AuthorStore::from_json_lenient(
        &authors_json,
        &categories_json,
    ))
}

/// Prints the resolved biography sub-state.
fn print_biography(controller: &ModalController) {
    let state = controller.state();
    let Some(modal) = state.as_open() else {
        return;
    };
    println!();
    match &modal.biography {
        BioState::Cached(text) | BioState::Loaded(text) => {
            if text.is_empty() {
                println!("(no biography available)");
            } else {
                println!("{text}");
            }
        },
        BioState::Loading => println!("Loading biography..."),
        BioState::Error { wikipedia_url } => {
            println!("Unable to load biography. Visit {wikipedia_url}");
        },
    }
}
