//! `dockmaster` command-line entry point.
//!
//! # What happens at startup
//!
//! 1. CLI arguments are parsed with `clap` into a [`Cli`] struct.
//! 2. The TOML config is loaded from `--config` or the platform directory.
//! 3. `tracing_subscriber` is initialised.  `RUST_LOG` wins; otherwise the
//!    configured `general.log_level` applies.  Logs go to stderr so that JSON
//!    results on stdout can be piped.
//! 4. The subcommand runs against a [`FileRegistry`] at `--registry` or the
//!    configured `registry.path`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dockmaster_cli::application::{apply_suggestion, format_registry, lookup};
use dockmaster_cli::infrastructure::registry::file::FileRegistry;
use dockmaster_cli::infrastructure::storage::config::{load_config, AppConfig};
use dockmaster_core::{validate_dockmaster_id, Suggestion};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Dockmaster registry tool.
///
/// Classifies map coordinates, matches them to registered dockmasters, and
/// applies approved suggestions to the registry file.
#[derive(Debug, Parser)]
#[command(name = "dockmaster", about = "Dockmaster zone matching and registry maintenance", version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, env = "DOCKMASTER_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the registry file.  Overrides `registry.path` from the config.
    #[arg(long, global = true, env = "DOCKMASTER_REGISTRY")]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the zone a point falls in and whether it is a transition point.
    Zone {
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
    },
    /// Match a point to the nearest registered dockmaster.
    Match {
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
        /// Confidence below which the match needs verification.
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// List groups of dockmasters that share a boundary area.
    Clusters {
        /// Maximum distance from a cluster's seed entry.
        #[arg(long)]
        distance: Option<f64>,
    },
    /// Normalise and validate a zone ID.
    Validate { id: String },
    /// Apply an approved suggestion (JSON) to the registry.
    Apply {
        suggestion: PathBuf,
        /// Print the result without writing the registry.
        #[arg(long)]
        dry_run: bool,
    },
    /// Rewrite the registry in canonical form.
    FixFormat {
        /// Sort rows by zone ID.
        #[arg(long)]
        sort: bool,
        /// Refuse to write output with fewer lines than this.
        #[arg(long)]
        min_lines: Option<usize>,
        /// Print the result without writing the registry.
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    fn registry(&self, config: &AppConfig) -> FileRegistry {
        FileRegistry::new(
            self.registry
                .clone()
                .unwrap_or_else(|| config.registry.path.clone()),
        )
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    run(cli, &config)
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let mut policy = config.match_policy();
    let registry = cli.registry(config);

    match cli.command {
        Command::Zone { x, y } => print_json(&lookup::describe_zone(x, y, &policy)),

        Command::Match { x, y, threshold } => {
            if let Some(threshold) = threshold {
                policy.confidence_threshold = threshold;
            }
            let outcome = lookup::match_coordinates(&registry, x, y, &policy)
                .with_context(|| format!("failed to read registry {}", registry.path().display()))?;
            print_json(&outcome)
        }

        Command::Clusters { distance } => {
            if let Some(distance) = distance {
                policy.cluster_distance = distance;
            }
            let clusters = lookup::transition_clusters(&registry, &policy)
                .with_context(|| format!("failed to read registry {}", registry.path().display()))?;
            print_json(&clusters)
        }

        Command::Validate { id } => {
            let formatted = validate_dockmaster_id(&id)?;
            println!("{formatted}");
            Ok(())
        }

        Command::Apply {
            suggestion,
            dry_run,
        } => {
            let raw = std::fs::read_to_string(&suggestion)
                .with_context(|| format!("failed to read suggestion {}", suggestion.display()))?;
            let suggestion: Suggestion = serde_json::from_str(&raw)
                .with_context(|| format!("invalid suggestion document {}", suggestion.display()))?;

            let outcome = apply_suggestion::apply_suggestion(&registry, &suggestion, dry_run)
                .context("failed to apply suggestion")?;
            info!(
                published = outcome.published,
                title = %outcome.description.title,
                "suggestion processed"
            );
            print_json(&outcome)
        }

        Command::FixFormat {
            sort,
            min_lines,
            dry_run,
        } => {
            let mut options = config.format_fix_options();
            options.sort |= sort;
            if let Some(min_lines) = min_lines {
                options.min_lines = min_lines;
            }

            let outcome = format_registry::format_registry(&registry, &options, dry_run)
                .context("failed to fix registry format")?;
            print_json(&outcome)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
