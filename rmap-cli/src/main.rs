//! rmap CLI - Render markdown roadmaps as dependency trees
//!
//! Reads a checklist-style roadmap, groups items by phase and nests each item
//! under the item it depends on.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod locate;
mod output;

use commands::*;
use config::RmapConfig;
use output::OutputFormat;

/// Roadmap dependency-graph viewer.
///
/// Items are written as markdown checkboxes under `## Phase` headings.
/// An optional attribute block names the item and what it depends on.
#[derive(Parser)]
#[command(name = "rmap")]
#[command(author, version)]
#[command(about = "Render markdown roadmaps as dependency trees")]
#[command(
    long_about = "rmap reads a markdown roadmap, groups items by phase and nests\neach item under the last item it depends on.\n\nItem syntax: - [ ] Train model {id: train, depends: prep}"
)]
#[command(propagate_version = true)]
#[command(next_help_heading = "Options")]
#[command(after_help = "Status markers:
  [x] done   [>] active   [ ] pending   [~] suspended   [!] blocked

Examples:
  rmap show                 Render ./ROADMAP.md as a tree
  rmap show --flat          Plain list grouped by phase
  rmap check --strict       Fail on dangling or cyclic dependencies
  rmap complete \"Train\"     Mark an item done, promote the next one
  rmap export -F markdown   Re-emit the roadmap in tree order")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the roadmap as a dependency tree
    #[command(visible_alias = "s")]
    Show {
        /// Roadmap file (default: config path, then ROADMAP.md)
        path: Option<String>,

        /// Hide item ids
        #[arg(long)]
        no_ids: bool,

        /// Ignore dependencies and list items in file order
        #[arg(long)]
        flat: bool,
    },

    /// Report dangling references, duplicate ids and cycles
    Check {
        /// Roadmap file (default: config path, then ROADMAP.md)
        path: Option<String>,

        /// Exit with an error if any problem is found
        #[arg(long)]
        strict: bool,
    },

    /// Summarize progress and item counts
    #[command(visible_alias = "st")]
    Status {
        /// Roadmap file (default: config path, then ROADMAP.md)
        path: Option<String>,
    },

    /// Mark an item done and promote the next pending item
    #[command(visible_alias = "done")]
    Complete {
        /// Exact item text, without the attribute block
        text: String,

        /// Roadmap file (default: config path, then ROADMAP.md)
        #[arg(short, long)]
        path: Option<String>,

        /// Write without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Show the change without writing it
        #[arg(long, conflicts_with = "yes")]
        dry_run: bool,
    },

    /// Export the roadmap as outline, markdown or json
    Export {
        /// Roadmap file (default: config path, then ROADMAP.md)
        path: Option<String>,

        /// Export format: outline, markdown, json
        #[arg(short = 'F', long = "export-format", default_value = "outline")]
        export_format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Hide item ids
        #[arg(long)]
        no_ids: bool,

        /// Ignore dependencies and keep file order
        #[arg(long)]
        flat: bool,
    },

    /// Re-render the roadmap whenever the file changes
    #[command(visible_alias = "w")]
    Watch {
        /// Roadmap file (default: config path, then ROADMAP.md)
        path: Option<String>,

        /// Hide item ids
        #[arg(long)]
        no_ids: bool,

        /// Ignore dependencies and list items in file order
        #[arg(long)]
        flat: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .rmaprc.toml
    let mut config = RmapConfig::load(std::path::Path::new("."));
    if cli.compact {
        config.output.compact = true;
    }

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Show { path, no_ids, flat } => {
            show::run(path.as_deref(), no_ids, flat, &config, format).await
        }
        Commands::Check { path, strict } => {
            check::run(path.as_deref(), strict, &config, format).await
        }
        Commands::Status { path } => status::run(path.as_deref(), &config, format).await,
        Commands::Complete {
            text,
            path,
            yes,
            dry_run,
        } => complete::run(&text, path.as_deref(), yes, dry_run, &config, format).await,
        Commands::Export {
            path,
            export_format,
            output,
            no_ids,
            flat,
        } => {
            export::run(
                path.as_deref(),
                &export_format,
                output.as_deref(),
                no_ids,
                flat,
                &config,
                format,
            )
            .await
        }
        Commands::Watch { path, no_ids, flat } => {
            watch::run(path.as_deref(), no_ids, flat, &config, format).await
        }
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::run(shell, format)
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions_with_cmd(shell, &mut cmd);
                Ok(())
            }
        }
    }
}
