//! emitmap CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "emitmap")]
#[command(version)]
#[command(about = "Build and inspect version 3 source maps", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a source map from a JSON stream of emission events
    Build {
        /// Event stream file (sources and events)
        #[arg(long)]
        events: PathBuf,

        /// Write the map to FILE
        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Name of the generated file the map describes (defaults to OUT without .map)
        #[arg(long)]
        file: Option<String>,

        /// Prefix consumers prepend to each source path
        #[arg(long)]
        source_root: Option<String>,

        /// TOML file with map options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Embed source text as sourcesContent
        #[arg(long)]
        sources_content: bool,

        /// Do not record symbol names
        #[arg(long)]
        no_names: bool,

        /// Pretty-print the map JSON
        #[arg(long)]
        pretty: bool,

        /// Append a sourceMappingURL comment to this generated file
        #[arg(long)]
        append_comment: Option<PathBuf>,
    },

    /// Print every mapping of a source map, one per line
    Decode {
        /// Source map file
        map: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "emitmap=debug,emitmap_core=debug" } else { "emitmap=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            events,
            out,
            file,
            source_root,
            config,
            sources_content,
            no_names,
            pretty,
            append_comment,
        } => commands::build::execute(commands::build::BuildArgs {
            events,
            out,
            file,
            source_root,
            config,
            sources_content,
            no_names,
            pretty,
            append_comment,
        }),
        Commands::Decode { map } => commands::decode::execute(&map),
    }
}
