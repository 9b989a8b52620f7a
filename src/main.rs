//! pobx CLI - Command-line tool for decoding Path of Building exports.
//!
//! This is the main entry point for the pobx command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pobx::prelude::*;

/// pobx - Path of Building export decoder
#[derive(Parser)]
#[command(name = "pobx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an export string to its XML document
    Decode {
        /// File holding the export string
        #[arg(short, long)]
        input: PathBuf,

        /// Output XML file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract an export to JSON without linking passive nodes
    Extract {
        /// File holding the export string
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Extraction strategy
        #[arg(short, long, value_enum, default_value_t = Mode::Structured)]
        mode: Mode,
    },

    /// Parse a tree definitions file to a JSON node table
    Nodes {
        /// Tree definitions file (Lua data table)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode, extract and link an export against a node table
    Build {
        /// File holding the export string
        #[arg(short, long)]
        input: PathBuf,

        /// Tree definitions file (Lua data table)
        #[arg(short, long)]
        tree: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Player info, stats, passive tree, skills and items
    Structured,
    /// Every element, attribute and text of the document
    Generic,
}

impl From<Mode> for ExtractionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Structured => ExtractionMode::Structured,
            Mode::Generic => ExtractionMode::Generic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decode { input, output } => {
            cmd_decode(&input, &output)?;
        }
        Commands::Extract { input, output, mode } => {
            cmd_extract(&input, &output, mode.into())?;
        }
        Commands::Nodes { input, output } => {
            cmd_nodes(&input, &output)?;
        }
        Commands::Build { input, tree, output } => {
            cmd_build(&input, &tree, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_export(path: &Path) -> Result<String> {
    let export = fs::read_to_string(path)
        .with_context(|| format!("Failed to read export file {}", path.display()))?;
    Ok(export.trim().to_string())
}

fn cmd_decode(input: &Path, output: &Path) -> Result<()> {
    println!("Decoding: {} -> {}", input.display(), output.display());

    let export = read_export(input)?;
    let xml = pobx::decode_export(&export).context("Failed to decode export")?;
    fs::write(output, xml).context("Failed to write output file")?;

    println!("Decoding complete");

    Ok(())
}

fn cmd_extract(input: &Path, output: &Path, mode: ExtractionMode) -> Result<()> {
    println!("Extracting ({:?}): {} -> {}", mode, input.display(), output.display());

    let export = read_export(input)?;
    let json = match pobx::extract_export(&export, mode).context("Failed to extract export")? {
        Extraction::Structured(record) => pobx::to_json(&record)?,
        Extraction::Generic(tree) => pobx::to_json(&tree)?,
    };
    fs::write(output, json).context("Failed to write output file")?;

    println!("Extraction complete");

    Ok(())
}

fn cmd_nodes(input: &Path, output: &Path) -> Result<()> {
    println!("Parsing node table: {}", input.display());

    let start = Instant::now();
    let definitions = fs::read_to_string(input).context("Failed to read tree definitions")?;
    let table = NodeTable::parse(&definitions).context("Failed to parse node table")?;

    println!("Parsed {} nodes in {:?}", table.len(), start.elapsed());

    fs::write(output, pobx::to_json(&table)?).context("Failed to write output file")?;

    println!("Node table saved to {}", output.display());

    Ok(())
}

fn cmd_build(input: &Path, tree: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();

    let export = read_export(input)?;
    let definitions = fs::read_to_string(tree)
        .with_context(|| format!("Failed to read tree definitions {}", tree.display()))?;

    let pipeline = Pipeline::from_definitions(&definitions).context("Failed to load node table")?;
    println!("Loaded {} tree nodes from {}", pipeline.table().len(), tree.display());

    let record = pipeline.run(&export).context("Failed to process export")?;

    // Serialize fully before touching the output path.
    let json = pobx::to_json(&record)?;
    fs::write(output, json).context("Failed to write output file")?;

    let unknown = match &record.passive_tree.nodes {
        PassiveNodes::Linked(nodes) => nodes.iter().filter(|(_, e)| e.is_unknown()).count(),
        PassiveNodes::Raw(_) => 0,
    };
    println!(
        "Structured data saved to {} in {:?} ({} stats, {} skills, {} items, {} unknown nodes)",
        output.display(),
        start.elapsed(),
        record.player_stats.len(),
        record.skills.len(),
        record.items.len(),
        unknown
    );

    Ok(())
}
