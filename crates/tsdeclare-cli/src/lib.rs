//! Library interface for the tsc-declare command line

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tsdeclare_core::LayoutConfig;
use tsdeclare_emit::{CompilerCommand, EmitOptions, EmitOutput, Emitter};

#[derive(Parser, Debug)]
#[command(name = "tsc-declare")]
#[command(version)]
#[command(about = "Bundle a tree of TypeScript modules into a single <name>.d.ts", long_about = None)]
pub struct Cli {
    /// Package name, used as the root namespace and the output file name
    #[arg(short, long)]
    pub name: String,

    /// Layout config file (JSON)
    #[arg(short, long)]
    pub filename: PathBuf,

    /// Directory for intermediate files and the output; leaf stems resolve here
    #[arg(short = 'C', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// TypeScript compiler to run
    #[arg(long, env = "TSC_DECLARE_TSC", default_value = "tsc")]
    pub tsc: String,

    /// Print the merged compilation unit instead of compiling it
    #[arg(long)]
    pub print_unit: bool,

    /// Fail if the declaration header or export assignment is not found
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

pub enum Outcome {
    Printed(String),
    Emitted(EmitOutput),
}

impl Cli {
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions::new(&self.dir)
            .with_compiler(CompilerCommand::new(self.tsc.as_str()))
            .strict(self.strict)
    }
}

pub fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        "trace"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug) // Show target module in debug mode
        .init();
}

pub async fn run(cli: &Cli) -> Result<Outcome> {
    // The config path is relative to the process, not to --dir
    let config = LayoutConfig::from_file(&cli.filename)
        .with_context(|| format!("Failed to load layout config {}", cli.filename.display()))?;
    info!(
        "Loaded layout with {} source files for '{}'",
        config.source_count(),
        cli.name
    );

    let emitter = Emitter::new(cli.emit_options());
    let root = emitter.assemble(&cli.name, &config)?;

    if cli.print_unit {
        return Ok(Outcome::Printed(Emitter::render(&root)));
    }

    let output = emitter.emit(&root).await?;
    Ok(Outcome::Emitted(output))
}
