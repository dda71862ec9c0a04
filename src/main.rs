use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use kahu::discovery;
use kahu::reference::ReferenceData;
use kahu::report::{DEFAULT_REPORT_FILE, RunReport};
use kahu::validation::Validator;

#[derive(Parser)]
#[command(
    name = "kahu",
    about = "Validates research data contributions before they are merged",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the data-commons repository root
    #[arg(short, long, default_value = ".", global = true)]
    root: String,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate contribution directories (default command)
    Validate {
        /// Newline-separated contribution dirs relative to contributions/,
        /// as produced by the CI diff step; scans the whole tree when unset
        #[arg(long, env = "CHANGED_DIRS")]
        changed: Option<String>,

        /// Where to write the JSON report (default: <root>/validation-report.json)
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Validate { changed, report }) => {
            validate_command(Path::new(&cli.root), changed.as_deref(), report)
        }
        // Default to validate over the whole tree
        None => validate_command(Path::new(&cli.root), None, None),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("kahu=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("kahu=info"), // -v: info messages
        _ => EnvFilter::new("kahu=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn validate_command(root: &Path, changed: Option<&str>, report_path: Option<PathBuf>) -> Result<()> {
    let refs = ReferenceData::load(root).context("Failed to load reference data")?;
    let dirs = discovery::contribution_dirs(root, changed)?;

    if dirs.is_empty() {
        println!("No contribution directories to validate.");
        return Ok(());
    }

    println!("Validating {} contribution(s)...\n", dirs.len());

    let validator = Validator::new(&refs);
    let results = dirs
        .iter()
        .map(|dir| validator.validate_contribution(root, dir))
        .collect();

    let report = RunReport::new(results);
    report.render();
    report.write(&report_path.unwrap_or_else(|| root.join(DEFAULT_REPORT_FILE)))?;

    if report.has_errors() {
        anyhow::bail!("Validation failed. Fix the errors above and push again.");
    }
    println!("All contributions validated successfully.");
    Ok(())
}
