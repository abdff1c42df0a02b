//! Carousel simulator - Entry Point

use carousel::sim::{OutputFormat, Script, SimError, Simulation};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Report format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable lines
    Text,
    /// One JSON object per step
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Carousel simulator - replay gesture scripts against the scroll engine
#[derive(Parser, Debug)]
#[command(name = "carousel-sim")]
#[command(version)]
#[command(about = "Replay gesture scripts against the carousel scroll engine")]
pub struct Args {
    /// Path to a TOML script (runs the built-in demo if not provided)
    pub script: Option<PathBuf>,

    /// Override the script's item count
    #[arg(short, long)]
    pub items: Option<usize>,

    /// Override the script's starting index
    #[arg(short, long)]
    pub start: Option<usize>,

    /// Treat the items as a linear list
    #[arg(long)]
    pub no_wrap: bool,

    /// Disable rubber-banding at the ends
    #[arg(long)]
    pub no_bounce: bool,

    /// Limit each released drag to one item
    #[arg(long)]
    pub paging: bool,

    /// Simulated frame rate in ticks per second
    #[arg(long)]
    pub fps: Option<f64>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file (overrides the configured one)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = carousel::config::load_config_with_precedence(args.config.clone())?;
        let merged = carousel::config::merge_config(config_file)?;
        let with_env = carousel::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let wrap_override = args.no_wrap.then_some(false);
        let bounce_override = args.no_bounce.then_some(false);
        let paging_override = args.paging.then_some(true);

        carousel::config::apply_cli_overrides(
            with_env,
            wrap_override,
            bounce_override,
            paging_override,
            args.fps,
        )
    };

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| config.log_file_path.clone());
    carousel::logging::init(&log_path, &args.log_level).map_err(SimError::from)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(),
    };
    if let Some(items) = args.items {
        script.items = items;
    }
    if let Some(start) = args.start {
        script.starting_index = start;
    }

    let reports = Simulation::new(&script, &config).run(&script)?;

    let format = OutputFormat::from(args.format);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        let rendered = report.render(format)?;
        match format {
            OutputFormat::Json => writeln!(out, "{rendered}")?,
            OutputFormat::Text => write!(out, "{rendered}")?,
        }
    }

    Ok(())
}
