use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tasksnap::config::{self, Config, load_config, load_config_from_path};
use tasksnap::logging;
use tasksnap::report::Report;
use tasksnap::system::SysinfoProvider;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "tasksnap",
    version,
    about = "Print a one-shot Task-Manager-style snapshot of this machine"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show only the N busiest processes in the processes and details sections
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// CPU warm-up before reading per-process usage, in milliseconds
    #[arg(long, value_name = "MS")]
    warmup_ms: Option<u64>,

    /// Diagnostics level on stderr: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init_tracing(&config.general.log_level)?;
    if let Some(path) = cli.config.clone().or_else(config::config_path) {
        info!(path = %path.display(), "config location");
    }

    let mut provider =
        SysinfoProvider::new().wrap_err("system information provider is unavailable")?;

    let mut out = io::stdout().lock();
    Report::new(&mut provider, config.report_options()).write_to(&mut out)
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(top) = cli.top {
        config.ranking.processes_top = Some(top);
        config.ranking.details_top = Some(top);
    }
    if let Some(warmup) = cli.warmup_ms {
        config.sampling.warmup_ms = warmup;
    }
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }

    config
}
