use std::str::FromStr;

use color_eyre::eyre::{Result, eyre};
use tracing::level_filters::LevelFilter;

/// Level used when the configured one does not parse.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(DEFAULT_LEVEL)
}

/// Installs a plain-text subscriber on stderr so stdout carries only the report.
pub fn init_tracing(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(parse_level(level))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" INFO "), LevelFilter::INFO);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
        assert_eq!(parse_level("chatty"), DEFAULT_LEVEL);
    }
}
