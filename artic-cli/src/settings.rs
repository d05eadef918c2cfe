//! Command-line settings.

use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

/// Rows-per-page choices offered by the paginator.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 12, 25, 50];

/// Rows per page on startup.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "artic-cli",
    version,
    about = "Browse the Art Institute of Chicago collection and select artworks across pages",
    long_about = "Browse the Art Institute of Chicago collection one page at a time and keep a \
                  selection of artworks that survives page changes.\n\nExamples:\n  artic-cli\n  \
                  artic-cli --rows 25 --timeout 10"
)]
pub struct Settings {
    #[arg(
        short = 'r',
        long = "rows",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_page_size,
        help = "Rows per page (5, 10, 12, 25 or 50)."
    )]
    pub page_size: u32,

    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECS",
        default_value_t = 30,
        help = "Request timeout in seconds; 0 disables it."
    )]
    pub timeout_secs: u64,

    #[arg(
        long = "retries",
        value_name = "N",
        default_value_t = 2,
        help = "Retries for rate-limited, failed or unreachable requests."
    )]
    pub retries: u32,

    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = artic_lib::DEFAULT_BASE_URL,
        hide = true
    )]
    pub base_url: String,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,
}

impl Settings {
    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Log level for the log file.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Accepts only the paginator's page sizes.
pub fn parse_page_size(s: &str) -> Result<u32, String> {
    let size: u32 = s.trim().parse().map_err(|_| format!("`{}` is not a number", s))?;
    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "rows per page must be one of {}",
            PAGE_SIZE_OPTIONS.map(|n| n.to_string()).join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["artic-cli"]);
        assert_eq!(settings.page_size, 12);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.log_level(), LevelFilter::Info);
        assert_eq!(settings.base_url, artic_lib::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_flags() {
        let settings = Settings::parse_from(["artic-cli", "--rows", "25", "-t", "0", "-vv"]);
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        assert!(Settings::try_parse_from(["artic-cli", "--rows", "7"]).is_err());
        assert_eq!(
            parse_page_size("7"),
            Err("rows per page must be one of 5, 10, 12, 25, 50".to_string())
        );
    }
}
