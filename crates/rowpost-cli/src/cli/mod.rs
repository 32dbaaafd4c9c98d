//! CLI for the rowpost line-to-request driver.

use std::io;

use anyhow::Result;
use clap::Parser;
use rowpost_core::config::{self, RowpostConfig};
use rowpost_core::http::CurlCaller;
use rowpost_core::options::RunOptions;
use rowpost_core::runner;
use rowpost_core::tracker::{Tracker, TracingSink};

/// Reads lines from stdin and calls an HTTP endpoint once per line.
#[derive(Debug, Parser)]
#[command(name = "rowpost")]
#[command(about = "rowpost: one HTTP request per input line, with failure bailout", long_about = None)]
pub struct Cli {
    /// URL to call: `{{N}}` placeholders over row fields, or a base the
    /// line is appended to (query-escaped after `?`, path-escaped otherwise).
    pub url: String,

    /// Row field separator characters; whitespace if not specified.
    #[arg(long, default_value = "")]
    pub separator: String,

    /// Print the http calls instead of executing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop on this many consecutive error results (0 = keep going).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub stop_on_err_count: u32,

    /// Stop on the very first error at once, disregarding --stop-on-err-count.
    #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub stop_on_first_err: bool,

    /// Http timeout in seconds, 0 meaning no timeout.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// How often to log the summary status to stderr. 0 to only log the
    /// final statistics, -1 to disable the status logging whatsoever.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub tick: Option<i64>,

    /// Log the status to stderr upon the first error encountered.
    #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub log_first_err_stats: bool,

    /// Http method.
    #[arg(long, value_name = "METHOD")]
    pub http_method: Option<String>,

    /// Value for the Accept http request header.
    #[arg(long, value_name = "TYPE")]
    pub http_accept_type: Option<String>,

    /// Value for the Content-Type http request header.
    #[arg(long, value_name = "TYPE")]
    pub http_content_type: Option<String>,

    /// Skip first input lines, e.g. a header.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub skip: u64,
}

impl Cli {
    /// Resolves flags against config-file defaults. Explicit flags always
    /// win; absent optional flags fall back to the loaded config.
    pub fn into_options(self, cfg: &RowpostConfig) -> RunOptions {
        RunOptions {
            url: self.url,
            separator: self.separator,
            dry_run: self.dry_run,
            stop_on_err_count: self.stop_on_err_count,
            stop_on_first_err: self.stop_on_first_err,
            timeout_secs: self.timeout.unwrap_or(cfg.timeout_secs),
            tick: self.tick.unwrap_or(cfg.tick),
            log_first_err_stats: self.log_first_err_stats,
            http_method: self.http_method.unwrap_or_else(|| cfg.http_method.clone()),
            http_accept_type: self
                .http_accept_type
                .unwrap_or_else(|| cfg.http_accept_type.clone()),
            http_content_type: self
                .http_content_type
                .unwrap_or_else(|| cfg.http_content_type.clone()),
            skip: self.skip,
        }
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let options = cli.into_options(&cfg);

    let mut tracker = Tracker::default();
    tracker.stop_on_first_err = options.stop_on_first_err;
    tracker.stop_on_consecutive_err_count = options.stop_on_err_count;
    tracker.tick = options.tick;
    tracker.log_first_err = options.log_first_err_stats;
    if options.tick >= 0 {
        tracker.sink = Some(Box::new(TracingSink));
    }

    let caller = CurlCaller::new(&options);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    runner::run(&options, stdin.lock(), &mut output, &caller, &mut tracker)
}

#[cfg(test)]
mod tests;
