//! Sequential line-to-request run loop.
//!
//! Reads lines, builds one URL per line, dispatches (or prints, in dry-run
//! mode), echoes the per-line result to the output stream and feeds the
//! tracker. The tracker's final summary is emitted on every exit path once
//! the pattern has compiled.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::http::{CallOutcome, HttpCall};
use crate::options::RunOptions;
use crate::tracker::Tracker;
use crate::urlbuild::UrlBuilder;

/// Drives one run to completion. Returns `Ok(())` on input exhaustion; a
/// tracker bailout, a render failure or an unclassified transport error
/// surfaces as the run's error.
pub fn run<R: BufRead, W: Write>(
    options: &RunOptions,
    input: R,
    output: &mut W,
    caller: &dyn HttpCall,
    tracker: &mut Tracker,
) -> Result<()> {
    let builder = UrlBuilder::from_pattern(&options.url, &options.separator)
        .with_context(|| format!("parse url pattern \"{}\"", options.url))?;

    let result = process_lines(options, &builder, input, output, caller, tracker);
    tracker.finish();
    result
}

fn process_lines<R: BufRead, W: Write>(
    options: &RunOptions,
    builder: &UrlBuilder,
    input: R,
    output: &mut W,
    caller: &dyn HttpCall,
    tracker: &mut Tracker,
) -> Result<()> {
    let method = options.http_method.to_uppercase();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.context("read input line")?;
        if (line_no as u64) < options.skip {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        write!(output, "{} ", trimmed)?;
        let url = builder.build(trimmed)?;

        if options.dry_run {
            writeln!(output, "{} {}", method, url)?;
            tracker.ok();
            continue;
        }

        match caller.call(&url)? {
            CallOutcome::Success => {
                writeln!(output, "OK")?;
                tracker.ok();
                continue;
            }
            CallOutcome::HttpError { status } => writeln!(output, "ERR HTTP {}", status)?,
            CallOutcome::TransportError { timeout: true, .. } => writeln!(output, "ERR Timeout")?,
            CallOutcome::TransportError { message, .. } => writeln!(output, "ERR {}", message)?,
        }
        if let Some(bailout) = tracker.err() {
            return Err(bailout.into());
        }
    }

    Ok(())
}
