//! Per-run outcome accounting and failure bailout policy.
//!
//! The tracker is *not* thread-safe; the run loop is strictly sequential,
//! so a fresh `Tracker` per run needs no synchronization.

use thiserror::Error;

/// Reason the run must stop early. Not a programming fault; the CLI reports
/// it and exits non-zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Bailout {
    #[error("error on first call")]
    FirstCall,
    #[error("{count} consecutive errors")]
    ConsecutiveErrors { count: u32 },
}

/// Receives formatted status lines (periodic ticks and the final summary).
pub trait StatusSink {
    fn emit(&mut self, line: &str);
}

/// Default sink: status lines go through `tracing` at info level, landing on
/// stderr so stdout stays a clean result stream.
#[derive(Debug, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&mut self, line: &str) {
        tracing::info!("{}", line);
    }
}

/// Accumulates call outcomes and decides when to bail out.
///
/// Policy fields are public; construct with `Tracker::default()` and adjust,
/// then feed one `ok()`/`err()` per processed row. With no `sink` configured
/// the counting still runs, emissions are just skipped.
pub struct Tracker {
    /// Bail out if the very first processed row fails.
    pub stop_on_first_err: bool,
    /// Bail out when this many failures occur in a row (0 = disabled).
    pub stop_on_consecutive_err_count: u32,
    /// Emit a periodic status line every `tick` rows (<= 0 = never).
    pub tick: i64,
    /// Emit a status line on the first failure of the run regardless of tick.
    pub log_first_err: bool,
    pub sink: Option<Box<dyn StatusSink>>,

    row_no: u64,
    ok_count: u64,
    err_count: u64,
    consecutive_err_count: u32,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            stop_on_first_err: false,
            stop_on_consecutive_err_count: 0,
            tick: 0,
            log_first_err: false,
            sink: None,
            row_no: 0,
            ok_count: 0,
            err_count: 0,
            consecutive_err_count: 0,
        }
    }
}

impl Tracker {
    /// Records a successful call. Resets the consecutive-error run.
    pub fn ok(&mut self) {
        self.row_no += 1;
        self.ok_count += 1;
        self.consecutive_err_count = 0;
        if self.tick_due() {
            self.emit_status();
        }
    }

    /// Records a failed call and returns the reason to bail out, if any.
    ///
    /// The first-call check wins over the consecutive-threshold check when
    /// both hold on the same row.
    pub fn err(&mut self) -> Option<Bailout> {
        self.row_no += 1;
        self.err_count += 1;
        self.consecutive_err_count += 1;
        if self.tick_due() || (self.log_first_err && self.err_count == 1) {
            self.emit_status();
        }

        if self.stop_on_first_err && self.row_no == 1 {
            return Some(Bailout::FirstCall);
        }
        if self.stop_on_consecutive_err_count > 0
            && self.consecutive_err_count >= self.stop_on_consecutive_err_count
        {
            return Some(Bailout::ConsecutiveErrors {
                count: self.consecutive_err_count,
            });
        }
        None
    }

    /// Emits the final summary regardless of tick configuration. The caller
    /// invokes this exactly once per run, on every termination path.
    pub fn finish(&mut self) {
        let line = format!(
            "Done {} OK: {} ERR: {}",
            self.row_no, self.ok_count, self.err_count
        );
        if let Some(sink) = &mut self.sink {
            sink.emit(&line);
        }
    }

    fn tick_due(&self) -> bool {
        self.tick > 0 && self.row_no % self.tick as u64 == 0
    }

    fn emit_status(&mut self) {
        let line = format!("{} ERR: {}", self.row_no, self.err_count);
        if let Some(sink) = &mut self.sink {
            sink.emit(&line);
        }
    }
}
