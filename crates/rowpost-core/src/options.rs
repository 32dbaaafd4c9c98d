//! Resolved per-run settings shared by the URL builder, HTTP caller and
//! run loop.

/// Everything a run needs besides the input stream and the URL pattern.
///
/// Defaults match the common case: POST with a wildcard Accept header,
/// a status line every thousand rows, stop on a failing first row.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// URL pattern: `{{N}}` placeholders, or a base to append each line to.
    pub url: String,
    /// Extra field separator characters on top of whitespace.
    pub separator: String,
    /// Print the request line instead of dispatching it.
    pub dry_run: bool,
    /// Bail out after this many consecutive failures (0 = keep going).
    pub stop_on_err_count: u32,
    /// Bail out if the very first row fails.
    pub stop_on_first_err: bool,
    /// Whole-request timeout in seconds (0 = no timeout).
    pub timeout_secs: u64,
    /// Rows between periodic status lines (0 = none, negative = silent run).
    pub tick: i64,
    /// Emit a status line on the first failure regardless of tick.
    pub log_first_err_stats: bool,
    /// HTTP request method, uppercased before dispatch.
    pub http_method: String,
    /// `Accept` header value; empty means the header is not sent.
    pub http_accept_type: String,
    /// `Content-Type` header value; empty means the header is not sent.
    pub http_content_type: String,
    /// Raw input lines to drop before processing starts.
    pub skip: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            separator: String::new(),
            dry_run: false,
            stop_on_err_count: 0,
            stop_on_first_err: true,
            timeout_secs: 0,
            tick: 1000,
            log_first_err_stats: true,
            http_method: "POST".to_string(),
            http_accept_type: "*/*".to_string(),
            http_content_type: String::new(),
            skip: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_post_with_wildcard_accept() {
        let options = RunOptions::default();
        assert_eq!(options.http_method, "POST");
        assert_eq!(options.http_accept_type, "*/*");
        assert_eq!(options.http_content_type, "");
        assert!(options.stop_on_first_err);
        assert!(options.log_first_err_stats);
        assert_eq!(options.tick, 1000);
        assert_eq!(options.stop_on_err_count, 0);
        assert_eq!(options.timeout_secs, 0);
        assert_eq!(options.skip, 0);
        assert!(!options.dry_run);
    }
}
