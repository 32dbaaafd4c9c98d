//! One-shot HTTP dispatch over libcurl.
//!
//! A fresh `Easy` handle per request keeps the caller stateless; no
//! connection reuse is attempted. Response bodies are read and discarded,
//! only the status code matters.

use std::time::Duration;

use thiserror::Error;

use crate::options::RunOptions;

/// Unclassified transport failure. Aborts the whole run without consulting
/// the tracker; timeouts, connection errors and HTTP error statuses are row
/// outcomes instead.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unexpected error calling {url}: {message}")]
pub struct FatalCallError {
    pub url: String,
    pub message: String,
}

/// Outcome of a single dispatched request, as the tracker sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Any 2xx response.
    Success,
    /// A response arrived with a non-2xx status.
    HttpError { status: u32 },
    /// No response; the error text is reported per row.
    TransportError { timeout: bool, message: String },
}

/// Seam between the run loop and the network.
pub trait HttpCall {
    fn call(&self, url: &str) -> Result<CallOutcome, FatalCallError>;
}

/// Dispatches requests with libcurl, one `Easy` handle per call.
#[derive(Debug, Clone)]
pub struct CurlCaller {
    method: String,
    accept: String,
    content_type: String,
    timeout_secs: u64,
}

impl CurlCaller {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            method: options.http_method.to_uppercase(),
            accept: options.http_accept_type.clone(),
            content_type: options.http_content_type.clone(),
            timeout_secs: options.timeout_secs,
        }
    }

    fn apply_method(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        match self.method.as_str() {
            "GET" => Ok(()),
            "POST" => {
                easy.post(true)?;
                // Empty body, but Content-Length: 0 must still go out.
                easy.post_fields_copy(&[])
            }
            "HEAD" => easy.nobody(true),
            other => easy.custom_request(other),
        }
    }

    fn headers(&self) -> Result<Option<curl::easy::List>, curl::Error> {
        if self.accept.is_empty() && self.content_type.is_empty() {
            return Ok(None);
        }
        let mut list = curl::easy::List::new();
        if !self.accept.is_empty() {
            list.append(&format!("Accept: {}", self.accept))?;
        }
        if !self.content_type.is_empty() {
            list.append(&format!("Content-Type: {}", self.content_type))?;
        }
        Ok(Some(list))
    }

    fn perform(&self, url: &str) -> Result<CallOutcome, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        self.apply_method(&mut easy)?;
        if let Some(list) = self.headers()? {
            easy.http_headers(list)?;
        }
        if self.timeout_secs > 0 {
            easy.timeout(Duration::from_secs(self.timeout_secs))?;
        }

        {
            let mut transfer = easy.transfer();
            // Discard the body; the default callback would echo it to stdout.
            transfer.write_function(|data| Ok(data.len()))?;
            if let Err(e) = transfer.perform() {
                if let Some(outcome) = classify_curl_error(&e) {
                    return Ok(outcome);
                }
                return Err(e);
            }
        }

        let status = easy.response_code()?;
        if (200..300).contains(&status) {
            Ok(CallOutcome::Success)
        } else {
            Ok(CallOutcome::HttpError { status })
        }
    }
}

/// Maps recoverable curl failures onto row outcomes. Returns `None` for
/// anything that should abort the run.
fn classify_curl_error(e: &curl::Error) -> Option<CallOutcome> {
    if e.is_operation_timedout() {
        return Some(CallOutcome::TransportError {
            timeout: true,
            message: e.to_string(),
        });
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return Some(CallOutcome::TransportError {
            timeout: false,
            message: e.to_string(),
        });
    }
    None
}

impl HttpCall for CurlCaller {
    fn call(&self, url: &str) -> Result<CallOutcome, FatalCallError> {
        self.perform(url).map_err(|e| FatalCallError {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
