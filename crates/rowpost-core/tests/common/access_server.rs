//! Minimal HTTP/1.1 server recording an access log for integration tests.
//!
//! Every request is answered with an empty body. The response status is 204
//! unless the exact request target has a canned status or delay registered.
//! The access log keeps request targets exactly as they appeared on the
//! wire, percent-escapes included.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct AccessServerOptions {
    path_status: HashMap<String, u32>,
    path_delay: HashMap<String, Duration>,
}

impl AccessServerOptions {
    /// Answers `path` with `status` instead of the default 204.
    pub fn status(mut self, path: &str, status: u32) -> Self {
        self.path_status.insert(path.to_string(), status);
        self
    }

    /// Sleeps before answering `path`, to provoke client timeouts.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.path_delay.insert(path.to_string(), delay);
        self
    }
}

pub struct AccessServer {
    base_url: String,
    log: Arc<Mutex<String>>,
}

impl AccessServer {
    /// Base URL without a trailing slash (e.g. "http://127.0.0.1:12345").
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One `"<METHOD> <target>\n"` entry per received request, in order.
    pub fn access_log(&self) -> String {
        self.log.lock().expect("access log lock").clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start() -> AccessServer {
    start_with_options(AccessServerOptions::default())
}

pub fn start_with_options(opts: AccessServerOptions) -> AccessServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let log = Arc::new(Mutex::new(String::new()));
    let accept_log = Arc::clone(&log);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let log = Arc::clone(&accept_log);
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &log, &opts));
        }
    });
    AccessServer {
        base_url: format!("http://127.0.0.1:{}", port),
        log,
    }
}

fn handle(mut stream: std::net::TcpStream, log: &Mutex<String>, opts: &AccessServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, target) = match parse_request_line(request) {
        Some(pair) => pair,
        None => return,
    };

    if let Ok(mut entries) = log.lock() {
        entries.push_str(&format!("{} {}\n", method, target));
    }

    if let Some(delay) = opts.path_delay.get(target) {
        thread::sleep(*delay);
    }
    let status = opts.path_status.get(target).copied().unwrap_or(204);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status,
        reason(status)
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Returns (method, request-target) from the request line.
fn parse_request_line(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method, target))
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
