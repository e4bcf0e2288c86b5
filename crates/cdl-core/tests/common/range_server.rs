//! Minimal HTTP/1.1 server that supports HEAD and Range GET for integration tests.
//!
//! Serves a single static body at any path. Counts HEAD, full GET and ranged
//! GET requests so tests can assert how many requests the downloader made.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
    /// If false, GET ignores Range and always returns 200 with the full body.
    pub support_ranges: bool,
    /// If false, omit `Accept-Ranges: bytes`. Independent of `support_ranges`,
    /// so a server can advertise ranges and still ignore them.
    pub advertise_ranges: bool,
    /// If false, HEAD responses carry no `Content-Length`.
    pub head_content_length: bool,
    /// A ranged GET starting at this offset answers 500.
    pub fail_range_start: Option<u64>,
    /// Ranged GETs declare the full slice length but send at most this many
    /// bytes before closing the connection.
    pub truncate_range_body: Option<usize>,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            head_allowed: true,
            support_ranges: true,
            advertise_ranges: true,
            head_content_length: true,
            fail_range_start: None,
            truncate_range_body: None,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    head: AtomicUsize,
    full_get: AtomicUsize,
    range_get: AtomicUsize,
    range_starts: std::sync::Mutex<Vec<u64>>,
}

/// Handle to a running server. The server runs until the process exits.
pub struct RangeServer {
    base: String,
    counters: Arc<Counters>,
}

impl RangeServer {
    /// URL of `name` on this server, e.g. `http://127.0.0.1:1234/name`.
    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }

    pub fn head_requests(&self) -> usize {
        self.counters.head.load(Ordering::SeqCst)
    }

    pub fn full_gets(&self) -> usize {
        self.counters.full_get.load(Ordering::SeqCst)
    }

    pub fn range_gets(&self) -> usize {
        self.counters.range_get.load(Ordering::SeqCst)
    }

    /// Start offsets of every ranged GET, sorted.
    pub fn range_starts(&self) -> Vec<u64> {
        let mut v = self.counters.range_starts.lock().unwrap().clone();
        v.sort_unstable();
        v
    }
}

/// Starts a server in a background thread serving `body`.
pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

/// Like `start` but allows customizing server behavior (HEAD blocked, ranges missing, etc.).
pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let counters = Arc::new(Counters::default());
    let server_counters = Arc::clone(&counters);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counters = Arc::clone(&server_counters);
            thread::spawn(move || handle(stream, &body, opts, &counters));
        }
    });
    RangeServer {
        base: format!("http://127.0.0.1:{}/", port),
        counters,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: RangeServerOptions,
    counters: &Counters,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let (method, range) = parse_request(request);
    let total = body.len() as u64;
    let accept_ranges = if opts.advertise_ranges {
        "Accept-Ranges: bytes\r\n"
    } else {
        ""
    };

    if method.eq_ignore_ascii_case("HEAD") {
        counters.head.fetch_add(1, Ordering::SeqCst);
        if !opts.head_allowed {
            let _ = stream.write_all(
                b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
        let length = if opts.head_content_length {
            format!("Content-Length: {}\r\n", total)
        } else {
            String::new()
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\n{}{}Connection: close\r\n\r\n",
            length, accept_ranges
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        let ranged = if opts.support_ranges { range } else { None };
        let is_ranged = ranged.is_some();
        let (status, content_range, slice) = match ranged {
            Some((start, end_incl)) => {
                counters.range_get.fetch_add(1, Ordering::SeqCst);
                counters.range_starts.lock().unwrap().push(start);
                if opts.fail_range_start == Some(start) {
                    let _ = stream.write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    );
                    return;
                }
                let end_incl = end_incl.min(total.saturating_sub(1));
                if start >= total || start > end_incl {
                    (
                        "416 Range Not Satisfiable",
                        format!("bytes */{}", total),
                        &body[0..0],
                    )
                } else {
                    let slice = &body[start as usize..=end_incl as usize];
                    (
                        "206 Partial Content",
                        format!("bytes {}-{}/{}", start, end_incl, total),
                        slice,
                    )
                }
            }
            None => {
                counters.full_get.fetch_add(1, Ordering::SeqCst);
                (
                    "200 OK",
                    format!("bytes 0-{}/{}", total.saturating_sub(1), total),
                    body,
                )
            }
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Range: {}\r\n{}Connection: close\r\n\r\n",
            status,
            slice.len(),
            content_range,
            accept_ranges
        );
        let sent = match opts.truncate_range_body {
            Some(limit) if is_ranged => &slice[..limit.min(slice.len())],
            _ => slice,
        };
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(sent);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}

/// Returns (method, optional (start, end_inclusive) for Range: bytes=X-Y).
fn parse_request(request: &str) -> (&str, Option<(u64, u64)>) {
    let mut method = "";
    let mut range = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            method = line.split_whitespace().next().unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if !name.trim().eq_ignore_ascii_case("range") {
                continue;
            }
            let value = value.trim();
            if let Some(spec) = value.strip_prefix("bytes=") {
                if let Some((a, b)) = spec.trim().split_once('-') {
                    let start = a.trim().parse::<u64>().unwrap_or(0);
                    let end_incl = b.trim().parse::<u64>().unwrap_or(u64::MAX);
                    range = Some((start, end_incl));
                }
            }
        }
    }
    (method, range)
}
