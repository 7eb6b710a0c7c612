//! Minimal HTTP/1.1 server that records GET request targets for ping tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct PingServerOptions {
    /// Status line sent for every request.
    pub status: &'static str,
    /// Sleep before answering (simulates an unresponsive endpoint).
    pub delay: Option<Duration>,
}

impl Default for PingServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            delay: None,
        }
    }
}

/// Handle to a running server: base URL plus the request paths seen so far.
pub struct PingServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl PingServer {
    /// Request targets (path + query) received, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn start() -> PingServer {
    start_with_options(PingServerOptions::default())
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start_with_options(opts: PingServerOptions) -> PingServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &seen, opts));
        }
    });
    PingServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, seen: &Mutex<Vec<String>>, opts: PingServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("").to_string();
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    seen.lock().unwrap().push(target);
    if let Some(d) = opts.delay {
        thread::sleep(d);
    }
    let body = "ok";
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        opts.status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
