//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one configurable response (status, body, optional Location) to every GET
//! and records the raw request heads so tests can check what the client sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Response {
    status: u16,
    body: Vec<u8>,
    location: Option<String>,
}

#[derive(Debug, Default)]
struct Shared {
    response: Option<Response>,
    requests: Vec<String>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct HomepageServer {
    base_url: String,
    shared: Arc<Mutex<Shared>>,
}

impl HomepageServer {
    /// Start serving `body` with status 200.
    pub fn start(body: &[u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let shared = Arc::new(Mutex::new(Shared {
            response: Some(Response {
                status: 200,
                body: body.to_vec(),
                location: None,
            }),
            requests: Vec::new(),
        }));
        let server_shared = Arc::clone(&shared);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let shared = Arc::clone(&server_shared);
                thread::spawn(move || handle(stream, &shared));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            shared,
        }
    }

    /// URL for `path` on this server (path should start with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn set_body(&self, body: &[u8]) {
        self.respond(200, body, None);
    }

    pub fn set_status(&self, status: u16) {
        self.respond(status, b"error", None);
    }

    pub fn set_redirect(&self, location: &str) {
        self.respond(301, b"", Some(location.to_string()));
    }

    fn respond(&self, status: u16, body: &[u8], location: Option<String>) {
        self.shared.lock().unwrap().response = Some(Response {
            status,
            body: body.to_vec(),
            location,
        });
    }

    pub fn request_count(&self) -> usize {
        self.shared.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<String> {
        self.shared.lock().unwrap().requests.last().cloned()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, shared: &Mutex<Shared>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&head).into_owned();
    let response = {
        let mut guard = shared.lock().unwrap();
        guard.requests.push(request);
        guard.response.clone()
    };
    let Some(response) = response else {
        return;
    };
    let location = response
        .location
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.body.len(),
        location
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
}
