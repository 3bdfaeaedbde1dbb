//! Minimal HTTP/1.1 server that serves canned pages and audio bodies for integration tests.
//!
//! Routes map a request path to either a body (200) or a redirect (302). Unknown
//! paths get 404. HEAD returns the same headers as GET without the body.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    Body(Vec<u8>),
    Redirect(String),
}

#[derive(Debug, Default, Clone)]
pub struct Site {
    routes: HashMap<String, Route>,
}

impl Site {
    pub fn page(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(path.to_string(), Route::Body(body.into()));
        self
    }

    pub fn redirect(mut self, path: &str, location: &str) -> Self {
        self.routes
            .insert(path.to_string(), Route::Redirect(location.to_string()));
        self
    }
}

/// A running server. Requests seen so far are kept as "METHOD /path".
pub struct SiteServer {
    pub base_url: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl SiteServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(site: Site) -> SiteServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let site = Arc::new(site);
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_srv = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let site = Arc::clone(&site);
            let log = Arc::clone(&log_srv);
            thread::spawn(move || handle(stream, &site, &log));
        }
    });
    SiteServer {
        base_url: format!("http://127.0.0.1:{}", port),
        log,
    }
}

fn handle(mut stream: std::net::TcpStream, site: &Site, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    log.lock().unwrap().push(format!("{} {}", method, path));

    let (status, extra, body) = match site.routes.get(&path) {
        Some(Route::Body(body)) => ("200 OK", String::new(), body.clone()),
        Some(Route::Redirect(location)) => (
            "302 Found",
            format!("Location: {}\r\n", location),
            Vec::new(),
        ),
        None => ("404 Not Found", String::new(), b"not found".to_vec()),
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        body.len(),
        extra
    );
    let _ = stream.write_all(head.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&body);
    }
}
