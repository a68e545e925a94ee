//! In-process mock HTTP server for CLI integration tests
//!
//! Serves canned responses keyed by request path (query excluded) and
//! records every request so tests can assert on what the client sent.
//! Routes hold a queue of responses: each request pops one until a single
//! response remains, which then answers repeatedly.

use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl Response {
    pub fn json(body: &str) -> Self {
        Response {
            status: 200,
            content_type: "application/json".to_string(),
            body: body.as_bytes().to_vec(),
            headers: Vec::new(),
        }
    }

    pub fn raw(body: &[u8]) -> Self {
        Response {
            status: 200,
            content_type: "application/octet-stream".to_string(),
            body: body.to_vec(),
            headers: Vec::new(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Response {
            status: 302,
            content_type: "text/plain".to_string(),
            body: Vec::new(),
            headers: vec![("Location".to_string(), location.to_string())],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

pub struct MockServer {
    addr: SocketAddr,
    routes: Arc<Mutex<HashMap<String, VecDeque<Response>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let routes: Arc<Mutex<HashMap<String, VecDeque<Response>>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream, &thread_routes, &thread_requests);
            }
        });

        MockServer {
            addr,
            routes,
            requests,
        }
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Route a path to one sticky response
    pub fn route(&self, path: &str, response: Response) -> &Self {
        self.route_seq(path, vec![response])
    }

    /// Route a path to a sequence of responses; the last one is sticky
    pub fn route_seq(&self, path: &str, responses: Vec<Response>) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), responses.into());
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(
    stream: TcpStream,
    routes: &Arc<Mutex<HashMap<String, VecDeque<Response>>>>,
    requests: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() || request_line.is_empty() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("");
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.to_string(), String::new()),
    };

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }

    requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        query,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let response = {
        let mut routes = routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    };
    let response = response.unwrap_or(Response {
        status: 404,
        content_type: "text/plain".to_string(),
        body: b"not found".to_vec(),
        headers: Vec::new(),
    });

    let mut stream = reader.into_inner();
    let mut head = format!(
        "HTTP/1.1 {} MOCK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
    let _ = stream.flush();
}
