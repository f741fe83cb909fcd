use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// A canned HTTP response
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Local stand-in for the NVD API
///
/// Answers one connection per canned response, in order, then stops
/// listening. Request lines are sent back through `requests`.
pub struct NvdServer {
    pub base_url: String,
    pub requests: Receiver<String>,
}

impl NvdServer {
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (sender, requests) = mpsc::channel();

        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }
                let _ = sender.send(request_line.trim_end().to_string());

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.body.len(),
                    response.body
                );
                let _ = stream.write_all(reply.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn received(&self) -> Vec<String> {
        self.requests.try_iter().collect()
    }
}

/// Body of a single-page NVD response
pub fn page_body(page_key: &str, items: &[&str]) -> String {
    format!(
        r#"{{"resultsPerPage": {count}, "startIndex": 0, "totalResults": {count}, "format": "NVD", "version": "2.0", "timestamp": "2024-06-01T00:00:00.000", "{key}": [{items}]}}"#,
        count = items.len(),
        key = page_key,
        items = items.join(", ")
    )
}
