use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// The binary with every ambient setting that could leak into a test removed.
pub fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("news_reader");
    for var in [
        "NEWS_API_KEY",
        "NEWS_API_BASE_URL",
        "NEWS_COUNTRY",
        "NEWS_READER_CONFIG",
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_PROXY", "127.0.0.1").env("RUST_LOG", "info");
    cmd
}

/// A loopback server that answers exactly one request.
pub struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub fn start(status_line: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let handle = thread::spawn(move || {
            let (mut socket, _) = listener.accept().expect("accept");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).expect("write response");
            String::from_utf8_lossy(&head).into_owned()
        });
        Self {
            base_url: format!("http://{addr}/v2"),
            handle,
        }
    }

    /// The request line the server received.
    pub fn request_line(self) -> String {
        let head = self.handle.join().expect("server thread");
        head.lines().next().unwrap_or_default().to_string()
    }
}

pub fn ok_body(titles: &[&str]) -> String {
    let articles: Vec<serde_json::Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            serde_json::json!({
                "source": {"id": null, "name": "The Example.com"},
                "author": null,
                "title": title,
                "description": format!("About {title}"),
                "url": format!("https://example.com/{i}"),
                "urlToImage": null,
                "publishedAt": "2025-05-06T14:30:00Z",
                "content": null
            })
        })
        .collect();
    serde_json::json!({
        "status": "ok",
        "totalResults": titles.len(),
        "articles": articles
    })
    .to_string()
}
