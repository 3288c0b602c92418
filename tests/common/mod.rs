//! In-process HTTP server serving canned responses.
#![allow(dead_code)]
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};

pub struct Server {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Server {
    /// Serve requests in a background thread.
    ///
    /// `handler` gets the request target (path and query) and returns a body,
    /// or [None] for a 404.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Option<Vec<u8>> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(s) => s,
                    Err(_) => break,
                };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }

                // drain headers
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" => break,
                        Ok(_) => (),
                    }
                }

                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();
                log.lock().unwrap().push(target.clone());

                let (status, body) = match handler(&target) {
                    Some(body) => ("200 OK", body),
                    None => ("404 Not Found", b"not found".to_vec()),
                };
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            }
        });

        Self {
            base: format!("http://{}", addr),
            requests,
        }
    }

    /// targets of received requests, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Get the value of a query parameter of a request target.
pub fn query_param(target: &str, key: &str) -> Option<String> {
    let url = url::Url::parse(&format!("http://localhost{}", target)).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn gzipped(lines: &[&str]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    for line in lines {
        enc.write_all(line.as_bytes()).unwrap();
        enc.write_all(b"\n").unwrap();
    }
    enc.finish().unwrap()
}

/// A fake datasets-server for a single `default` config holding `rows` in its `train` split.
///
/// `/opus.txt.gz` serves `opus` if provided.
pub fn hub_handler(
    rows: Vec<Value>,
    opus: Option<Vec<u8>>,
) -> impl Fn(&str) -> Option<Vec<u8>> + Send + 'static {
    move |target: &str| {
        if target.starts_with("/splits") {
            let body = json!({
                "splits": [
                    {"dataset": query_param(target, "dataset"), "config": "default", "split": "test"},
                    {"dataset": query_param(target, "dataset"), "config": "default", "split": "train"}
                ],
                "pending": [],
                "failed": []
            });
            return Some(body.to_string().into_bytes());
        }
        if target.starts_with("/rows") {
            if query_param(target, "config").as_deref() != Some("default")
                || query_param(target, "split").as_deref() != Some("train")
            {
                return None;
            }
            let offset: usize = query_param(target, "offset")?.parse().ok()?;
            let length: usize = query_param(target, "length")?.parse().ok()?;
            let page: Vec<Value> = rows
                .iter()
                .enumerate()
                .skip(offset)
                .take(length)
                .map(|(idx, row)| json!({"row_idx": idx, "row": row, "truncated_cells": []}))
                .collect();
            let body = json!({
                "features": [],
                "rows": page,
                "num_rows_total": rows.len(),
                "num_rows_per_page": 100,
                "partial": false
            });
            return Some(body.to_string().into_bytes());
        }
        if target.starts_with("/opus.txt.gz") {
            return opus.clone();
        }
        None
    }
}
