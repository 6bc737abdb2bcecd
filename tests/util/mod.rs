use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use company_search::config::Config;
use company_search::grid::sheet_file::{SheetDocument, SheetRow};
use company_search::model::types::CellValue;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Assert that the captured log output contains the provided substring.
    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

#[allow(dead_code)]
struct TestWriter(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Config that never waits and never picks up a real key.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        api_key: None,
        fallback_delay_ms: 0,
        request_timeout_ms: 5_000,
        ..Config::default()
    }
}

/// Write a sheet document with the given first-column values.
#[allow(dead_code)]
pub fn write_sheet(path: &Path, values: Vec<CellValue>) {
    let doc = SheetDocument {
        rows: values
            .into_iter()
            .map(|value| SheetRow { value, style: None })
            .collect(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

#[allow(dead_code)]
pub fn read_sheet(path: &Path) -> SheetDocument {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[allow(dead_code)]
pub fn sheet_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("companies.json")
}

/// Chat-completion body with `content` as the assistant message.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
    .to_string()
}

/// Minimal HTTP endpoint answering every request with a fixed response.
#[allow(dead_code)]
pub struct MockCompletionServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl MockCompletionServer {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = requests.clone();
        let body = body.into();

        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let raw = read_request(&mut stream).await;
                captured.lock().unwrap().push(raw);
                let response = format!(
                    "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            url: format!("http://{addr}/v1/chat/completions"),
            requests,
            handle,
        }
    }

    /// Raw requests received so far (head and body).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[allow(dead_code)]
fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

#[allow(dead_code)]
async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}
