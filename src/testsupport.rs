//! Shared test fixtures: temp dirs, one-shot HTTP servers, and a scripted
//! calculator service.

use crate::api::{CalcService, HistoryEntry};
use crate::error::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("calcdesk-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Serve exactly one HTTP response and capture the raw request text.
///
/// Returns the base URL to point a client at and a handle resolving to the
/// request (request line, headers, and body).
pub async fn serve_once(
    status: u16,
    content_type: &str,
    body: &str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason_phrase(status),
        body.len(),
    );
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let raw = read_request(&mut stream).await;
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
        raw
    });
    (format!("http://{addr}"), handle)
}

/// [`serve_once`] with a JSON content type.
pub async fn serve_json_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    serve_once(status, "application/json", body).await
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Ok(n) = stream.read(&mut chunk).await else {
            break;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let body_len = content_length(&text[..header_end]);
            if buf.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}

/// Scripted reply for one [`MockCalcService`] call.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Ok(T),
    /// Fail with an HTTP status error carrying this code.
    Fail(u16),
}

impl<T> MockReply<T> {
    fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Fail(code) => Err(ApiError::Status {
                code,
                body: "scripted failure".to_string(),
            }),
        }
    }
}

/// In-memory [`CalcService`] with scripted replies and call counters.
///
/// Unscripted `evaluate` calls fail with status 500; unscripted history reads
/// return the current `history` contents.
#[derive(Debug, Default)]
pub struct MockCalcService {
    evaluations: Mutex<VecDeque<MockReply<String>>>,
    history_replies: Mutex<VecDeque<MockReply<Vec<HistoryEntry>>>>,
    history: Mutex<Vec<HistoryEntry>>,
    clear_fails: Mutex<bool>,
    pub evaluate_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    pub last_expression: Mutex<Option<String>>,
    pub last_query: Mutex<Option<String>>,
}

impl MockCalcService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one evaluation reply.
    pub fn push_evaluation(&self, reply: MockReply<String>) {
        self.evaluations.lock().unwrap().push_back(reply);
    }

    /// Queue one history/search reply, taking precedence over `history`.
    pub fn push_history_reply(&self, reply: MockReply<Vec<HistoryEntry>>) {
        self.history_replies.lock().unwrap().push_back(reply);
    }

    /// Replace the stored history returned by unscripted reads.
    pub fn set_history(&self, entries: Vec<HistoryEntry>) {
        *self.history.lock().unwrap() = entries;
    }

    /// Make `clear_history` fail with status 500.
    pub fn fail_clear(&self) {
        *self.clear_fails.lock().unwrap() = true;
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn next_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        if let Some(reply) = self.history_replies.lock().unwrap().pop_front() {
            return reply.into_result();
        }
        Ok(self.history.lock().unwrap().clone())
    }
}

#[async_trait]
impl CalcService for MockCalcService {
    async fn evaluate(&self, expression: &str) -> Result<String, ApiError> {
        self.evaluate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_expression.lock().unwrap() = Some(expression.to_string());
        self.evaluations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockReply::Fail(500))
            .into_result()
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.next_history()
    }

    async fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        if let Some(reply) = self.history_replies.lock().unwrap().pop_front() {
            return reply.into_result();
        }
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.expression.contains(query))
            .cloned()
            .collect())
    }

    async fn clear_history(&self) -> Result<(), ApiError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if *self.clear_fails.lock().unwrap() {
            return Err(ApiError::Status {
                code: 500,
                body: "scripted failure".to_string(),
            });
        }
        self.history.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_resolves_children() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.child("nested.txt");
        fs::write(&file, "hello").unwrap();
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[test]
    fn content_length_is_case_insensitive() {
        assert_eq!(content_length("POST / HTTP/1.1\r\ncontent-length: 12"), 12);
        assert_eq!(content_length("GET / HTTP/1.1\r\nHost: x"), 0);
    }

    #[tokio::test]
    async fn mock_search_filters_stored_history() {
        let mock = MockCalcService::new();
        mock.set_history(vec![HistoryEntry::new("1+1", "2"), HistoryEntry::new("sqrt(4)", "2")]);
        let hits = mock.search_history("sqrt").await.unwrap();
        assert_eq!(hits, vec![HistoryEntry::new("sqrt(4)", "2")]);
        assert_eq!(MockCalcService::count(&mock.search_calls), 1);
    }
}
