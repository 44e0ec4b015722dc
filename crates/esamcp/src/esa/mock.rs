//! In-memory [`EsaApi`] that records requests and replays canned responses

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use esamcp_core::error::OperationError;
use serde_json::{json, Value};

use super::{ApiRequest, ApiResponse, EsaApi, FetchedFile, Method};

#[derive(Debug, Default)]
pub struct MockApi {
    responses: Mutex<VecDeque<Result<ApiResponse, OperationError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    files: Mutex<HashMap<String, Result<FetchedFile, OperationError>>>,
    fetched: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next API request.
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a transport failure for the next API request.
    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(OperationError::message(message)));
        self
    }

    pub fn file(self, url: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.files.lock().unwrap().insert(
            url.to_string(),
            Ok(FetchedFile {
                content_type: content_type.to_string(),
                content_length: Some(bytes.len() as u64),
                bytes: bytes.to_vec(),
            }),
        );
        self
    }

    pub fn file_result(self, url: &str, result: Result<FetchedFile, OperationError>) -> Self {
        self.files.lock().unwrap().insert(url.to_string(), result);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, index: usize) -> ApiRequest {
        self.requests()
            .get(index)
            .cloned()
            .unwrap_or_else(|| panic!("no request at index {index}"))
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl EsaApi for MockApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OperationError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OperationError::message("unexpected request")))
    }

    async fn fetch(&self, url: &str) -> Result<FetchedFile, OperationError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.files
            .lock()
            .unwrap()
            .remove(url)
            .unwrap_or_else(|| Err(OperationError::message("unexpected fetch")))
    }
}

/// Assert the method and path of a recorded request.
pub fn assert_request(request: &ApiRequest, method: Method, path: &str) {
    assert_eq!(request.method, method, "method of {}", request.path);
    assert_eq!(request.path, path);
}

/// A post as esa returns it.
pub fn post_fixture(number: u64, category: Option<&str>, wip: bool) -> Value {
    json!({
        "number": number,
        "name": "authentication.md",
        "full_name": format!("{}/authentication.md #api", category.unwrap_or_default()),
        "wip": wip,
        "body_md": "# Authentication",
        "body_html": "<h1>Authentication</h1>",
        "created_at": "2024-01-01T00:00:00+09:00",
        "updated_at": "2024-01-02T00:00:00+09:00",
        "message": "Create post.",
        "url": format!("https://docs.esa.io/posts/{number}"),
        "kind": "stock",
        "tags": ["api"],
        "category": category,
        "revision_number": 1,
        "created_by": {"name": "Alice", "screen_name": "alice", "icon": "https://img.esa.io/a.png"},
        "updated_by": {"name": "Alice", "screen_name": "alice", "icon": "https://img.esa.io/a.png"},
        "stargazers_count": 1,
        "watchers_count": 1,
        "comments_count": 0,
        "tasks_count": 0,
        "done_tasks_count": 0,
        "star": false,
        "watch": false
    })
}
