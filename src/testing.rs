//! In-memory transport for unit tests

use crate::error::{Error, Result};
use crate::http::{HttpRequest, RawResponse, ServiceClient, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Endpoint used by [`client`]
pub(crate) const ENDPOINT: &str = "https://api.example.com/v1/project";

/// Replays queued responses and records every request
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_json(&self, status: u16, body: &Value) {
        self.push(Ok(RawResponse::new(status, body.to_string())));
    }

    pub(crate) fn push_empty(&self, status: u16) {
        self.push(Ok(RawResponse::new(status, "")));
    }

    pub(crate) fn push_error(&self, err: Error) {
        self.push(Err(err));
    }

    fn push(&self, response: Result<RawResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no queued response")))
    }
}

/// Service client over a fake transport
pub(crate) fn client(fake: &Arc<FakeTransport>) -> ServiceClient {
    ServiceClient::new(fake.clone(), ENDPOINT)
}
