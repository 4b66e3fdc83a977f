#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use jiff::civil::date;
use serde_json::json;
use tasqe_core::{
    client::{Endpoint, TransportRequest, TransportResponse},
    ClientConfig, ModelTransport, Organizer, OrganizerBuilder, Result,
};
use tempfile::TempDir;

/// Transport that replays canned responses and records every request.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<TransportResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::default(),
        })
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelTransport for FakeTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TransportResponse {
                status: 500,
                body: "script exhausted".to_string(),
            }))
    }
}

/// Free-text completion envelope carrying `outline`.
pub fn outline_response(outline: &str) -> TransportResponse {
    TransportResponse::ok(
        json!({ "choices": [{ "message": { "role": "assistant", "content": outline } }] })
            .to_string(),
    )
}

/// Structured completion envelope whose last `output_text` is `text`.
pub fn structured_response(text: &str) -> TransportResponse {
    TransportResponse::ok(
        json!({
            "output": [
                { "type": "reasoning", "summary": [] },
                { "type": "message", "content": [{ "type": "output_text", "text": text }] }
            ]
        })
        .to_string(),
    )
}

/// A single-category document as the model would return it.
pub fn document_json(category: &str, tasks: &[&str]) -> String {
    let items: Vec<_> = tasks
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "descr": null,
                "time": "30 mins",
                "date": "2025-09-12",
                "done": false,
                "subtasks": null
            })
        })
        .collect();
    json!({ "todo": [{ "name": category, "items": items }] }).to_string()
}

/// In-memory organizer with a credential and a pinned date.
pub async fn create_test_organizer(transport: Arc<FakeTransport>) -> Organizer {
    let organizer = OrganizerBuilder::new()
        .in_memory()
        .with_transport(transport)
        .with_client_config(ClientConfig::new().with_fixed_date(date(2025, 9, 8)))
        .build()
        .await
        .expect("Failed to create organizer");
    organizer
        .set_api_key("sk-test")
        .await
        .expect("Failed to set api key");
    organizer
}

/// SQLite-backed organizer in a temporary directory.
pub async fn create_sqlite_organizer() -> (TempDir, Organizer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("tasqe.db");
    let organizer = OrganizerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_transport(FakeTransport::new(vec![]))
        .build()
        .await
        .expect("Failed to create organizer");
    (temp_dir, organizer)
}
