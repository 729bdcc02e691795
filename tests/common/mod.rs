#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use duty_roster_client::api::{ExportPayload, HttpTransport, TransportResponse};
use duty_roster_client::download::DownloadSink;
use duty_roster_client::error::{ApiError, ExportError};
use duty_roster_client::BackendClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

pub type Reply = Result<TransportResponse, ApiError>;

/// Scripted stand-in for the backend.
///
/// Each call first takes from the queue of its method, then falls back to
/// the first route whose method and path prefix match, then answers 404.
#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    queued: Mutex<HashMap<Method, VecDeque<Reply>>>,
    routes: Mutex<Vec<(Method, String, Reply)>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(FakeTransport::default())
    }

    pub fn queue(&self, method: Method, reply: Reply) {
        self.queued
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(reply);
    }

    pub fn queue_json(&self, method: Method, status: u16, body: Value) {
        self.queue(method, Ok(TransportResponse::json(status, body)));
    }

    pub fn route(&self, method: Method, path_prefix: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .push((method, path_prefix.to_string(), reply));
    }

    pub fn route_json(&self, method: Method, path_prefix: &str, body: Value) {
        self.route(method, path_prefix, Ok(TransportResponse::json(200, body)));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, method: Method) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn answer(&self, call: Call) -> Reply {
        let method = call.method;
        let path = call.path.clone();
        self.calls.lock().unwrap().push(call);

        if let Some(reply) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&method)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }

        let routes = self.routes.lock().unwrap();
        match routes
            .iter()
            .find(|(m, prefix, _)| *m == method && path.starts_with(prefix.as_str()))
        {
            Some((_, _, reply)) => reply.clone(),
            None => Ok(TransportResponse::json(404, json!({"detail": "Not Found"}))),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Reply {
        self.answer(Call {
            method: Method::Get,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Reply {
        self.answer(Call {
            method: Method::Post,
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn delete(&self, path: &str) -> Reply {
        self.answer(Call {
            method: Method::Delete,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        })
    }
}

pub fn client_for(fake: &Arc<FakeTransport>) -> BackendClient {
    BackendClient::new(fake.clone())
}

/// Keeps every payload it is asked to save.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub saved: Arc<Mutex<Vec<ExportPayload>>>,
}

impl DownloadSink for RecordingSink {
    fn save(&self, payload: &ExportPayload) -> Result<PathBuf, ExportError> {
        self.saved.lock().unwrap().push(payload.clone());
        Ok(PathBuf::from("downloads").join(&payload.filename))
    }
}

/// Refuses every save, like a read-only download folder.
pub struct FailingSink;

impl DownloadSink for FailingSink {
    fn save(&self, payload: &ExportPayload) -> Result<PathBuf, ExportError> {
        Err(ExportError::Write {
            path: PathBuf::from(&payload.filename),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}
