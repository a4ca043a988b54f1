// In-memory transport for tests
// Answers from a route table, records every call, and can hold a route
// back until the test releases it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Method;
use serde_json::Value;
use tokio::sync::Notify;

use super::transport::{ApiRequest, ApiResult, Transport};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub request: ApiRequest,
}

impl RecordedCall {
    pub fn json_body(&self) -> Option<Value> {
        self.request
            .body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), ApiResult>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, method: Method, path: &str, result: ApiResult) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), result);
    }

    pub fn ok_json(&self, method: Method, path: &str, body: Value) {
        self.route(method, path, ApiResult::response(true, body.to_string()));
    }

    /// Hold responses for `path` until the returned handle is notified
    pub fn gate(&self, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(path.to_string(), notify.clone());
        notify
    }

    /// Stop holding new calls for `path`; calls already waiting keep waiting
    pub fn ungate(&self, path: &str) {
        self.gates.lock().unwrap().remove(path);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn fetch(&self, path: &str, request: ApiRequest) -> ApiResult {
        let key = (request.method.clone(), path.to_string());
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            request,
        });

        // the answer is fixed when the call starts, not when the gate opens
        let result = self
            .routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| ApiResult::failure(format!("no route for {} {}", key.0, key.1)));

        let gate = self.gates.lock().unwrap().get(path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        result
    }
}
