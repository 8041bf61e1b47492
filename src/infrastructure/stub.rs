//! Local stand-ins for the upstream HTTP APIs, used by unit tests

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::Uri, Json, Router};
use serde_json::{json, Value};

/// Serve `app` on an ephemeral localhost port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Bot API stand-in answering every method with the same `result`
#[derive(Clone)]
pub struct TelegramStub {
    result: Value,
    calls: Arc<Mutex<Vec<String>>>,
}

impl TelegramStub {
    /// Start the stub; returns it with the base URL to hand to `TelegramAdapter::with_api_base`
    pub async fn start(result: Value) -> (Self, String) {
        let stub = Self {
            result,
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new().fallback(answer).with_state(stub.clone());
        let addr = serve(app).await;
        (stub, format!("http://{}", addr))
    }

    /// Request paths received so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

async fn answer(State(stub): State<TelegramStub>, uri: Uri) -> Json<Value> {
    stub.calls.lock().unwrap().push(uri.path().to_string());
    Json(json!({ "ok": true, "result": stub.result }))
}
