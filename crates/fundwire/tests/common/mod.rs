//! In-process mock of the Dwolla API for integration tests.

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use fundwire::{DwollaClient, Payments};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// JSON body, the raw text as a string for non-JSON bodies, `Null` when empty.
    pub body: Value,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    location: Option<String>,
    body: Value,
}

impl Reply {
    /// `201 Created` with a `Location` header and no body.
    pub fn created(location: &str) -> Self {
        Self {
            status: 201,
            location: Some(location.to_string()),
            body: Value::Null,
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            location: None,
            body,
        }
    }

    /// A Dwolla error document.
    pub fn error(status: u16, code: &str, message: &str) -> Self {
        Self::json(status, json!({ "code": code, "message": message }))
    }
}

#[derive(Default)]
struct Inner {
    requests: Mutex<Vec<Recorded>>,
    routes: Mutex<HashMap<(Method, String), Reply>>,
    token_lifetime: AtomicU64,
    tokens_issued: AtomicU64,
}

type Shared = Arc<Inner>;

/// Mock Dwolla server bound to an ephemeral local port.
pub struct MockDwolla {
    pub base_url: String,
    shared: Shared,
}

impl MockDwolla {
    pub async fn start() -> Self {
        let shared: Shared = Arc::new(Inner::default());
        shared.token_lifetime.store(3600, Ordering::SeqCst);

        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }

    /// Answer `method path` with `reply` from now on.
    pub fn on(&self, method: Method, path: &str, reply: Reply) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
    }

    /// Lifetime in seconds of tokens issued from now on.
    pub fn set_token_lifetime(&self, seconds: u64) {
        self.shared.token_lifetime.store(seconds, Ordering::SeqCst);
    }

    pub fn client(&self) -> DwollaClient {
        DwollaClient::with_base_url(&self.base_url, "test-key", "test-secret")
    }

    pub fn payments(&self) -> Payments {
        Payments::new(self.client())
    }

    /// API requests received, excluding token requests.
    pub fn requests(&self) -> Vec<Recorded> {
        self.all_requests()
            .into_iter()
            .filter(|r| r.path != "/token")
            .collect()
    }

    pub fn token_requests(&self) -> Vec<Recorded> {
        self.all_requests()
            .into_iter()
            .filter(|r| r.path == "/token")
            .collect()
    }

    fn all_requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let text = String::from_utf8_lossy(&body).to_string();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    let path = uri.path().to_string();

    shared.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers,
        body,
    });

    if method == Method::POST && path == "/token" {
        let issued = shared.tokens_issued.fetch_add(1, Ordering::SeqCst) + 1;
        let lifetime = shared.token_lifetime.load(Ordering::SeqCst);
        return Json(json!({
            "access_token": format!("token-{issued}"),
            "token_type": "bearer",
            "expires_in": lifetime
        }))
        .into_response();
    }

    let reply = shared.routes.lock().unwrap().get(&(method, path)).cloned();
    let reply = reply.unwrap_or_else(|| Reply::error(404, "NotFound", "The requested resource was not found."));

    let status = StatusCode::from_u16(reply.status).unwrap();
    let mut response = if reply.body.is_null() {
        status.into_response()
    } else {
        (status, Json(reply.body)).into_response()
    };
    if let Some(location) = reply.location {
        response
            .headers_mut()
            .insert(header::LOCATION, HeaderValue::from_str(&location).unwrap());
    }
    response
}

/// Captured `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture error-level events on this thread until the guard drops.
pub fn capture_errors() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
