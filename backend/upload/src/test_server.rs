//! In-process `/analyze` server for exercising the client end to end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

#[derive(Debug, Clone)]
pub struct CapturedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub fields: Vec<CapturedField>,
    /// Loader state seen while the request was being handled.
    pub loader_visible: Option<bool>,
}

impl CapturedRequest {
    pub fn field(&self, name: &str) -> Option<&CapturedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
    loader: Option<Arc<AtomicBool>>,
}

pub struct TestServer {
    pub url: String,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl TestServer {
    /// Serve a JSON reply for every `POST /analyze`.
    pub async fn json(status: u16, body: &str, loader: Option<Arc<AtomicBool>>) -> Self {
        Self::spawn(status, "application/json", body, loader).await
    }

    /// Serve a non-JSON reply.
    pub async fn html(status: u16, body: &str) -> Self {
        Self::spawn(status, "text/html", body, None).await
    }

    async fn spawn(
        status: u16,
        content_type: &'static str,
        body: &str,
        loader: Option<Arc<AtomicBool>>,
    ) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            status: StatusCode::from_u16(status).unwrap(),
            content_type,
            body: body.to_string(),
            seen: Arc::clone(&seen),
            loader,
        };
        let app = Router::new()
            .route("/analyze", post(analyze))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn analyze(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    let loader_visible = state.loader.as_ref().map(|flag| flag.load(Ordering::SeqCst));

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        fields.push(CapturedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    state.seen.lock().unwrap().push(CapturedRequest {
        fields,
        loader_visible,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, state.content_type)],
        state.body,
    )
        .into_response()
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
