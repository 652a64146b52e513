//! A local stand-in for the persistence service.
//!
//! Serves canned lists on the `/api` routes, accepts every mutation, and
//! records each request so tests can check what the HTTP gateway sent.
//!
//! | Route | Behavior |
//! |-------|----------|
//! | `GET /api/design` | one design with numeric id `7` |
//! | `GET /api/products` | one single product with numeric id `42` and text stock |
//! | `GET /api/category`, `/api/sub`, `/api/factory`, `/api/color` | canned lists |
//! | `GET /api/size` | always `500` |
//! | `POST` | `201` |
//! | `PATCH/DELETE ?id=` | `200`/`204`, or `404` for id [`MISSING_ID`] |

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Id the stub answers `404` for.
pub const MISSING_ID: &str = "missing";

/// One request as the stub received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub id: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubState {
    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// A running stub service, listening on a loopback port.
pub struct StubService {
    addr: SocketAddr,
    state: StubState,
}

impl StubService {
    /// Bind to an ephemeral loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = StubState::default();
        let app = Router::new()
            .route(
                "/api/design",
                get(list).post(mutate).patch(mutate).delete(mutate),
            )
            .route(
                "/api/products",
                get(list).post(mutate).patch(mutate).delete(mutate),
            )
            .route("/api/category", get(list))
            .route("/api/sub", get(list))
            .route("/api/factory", get(list))
            .route("/api/color", get(list))
            .route("/api/size", get(list))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Base URL to configure the gateway with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests that changed something (everything but `GET`).
    #[must_use]
    pub fn mutations(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn list(State(state): State<StubState>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(RecordedRequest {
        method: Method::GET,
        path: uri.path().to_string(),
        id: None,
        authorization: authorization(&headers),
        body: None,
    });

    canned(uri.path()).map_or_else(
        || StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        |body| Json(body).into_response(),
    )
}

async fn mutate(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
    body: Bytes,
) -> StatusCode {
    state.record(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        id: query.id.clone(),
        authorization: authorization(&headers),
        body: serde_json::from_slice(&body).ok(),
    });

    match (method, query.id.as_deref()) {
        (_, Some(MISSING_ID)) => StatusCode::NOT_FOUND,
        (Method::POST, None) => StatusCode::CREATED,
        (Method::PATCH, Some(_)) => StatusCode::OK,
        (Method::DELETE, Some(_)) => StatusCode::NO_CONTENT,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn canned(path: &str) -> Option<Value> {
    let body = match path {
        "/api/design" => json!([
            { "id": 7, "title": "Wave", "img": ["https://cdn.test/wave.png"], "cat": ["Summer", "Beach"] }
        ]),
        "/api/products" => json!([
            {
                "id": 42,
                "title": "Tee",
                "description": "<p>Cotton</p>",
                "price": "20.00",
                "discount": null,
                "img": ["https://cdn.test/tee.png"],
                "category": "Shirts",
                "sub": "Summer",
                "factory": "Harbor Mill",
                "type": "single",
                "stock": "5"
            }
        ]),
        "/api/category" => json!([
            { "id": 1, "name": "Shirts" },
            { "id": 2, "name": "Hoodies" }
        ]),
        "/api/sub" => json!([{ "id": 1, "name": "Summer" }]),
        "/api/factory" => json!([{ "id": 1, "name": "Harbor Mill" }]),
        "/api/color" => json!([
            { "id": 11, "title": "Black", "code": "#000000", "cat": ["Shirts", "Hoodies"] },
            { "id": 12, "title": "Navy", "code": "#1f2a44" }
        ]),
        _ => return None,
    };
    Some(body)
}
