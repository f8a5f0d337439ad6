//! HTTP chat API for the order bot.
//!
//! Routes:
//! - `POST /v1/chat` `{user_id, message}` → reply plus an order snapshot
//! - `GET /v1/sessions/:user_id` → the saved conversation state, 404 if none
//! - `GET /health`
//!
//! The binary in `main.rs` loads config, builds the bot and serves [`app`].

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dinebot::{Intent, Money, OrderBot, OrderItem, OrderState, OrderStatus, RunError};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

/// Shared state for all routes.
pub struct AppState {
    pub bot: OrderBot,
}

impl AppState {
    pub fn new(bot: OrderBot) -> Arc<Self> {
        Arc::new(Self { bot })
    }
}

/// Max request body size to buffer (bytes). Larger requests get 413.
const BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

/// Reply of one turn plus the order as it stands afterwards.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Option<Intent>,
    pub status: OrderStatus,
    pub total_cost: Money,
    pub items: Vec<OrderItem>,
    pub order_number: Option<u32>,
}

impl From<&OrderState> for ChatResponse {
    fn from(s: &OrderState) -> Self {
        Self {
            reply: OrderBot::last_reply(s).to_string(),
            intent: s.intent,
            status: s.status,
            total_cost: s.total_cost,
            items: s.order_items.clone(),
            order_number: s.order_number,
        }
    }
}

/// Router with all routes, request logging, tracing and permissive CORS.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chat", post(chat))
        .route("/v1/sessions/:user_id", get(session))
        .layer(middleware::from_fn(log_request))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                info_span!("request", method = %req.method(), uri = %req.uri())
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Logs method, URI and body size at debug, then forwards the request.
async fn log_request(request: Request<Body>, next: Next) -> Result<Response, Response> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|e| (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()).into_response())?;
    tracing::debug!(method = %parts.method, uri = %parts.uri, bytes = bytes.len(), "request");
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(ServerError::BadRequest("user_id must not be empty".into()));
    }
    let out = state.bot.chat(user_id, &req.message).await?;
    tracing::info!(user = %user_id, intent = ?out.intent, status = %out.status, "chat turn");
    Ok(Json(ChatResponse::from(&out)))
}

async fn session(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<OrderState>, ServerError> {
    state
        .bot
        .session(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("no session for user {}", user_id)))
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Run(#[from] RunError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) | ServerError::Run(RunError::EmptyMessage) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Run(e) => {
                tracing::error!(error = %e, "turn failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "error": { "message": self.to_string() } }));
        (status, body).into_response()
    }
}
