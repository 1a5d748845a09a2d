//! HTTP API gateway for CampusChat.
//!
//! Exposes the chat endpoint (`POST /chat`, alias `POST /api/chat`) and
//! health checks. Chat always answers `200 {"reply": ...}`: failures are
//! reported in the reply text, never through the status code.
//!
//! Built on Axum for high performance async HTTP.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{Instrument, info, info_span, warn};

use campuschat_config::{AppConfig, GatewayConfig};
use campuschat_core::message::{ChatReply, ChatRequest};
use campuschat_router::{MessageRouter, Route};

/// Shared application state for the gateway. Read-only after startup.
pub struct GatewayState {
    pub router: MessageRouter,
}

pub type SharedState = Arc<GatewayState>;

/// Largest chat body read. Longer bodies are answered like unreadable ones.
pub const CHAT_BODY_LIMIT: usize = 1024 * 1024;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS (any origin unless `allowed_origins` is set)
/// - HTTP trace logging
///
/// Chat bodies are capped at [`CHAT_BODY_LIMIT`] inside the handler.
pub fn build_router(state: SharedState, gateway: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/upstream", get(upstream_health_handler))
        .route("/chat", post(chat_handler))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
        .layer(cors_layer(&gateway.allowed_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS policy: any origin when `origins` is empty, otherwise exactly those.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(parsed))
}

/// Start the gateway HTTP server.
///
/// Fails before binding if no API key is configured.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = campuschat_providers::build_from_config(&config)?;
    let router = MessageRouter::from_config(&config, provider);
    router.warn_shadowed_rules();

    let rule_count = router.rules().len();
    let state = Arc::new(GatewayState { router });
    let app = build_router(state, &config.gateway);

    let addr = config.gateway.addr();
    info!(addr = %addr, rules = rule_count, model = %config.gemini.model, "Gateway starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct UpstreamHealthResponse {
    status: &'static str,
}

/// Probes the fallback provider. 503 when it cannot be reached.
async fn upstream_health_handler(
    State(state): State<SharedState>,
) -> (StatusCode, Json<UpstreamHealthResponse>) {
    if state.router.upstream_healthy().await {
        (StatusCode::OK, Json(UpstreamHealthResponse { status: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(UpstreamHealthResponse {
                status: "unreachable",
            }),
        )
    }
}

/// The body is read by hand so an oversized or malformed payload degrades
/// to an empty message instead of a 4xx rejection.
async fn chat_handler(State(state): State<SharedState>, body: Body) -> Json<ChatReply> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("chat", %request_id);

    let request = match axum::body::to_bytes(body, CHAT_BODY_LIMIT).await {
        Ok(bytes) => ChatRequest::from_body(&bytes),
        Err(e) => {
            span.in_scope(|| warn!(error = %e, limit = CHAT_BODY_LIMIT, "Chat body unreadable"));
            ChatRequest::default()
        }
    };

    let routed = state
        .router
        .route(&request.message)
        .instrument(span.clone())
        .await;

    span.in_scope(|| match routed.route {
        Route::Rule(rule) => info!(route = "rule", rule, "Chat reply sent"),
        other => info!(route = ?other, reply_len = routed.reply.len(), "Chat reply sent"),
    });

    Json(ChatReply::new(routed.reply))
}
