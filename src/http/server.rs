//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the search handler on every path
//! - Wire up middleware (request ID, tracing)
//! - Answer CORS preflight directly
//! - Hand searches to the dispatcher and shape its result
//! - Attach CORS headers to every response

use axum::{
    body::Body,
    extract::State,
    http::{header::ORIGIN, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::{read_search_input, request_id, UuidRequestId};
use crate::http::response::SearchReply;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::security::CorsPolicy;
use crate::upstream::HttpUpstreamClient;

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid allowed origin: {0}")]
    AllowedOrigin(#[from] axum::http::header::InvalidHeaderValue),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub cors: CorsPolicy,
    pub max_body_bytes: usize,
}

/// HTTP server for the search proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let client = HttpUpstreamClient::new(&config.upstreams.user_agent)?;
        let dispatcher = Arc::new(Dispatcher::from_config(&config.upstreams, client));

        match dispatcher.pool() {
            Ok(pool) => tracing::info!(
                upstreams = pool.len(),
                max_attempts = dispatcher.policy().max_attempts,
                attempt_timeout_ms = dispatcher.policy().attempt_timeout.as_millis() as u64,
                "Upstream pool ready"
            ),
            Err(e) => tracing::warn!(error = %e, "No usable upstream pool; searches will fail"),
        }

        let state = AppState {
            dispatcher,
            cors: CorsPolicy::new(&config.cors.allowed_origin)?,
            max_body_bytes: config.limits.max_body_bytes,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri()
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id());

        Router::new()
            .route("/", any(search_handler))
            .route("/{*path}", any(search_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main handler: preflight, or dispatch a search.
async fn search_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let cors = state.cors.headers(request.headers().get(ORIGIN));

    let mut response = if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        let input = read_search_input(request, state.max_body_bytes).await;
        match state.dispatcher.handle(&input).await {
            Ok(body) => SearchReply(body).into_response(),
            Err(e) => {
                tracing::debug!(status = %e.status_code(), error = %e, "Search not served");
                e.into_response()
            }
        }
    };

    response.headers_mut().extend(cors);
    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}
