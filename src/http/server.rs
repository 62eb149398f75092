//! HTTP server setup and per-method dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with one route per model method
//! - Wire up middleware (tracing, request timeout)
//! - Bind the server to a listener with graceful shutdown
//! - Translate payloads, invoke the method, forward the output
//! - Map translation failures to 400 responses with diagnostics
//!
//! # Design Decisions
//! - The dispatch table is built once from the method map and never changes;
//!   each handler closes over its own method, so `/name` can only ever
//!   invoke `name`
//! - GET and POST are accepted identically on every method route
//! - Forwarding runs inline after a successful encode; its outcome never
//!   changes the client response

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RunnerConfig;
use crate::downstream::Forwarder;
use crate::http::extract;
use crate::model::method::BoundMethod;
use crate::model::{CodecMode, MethodError, Model};
use crate::observability::metrics;

/// Fixed acknowledgement body when output echo is disabled.
pub const ACK_BODY: &str = "OK";

/// Upper bound on a buffered request body.
const MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Per-request state shared by every method handler.
#[derive(Clone)]
pub struct AppState {
    pub mode: CodecMode,
    pub echo_output: bool,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the model runner.
pub struct HttpServer {
    router: Router,
    model: Arc<Model>,
}

impl HttpServer {
    /// Create a new server exposing every method of the model.
    pub fn new(config: &RunnerConfig, model: Model) -> Self {
        let model = Arc::new(model);
        let forwarder = Arc::new(Forwarder::new(
            &config.downstream.targets,
            config.codec.mode,
        ));

        let state = AppState {
            mode: config.codec.mode,
            echo_output: config.codec.echo_output,
            forwarder,
        };

        let router = Self::build_router(config, &model, state);
        Self { router, model }
    }

    /// Build the dispatch table: one route per method name.
    fn build_router(config: &RunnerConfig, model: &Arc<Model>, state: AppState) -> Router {
        let mut router = Router::new();
        for (name, method) in model.methods() {
            let path = format!("/{name}");
            tracing::info!(
                route = %path,
                input = ?method.input_fields(),
                output = ?method.output_fields(),
                "Adding route"
            );
            let method = method.clone();
            let state = state.clone();
            router = router.route(
                &path,
                any(move |request: Request<Body>| {
                    invoke_method(state.clone(), method.clone(), request)
                }),
            );
        }
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            model = %self.model.name(),
            methods = self.model.method_count(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Per-request pipeline: extract → decode → invoke → encode → forward.
async fn invoke_method(
    state: AppState,
    method: Arc<dyn BoundMethod>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let name = method.name().to_string();

    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, MAX_PAYLOAD_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %name, error = %e, "Failed to read request body");
            metrics::record_request(&name, 400, start);
            return (
                StatusCode::BAD_REQUEST,
                format!("value conversion error: {e}"),
            )
                .into_response();
        }
    };
    let payload = extract::payload(&parts, &body_bytes);

    match method.run(state.mode, &payload) {
        Ok(output) => {
            let output = Bytes::from(output);
            state.forwarder.fan_out(&output).await;
            metrics::record_request(&name, 201, start);
            if state.echo_output {
                (StatusCode::CREATED, output).into_response()
            } else {
                (StatusCode::CREATED, ACK_BODY).into_response()
            }
        }
        Err(MethodError::Codec(e)) => {
            tracing::debug!(method = %name, error = %e, "Payload translation failed");
            metrics::record_request(&name, 400, start);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(MethodError::Invoke(e)) => {
            tracing::error!(method = %name, error = %e, "Method invocation failed");
            metrics::record_request(&name, 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "method invocation failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    } else {
        tracing::info!("Shutdown signal received");
    }
}
