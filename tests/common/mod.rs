//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;

use model_runner::config::RunnerConfig;
use model_runner::http::HttpServer;
use model_runner::model;

/// A mock subscriber endpoint that records every payload it receives.
pub struct CaptureServer {
    pub addr: SocketAddr,
    bodies: Arc<Mutex<Vec<Bytes>>>,
}

#[allow(dead_code)]
impl CaptureServer {
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    pub fn received(&self) -> Vec<Bytes> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Start a capture server answering every request with the given status.
#[allow(dead_code)]
pub async fn start_capture_server(status: StatusCode) -> CaptureServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bodies: Arc<Mutex<Vec<Bytes>>> = Arc::new(Mutex::new(Vec::new()));

    let recorded = bodies.clone();
    let app = Router::new().route(
        "/{*path}",
        any(move |body: Bytes| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(body);
                status
            }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    CaptureServer { addr, bodies }
}

/// Start the runner on an ephemeral port, returning its address.
pub async fn start_runner(config: RunnerConfig, model_name: &str) -> SocketAddr {
    let model = model::load(model_name).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config, model);

    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    addr
}

/// Reserve and release a local port, yielding an address that refuses
/// connections.
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
