// Playlist generation gateway server
//
// Axum HTTP server fronting the video-search and generative-text APIs.
// Stateless: shared state is the startup config plus one outbound client.

pub mod routes;

use axum::http::{HeaderValue, Method};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::config::Config;

/// Shared state for the gateway. No interior mutability; requests are
/// independent and need no coordination.
pub struct GatewayState {
    pub config: Config,
    /// Outbound HTTP client, shared across requests (cheap to clone).
    /// No request timeout is set; upstream calls run to completion.
    pub http: Client,
}

/// Holds the running server's shutdown mechanism
pub struct RunningServer {
    pub shutdown_tx: oneshot::Sender<()>,
    pub addr: SocketAddr,
}

/// Start the gateway HTTP server.
/// Returns the running server handle (for shutdown) or an error.
pub async fn start_server(config: Config) -> Result<RunningServer, String> {
    let port = config.port;
    let state = Arc::new(GatewayState {
        config,
        http: Client::new(),
    });

    // Mirrors the headers the web client sends. CORS is deliberately
    // permissive; the upstream keys never leave the server side.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            "authorization".parse().unwrap(),
            "x-client-info".parse().unwrap(),
            "apikey".parse().unwrap(),
            "content-type".parse().unwrap(),
        ])
        .allow_origin("*".parse::<HeaderValue>().unwrap());

    let app = routes::gateway_routes().with_state(state).layer(cors);

    let addr = try_bind(port).await?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;
    let actual_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get local addr: {}", e))?;

    log::info!("gateway starting on {}", actual_addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("shutdown signal received");
            })
            .await
            .unwrap_or_else(|e| log::error!("server error: {}", e));
        log::info!("gateway stopped");
    });

    Ok(RunningServer {
        shutdown_tx,
        addr: actual_addr,
    })
}

/// Try to bind to the given port, with fallback to nearby ports then
/// an OS-assigned one.
async fn try_bind(preferred_port: u16) -> Result<SocketAddr, String> {
    // Try preferred port
    let addr = SocketAddr::from(([0, 0, 0, 0], preferred_port));
    if let Ok(listener) = tokio::net::TcpListener::bind(addr).await {
        drop(listener);
        return Ok(addr);
    }

    // Try ports preferred+1 through preferred+10
    for offset in 1..=10u16 {
        let port = preferred_port.saturating_add(offset);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        if let Ok(listener) = tokio::net::TcpListener::bind(addr).await {
            drop(listener);
            log::warn!("port {} unavailable, using {}", preferred_port, port);
            return Ok(addr);
        }
    }

    // Fall back to OS-assigned port
    log::warn!(
        "ports {}..={} unavailable, falling back to an OS-assigned port",
        preferred_port,
        preferred_port.saturating_add(10)
    );
    Ok(SocketAddr::from(([0, 0, 0, 0], 0u16)))
}
