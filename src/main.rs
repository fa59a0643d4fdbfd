//! Smart Potato Farming backend.
//!
//! For now it only reports liveness so the browser frontend can check
//! that the backend is reachable.
//!
//! HTTP API is powered by Axum.
use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router, Server,
};
use std::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use app_config::AppConfig;

// Modules
mod api;
mod app_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Read configuration.
    let cfg = AppConfig::from_env()?;
    match &cfg.allowed_origins {
        Some(origins) => log::info!("Allowed origins: {}", origins.join(" ")),
        None => log::info!("Allowed origins: any"),
    }

    let axumapp = app(&cfg)?;

    let addr = cfg.bind_addr();
    let listener =
        TcpListener::bind(&addr).with_context(|| format!("failed to bind to {addr}"))?;
    log::info!("Listening on {}", listener.local_addr()?);

    Server::from_tcp(listener)?
        .serve(axumapp.into_make_service())
        .await?;

    Ok(())
}

/// Build the router with all routes and middleware applied.
fn app(cfg: &AppConfig) -> anyhow::Result<Router> {
    Ok(Router::new()
        .route("/api/health", get(api::health::get_health))
        .layer(cors_layer(cfg)?))
}

/// Configure CORS layer.
fn cors_layer(cfg: &AppConfig) -> anyhow::Result<CorsLayer> {
    let allow_origin = match &cfg.allowed_origins {
        // a wildcard entry means any origin
        Some(origins) if origins.iter().any(|origin| origin == "*") => AllowOrigin::any(),
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("invalid allowed origin {origin:?}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            AllowOrigin::list(origins)
        }
        // allow requests from any origin
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        // allow `GET` when accessing the resource
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(allow_origin))
}
