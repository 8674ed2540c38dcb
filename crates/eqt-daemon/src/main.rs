//! eqt-daemon entry point.
//!
//! Thin on purpose: parse args, set up tracing, load config, build the
//! gateway, wire middleware, serve. Handlers live in `routes.rs`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::Parser;
use eqt_config::{
    load_layered_yaml, report_unused_keys, resolve_vendor_headers, UnusedKeyPolicy,
};
use eqt_daemon::{routes, state};
use eqt_orders::{OrderGateway, VendorInvoker};
use eqt_vendor_rest::RestInvoker;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "eqt-daemon")]
#[command(about = "Order gateway in front of the brokerage vendor", long_about = None)]
struct Args {
    /// Config paths in merge order (base -> env -> local overrides)
    #[arg(long = "config", default_value = "config/gateway.yaml")]
    config: Vec<String>,

    /// Bind address; overrides daemon.addr from config
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Load and validate config, print its hash, then exit
    #[arg(long, default_value_t = false)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();
    let args = Args::parse();

    let paths: Vec<&str> = args.config.iter().map(String::as_str).collect();
    let loaded = load_layered_yaml(&paths).context("config load failed")?;
    let unused = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for ptr in &unused.unused_leaf_pointers {
        warn!(pointer = %ptr, "config key is not used");
    }
    let cfg = loaded.gateway()?;
    info!(config_hash = %loaded.config_hash, paths = ?args.config, "config loaded");

    if args.check {
        println!("config_hash={}", loaded.config_hash);
        return Ok(());
    }

    let addr = match args.addr {
        Some(a) => a,
        None => cfg
            .daemon
            .addr
            .parse()
            .with_context(|| format!("invalid daemon.addr: {}", cfg.daemon.addr))?,
    };

    let headers = resolve_vendor_headers(&cfg)?;
    info!(headers = ?headers, "vendor headers resolved");

    let settings = cfg.into_vendor_settings(headers);
    info!(endpoint = %settings.endpoint, source = %settings.source, "vendor configured");

    let invoker: Arc<dyn VendorInvoker> = Arc::new(RestInvoker::new());
    let shared = Arc::new(state::AppState::new(OrderGateway::new(invoker, settings)));

    let app = routes::build_router(Arc::clone(&shared))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_localhost_only());

    info!("eqt-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

/// CORS: allow only localhost origins.
fn cors_localhost_only() -> CorsLayer {
    let allowed_origins = [
        "http://localhost",
        "http://127.0.0.1",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
    ];

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(tower_http::cors::Any)
}
