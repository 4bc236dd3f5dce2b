use clap::Parser;
use dotenvy::dotenv;
use file_upload_server::config::ServerConfig;
use file_upload_server::infrastructure::storage;
use file_upload_server::models::{Category, category};
use file_upload_server::services::file_service::FileService;
use file_upload_server::{AppState, create_app};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the HTTP server (overrides SERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding uploaded files (overrides STORAGE_DIR)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,
}

fn log_banner(config: &ServerConfig, location: &str) {
    let display_host = if config.host == "0.0.0.0" {
        "localhost"
    } else {
        config.host.as_str()
    };

    info!("==================================================");
    info!("📁 Storage directory: {}", location);
    info!("🌐 Web interface: http://{}:{}/", display_host, config.port);
    info!("📋 File API: http://{}:{}/api/files", display_host, config.port);
    info!("📖 Swagger UI: http://{}:{}/swagger-ui", display_host, config.port);
    info!("📄 Supported types:");
    for c in Category::ALL {
        let preview: Vec<&str> = c.extensions().iter().take(5).copied().collect();
        info!("   {} {}: {}...", c.icon(), c.label(), preview.join(", "));
    }
    info!(
        "📦 Max upload size: {}MB, timezone: {}",
        config.max_upload_size / 1024 / 1024,
        config.timezone
    );
    info!("==================================================");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initial Environment & Logging Setup
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_upload_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting File Upload Server...");

    // 2. Sanity check the category table
    if let Err(e) = category::verify_category_table() {
        error!("❌ Invalid category table: {}", e);
        return Err(e.into());
    }

    // 3. Configuration (flags win over env)
    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = args.storage_dir {
        config.storage_dir = dir;
    }

    // 4. Storage & services
    let storage_service = storage::setup_storage(&config).await?;
    let location = storage_service.root().display().to_string();
    let file_service = Arc::new(FileService::new(storage_service, config.clone()));
    let state = AppState::new(file_service);

    // Configure tracing layer for HTTP requests
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            info!("📥 {} {}", request.method(), request.uri());
        })
        .on_response(
            |response: &axum::http::Response<_>,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                info!(
                    "📤 Finished in {:?} with status {}",
                    latency,
                    response.status()
                );
            },
        );

    let app = create_app(state).layer(trace_layer);

    // 5. Bind & serve
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log_banner(&config, &location);
    info!("✅ Server listening on: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
