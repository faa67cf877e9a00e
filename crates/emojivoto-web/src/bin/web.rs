use clap::Parser;
use emojivoto_core::telemetry::init_telemetry;
use emojivoto_web::gateway::{
    GrpcBackend,
    config::{CliArgs, GatewayConfig},
    http_span, router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let providers = init_telemetry("web")?;
    let config = GatewayConfig::try_from(args)?;

    tracing::info!("Connecting to emoji service at {}", config.emoji_uri);
    tracing::info!("Connecting to voting service at {}", config.voting_uri);
    let backend = GrpcBackend::connect_lazy(&config.emoji_uri, &config.voting_uri)?;

    let app = router(backend)
        .layer(TraceLayer::new_for_http().make_span_with(http_span))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Starting web gateway on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web gateway shut down");
    providers.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received, terminating gracefully...");
}
