#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use emojivoto_core::proto::{FILE_DESCRIPTOR_SET, emoji_service_server::EmojiServiceServer};
use emojivoto_core::telemetry::{TelemetryProviders, init_telemetry};
use server::config::{CliArgs, ServerConfig};
use server::service::handler::CatalogService;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_health::server::HealthReporter;
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let providers = init_telemetry("emoji")?;
    let config = ServerConfig::try_from(args)?;

    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<EmojiServiceServer<CatalogService>>()
        .await;

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let catalog = EmojiServiceServer::new(CatalogService::default())
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip);

    let tcp = TcpListener::bind(config.server_addr).await?;
    tracing::info!("Starting emoji service on {}", config.server_addr);

    Server::builder()
        .accept_http1(true)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(catalog)
        .serve_with_incoming_shutdown(
            TcpListenerStream::new(tcp),
            shutdown_signal(health_reporter, providers),
        )
        .await?;

    tracing::info!("Emoji service shut down");
    Ok(())
}

async fn shutdown_signal(health_reporter: HealthReporter, providers: TelemetryProviders) {
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
    health_reporter
        .set_not_serving::<EmojiServiceServer<CatalogService>>()
        .await;
    providers.shutdown();
}
