#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use emojivoto_core::proto::{FILE_DESCRIPTOR_SET, voting_service_server::VotingServiceServer};
use server::config::{CliArgs, ServerConfig};
use server::service::handler::TallyService;
use server::telemetry::{TelemetryProviders, init_metric_handles, init_telemetry};
use std::net::SocketAddr;
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

    let providers = init_telemetry("voting")?;
    init_metric_handles();

    let config = ServerConfig::try_from(args)?;

    let tcp = TcpListener::bind(config.server_addr).await?;
    let incoming = TcpListenerStream::new(tcp);
    log_startup_info(config.server_addr, &config);
    run_server_with_incoming(providers, incoming, config).await
}

async fn run_server_with_incoming(
    providers: TelemetryProviders,
    incoming: TcpListenerStream,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<VotingServiceServer<TallyService>>()
        .await;

    let service = TallyService::from_config(&config);

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
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
        .add_service(build_voting_service(service))
        .serve_with_incoming_shutdown(incoming, shutdown_signal(health_reporter, providers))
        .await?;

    tracing::info!("Voting service shut down");
    Ok(())
}

fn log_startup_info(addr: SocketAddr, config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting voting service on {addr} with full config: {config:#?}");
    } else {
        tracing::info!(
            "Starting voting service on {addr} (failure rate {}, artificial delay {:?}, validate choices {})",
            config.fault.failure_rate(),
            config.fault.artificial_delay(),
            config.validate_choices,
        );
    }
}

fn build_voting_service(service: TallyService) -> VotingServiceServer<TallyService> {
    VotingServiceServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
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
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");

    health_reporter
        .set_not_serving::<VotingServiceServer<TallyService>>()
        .await;

    providers.shutdown();
}
