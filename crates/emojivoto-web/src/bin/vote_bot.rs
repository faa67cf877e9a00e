use clap::Parser;
use emojivoto_core::{tally::ThreadRandom, telemetry::init_telemetry};
use emojivoto_web::bot::{BotConfig, VoteClient, config::CliArgs, run};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let providers = init_telemetry("vote-bot")?;
    let config = BotConfig::try_from(args)?;

    tracing::info!(
        "Voting through {} at {} per second{}",
        config.web_url,
        config.request_rate,
        config
            .ttl
            .map(|ttl| format!(" for {ttl:?}"))
            .unwrap_or_default()
    );

    let http = reqwest::Client::builder()
        .user_agent(concat!("vote-bot/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let client = VoteClient::new(http, &config);

    let stats = run(&config, &client, &ThreadRandom).await;
    tracing::info!("Cast {} votes with {} errors", stats.votes, stats.errors);

    providers.shutdown();
    Ok(())
}
