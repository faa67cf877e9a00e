use crate::bot::{BotConfig, FAVORITE, VoteClient, run};
use crate::gateway::{router, testing::InMemoryBackend};
use core::time::Duration;
use emojivoto_core::tally::{FaultConfig, SeededRandom, Tally, ThreadRandom};
use reqwest::{Client, Url};
use tokio::net::TcpListener;

async fn serve(backend: InMemoryBackend) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router(backend)).await });
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn config(web_url: Url, ttl: Duration, request_rate: u32) -> BotConfig {
    BotConfig {
        web_url,
        host_override: None,
        ttl: Some(ttl),
        request_rate,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_lists_and_votes() {
    let backend = InMemoryBackend::default();
    let url = serve(backend.clone()).await;
    let client = VoteClient::new(Client::new(), &config(url, Duration::ZERO, 1));

    let shortcodes = client.shortcodes().await.unwrap();
    assert!(shortcodes.iter().any(|s| s == FAVORITE));

    client.vote(FAVORITE).await.unwrap();
    client.vote(":heart:").await.unwrap();
    let results = backend.store().results();
    assert_eq!(results.len(), 2);
    assert_eq!(backend.store().total_votes(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_vote_surfaces_status() {
    let url = serve(InMemoryBackend::default()).await;
    let client = VoteClient::new(Client::new(), &config(url, Duration::ZERO, 1));
    let err = client.vote(":not-an-emoji:").await.unwrap_err();
    assert!(err.to_string().contains("404"), "{err}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_stops_at_ttl_and_every_vote_lands() {
    let backend = InMemoryBackend::default();
    let url = serve(backend.clone()).await;
    let config = config(url, Duration::from_millis(300), 100);
    let client = VoteClient::new(Client::new(), &config);

    let stats = run(&config, &client, &SeededRandom::new(1)).await;

    assert!(stats.votes > 0);
    assert_eq!(stats.errors, 0);
    assert_eq!(backend.store().total_votes(), stats.votes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failures_are_counted_not_fatal() {
    let backend = InMemoryBackend::new(FaultConfig::new(1.0, Duration::ZERO));
    let url = serve(backend.clone()).await;
    let config = config(url, Duration::from_millis(200), 50);
    let client = VoteClient::new(Client::new(), &config);

    let stats = run(&config, &client, &ThreadRandom).await;

    assert_eq!(stats.votes, 0);
    assert!(stats.errors > 0);
    assert!(backend.store().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_gateway_is_logged_and_retried() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}")).unwrap();
    let config = config(url, Duration::from_millis(150), 50);
    let client = VoteClient::new(Client::new(), &config);

    let stats = run(&config, &client, &ThreadRandom).await;
    assert_eq!(stats.votes, 0);
    assert!(stats.errors > 0);
}
