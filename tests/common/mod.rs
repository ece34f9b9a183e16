//! Shared test utilities: a canned `avgPrice` endpoint and config builders.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use zcash_alert::config::{AlertConfig, AppConfig, MarketConfig};

/// How the stub answers one request.
pub enum Reply {
    /// 200 with this JSON body.
    Json(String),
    /// Any status with this body.
    Status(u16, String),
    /// Accept the connection and never answer.
    Hang,
}

/// A running stub endpoint.
pub struct StubApi {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubApi {
    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serves `avgPrice` style responses, choosing the reply by `symbol`.
pub async fn spawn_stub<F>(reply: F) -> StubApi
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let reply = Arc::new(reply);

    let counter = Arc::clone(&hits);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let reply = Arc::clone(&reply);
            tokio::spawn(async move { answer(stream, reply.as_ref()).await });
        }
    });

    StubApi {
        url: format!("http://{addr}/api/v3/avgPrice"),
        hits,
    }
}

/// Replies with a Binance shaped payload for each symbol in `prices`, and
/// the Binance "Invalid symbol" error for anything else.
pub async fn spawn_price_stub(prices: &'static [(&'static str, &'static str)]) -> StubApi {
    spawn_stub(move |symbol| match prices.iter().find(|(s, _)| *s == symbol) {
        Some((_, price)) => Reply::Json(format!(
            r#"{{"mins":5,"price":"{price}","closeTime":1700000000000}}"#
        )),
        None => Reply::Status(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#.to_string()),
    })
    .await
}

/// An address nothing listens on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v3/avgPrice")
}

async fn answer<F>(mut stream: TcpStream, reply: &F)
where
    F: Fn(&str) -> Reply,
{
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let symbol = head
        .split_whitespace()
        .nth(1)
        .and_then(|target| target.split_once("symbol="))
        .map(|(_, rest)| rest.split('&').next().unwrap_or(rest).to_string())
        .unwrap_or_default();

    let (status, body) = match reply(&symbol) {
        Reply::Json(body) => (200, body),
        Reply::Status(status, body) => (status, body),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        }
    };

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Market config pointing at `endpoint` with a short timeout.
pub fn market_config(endpoint: &str) -> MarketConfig {
    MarketConfig {
        ticker: "ZEC".to_string(),
        fiat: "EUR".to_string(),
        stable: "USDT".to_string(),
        endpoint: endpoint.to_string(),
        request_timeout: Duration::from_millis(500),
    }
}

pub fn app_config(endpoint: &str) -> AppConfig {
    AppConfig {
        market: market_config(endpoint),
        alert: AlertConfig {
            trigger: dec!(0.03),
            sound_file: "alert.wav".into(),
        },
        interval: Duration::from_secs(15),
        log_file: None,
    }
}
