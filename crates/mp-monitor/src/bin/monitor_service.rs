use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mp_feed::{ingest_batch, HeadlineProvider, KeywordClassifier, SampleHeadlineProvider};
use mp_monitor::{MonitorSession, SessionConfig};
use mp_types::{Region, Scenario};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("MACROPULSE_MONITOR_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8090".to_string());
    let scenario = match std::env::var("MACROPULSE_SCENARIO") {
        Ok(raw) => raw
            .parse::<Scenario>()
            .map_err(|e| mp_types::config_error!("MACROPULSE_SCENARIO: {e}"))?,
        Err(_) => Scenario::default(),
    };
    let region_focus = match std::env::var("MACROPULSE_REGION") {
        Ok(raw) => raw
            .parse::<Region>()
            .map_err(|e| mp_types::config_error!("MACROPULSE_REGION: {e}"))?,
        Err(_) => Region::default(),
    };

    let config = SessionConfig {
        scenario,
        region_focus,
        ..SessionConfig::default()
    };
    let mut session = MonitorSession::new(config);
    let mut provider = SampleHeadlineProvider::new(42);
    let classifier = KeywordClassifier::new();

    info!(
        scenario = %scenario,
        region = %region_focus,
        provider = provider.name(),
        "monitor session configured"
    );

    let listener = TcpListener::bind(&addr).await?;
    println!("MacroPulse monitor service listening on {addr}");

    loop {
        let (mut socket, _) = listener.accept().await?;

        // One evaluation per poll, recorded so momentum builds over time.
        let now = Utc::now();
        let body = match provider.fetch_latest().await {
            Ok(raws) => {
                let batch = ingest_batch(raws, &classifier, now);
                let report = session.evaluate(&batch, now);
                session.record(now)?;
                serde_json::to_string(&report)?
            }
            Err(e) => {
                error!(error = %e, "headline fetch failed");
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };

        tokio::spawn(async move {
            let mut buffer = [0u8; 1024];
            let _ = socket.read(&mut buffer).await;

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            );

            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
    }
}
