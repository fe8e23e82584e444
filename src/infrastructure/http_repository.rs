// Remote JSON feed repository implementation
use crate::application::fleet_repository::FleetRepository;
use crate::domain::fleet::PositionRecord;
use crate::infrastructure::ingest::parse_fleet_json;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

const FEED_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpRepository {
    url: String,
    client: reqwest::Client,
}

impl HttpRepository {
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .build()
            .context("Failed to build fleet feed client")?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: String, client: reqwest::Client) -> Self {
        Self {
            url: url.trim().to_string(),
            client,
        }
    }
}

#[async_trait]
impl FleetRepository for HttpRepository {
    fn describe(&self) -> String {
        format!("feed {}", self.url)
    }

    async fn load_records(&self) -> Result<Vec<PositionRecord>> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to fleet feed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Fleet feed request failed with status {}: {}", status, body);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read fleet feed body")?;

        let records = parse_fleet_json(&bytes).context("Invalid fleet feed document")?;
        tracing::debug!("Fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    const VALID: &str = r#"[
        {"vehicle_id": "Tren 1", "lat": 21.87, "lon": -102.30, "timestamp": "2025-07-01T08:15:00", "volume_tons": 90},
        {"vehicle_id": "Tren 1", "lat": 21.875, "lon": -102.285, "timestamp": "2025-07-01T08:45:00", "volume_tons": 130}
    ]"#;

    const INVALID: &str = r#"[
        {"vehicle_id": "Tren 1", "lat": 21.87, "lon": -102.30, "timestamp": "2025-07-01T08:15:00", "volume_tons": -5}
    ]"#;

    async fn serve_feed() -> String {
        let router = Router::new()
            .route("/fleet.json", get(|| async { VALID }))
            .route("/invalid.json", get(|| async { INVALID }))
            .route(
                "/down.json",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "feed down") }),
            )
            .route(
                "/slow.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    VALID
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn repository(base: &str, path: &str, timeout: Duration) -> HttpRepository {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap();
        HttpRepository::with_client(format!("{}{}", base, path), client)
    }

    #[tokio::test]
    async fn test_loads_valid_feed() {
        let base = serve_feed().await;
        let records = repository(&base, "/fleet.json", FEED_TIMEOUT)
            .load_records()
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].volume_tons, 130.0);
    }

    #[tokio::test]
    async fn test_error_status_fails_load() {
        let base = serve_feed().await;
        let err = repository(&base, "/down.json", FEED_TIMEOUT)
            .load_records()
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("503"), "{}", message);
        assert!(message.contains("feed down"), "{}", message);
    }

    #[tokio::test]
    async fn test_invalid_record_fails_load() {
        let base = serve_feed().await;
        let err = repository(&base, "/invalid.json", FEED_TIMEOUT)
            .load_records()
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("record 0: volume -5"));
    }

    #[tokio::test]
    async fn test_unresponsive_feed_times_out() {
        let base = serve_feed().await;
        let started = std::time::Instant::now();
        let result = repository(&base, "/slow.json", Duration::from_millis(200))
            .load_records()
            .await;
        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_new_trims_url() {
        let repo = HttpRepository::new("  http://feed.local/fleet.json ".to_string()).unwrap();
        assert_eq!(repo.describe(), "feed http://feed.local/fleet.json");
    }
}
