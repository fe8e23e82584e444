// JSON file repository implementation
use crate::application::fleet_repository::FleetRepository;
use crate::domain::fleet::PositionRecord;
use crate::infrastructure::ingest::parse_fleet_json;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FleetRepository for FileRepository {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load_records(&self) -> Result<Vec<PositionRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read fleet file {}", self.path.display()))?;

        let records = parse_fleet_json(&bytes)
            .with_context(|| format!("Invalid fleet file {}", self.path.display()))?;

        tracing::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fleet-simulator-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_reads_json_file() {
        let path = temp_path("ok.json");
        std::fs::write(
            &path,
            r#"[{"vehicle_id": "Tren 2", "lat": 21.0, "lon": -102.0, "timestamp": "2025-07-01T10:00:00", "volume_tons": 40}]"#,
        )
        .unwrap();

        let records = FileRepository::new(&path).load_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vehicle_id, "Tren 2");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_record_fails_load() {
        let path = temp_path("bad.json");
        std::fs::write(
            &path,
            r#"[{"vehicle_id": "Tren 2", "lat": 21.0, "lon": -102.0, "timestamp": "soon", "volume_tons": 40}]"#,
        )
        .unwrap();

        let err = FileRepository::new(&path).load_records().await.unwrap_err();
        assert!(format!("{:#}", err).contains("unparsable timestamp"));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails_load() {
        let repo = FileRepository::new(temp_path("absent.json"));
        assert!(repo.load_records().await.is_err());
    }
}
