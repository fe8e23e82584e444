// Built-in reference dataset: one truck and one train, three samples each
use crate::application::fleet_repository::FleetRepository;
use crate::domain::fleet::PositionRecord;
use crate::infrastructure::ingest::{validate_records, RawPositionRecord};
use async_trait::async_trait;

const REFERENCE_SAMPLES: [(&str, f64, f64, &str, f64); 6] = [
    ("Camión 1", 21.8823, -102.2826, "2025-07-01T08:00:00", 100.0),
    ("Camión 1", 21.8850, -102.2700, "2025-07-01T08:30:00", 120.0),
    ("Camión 1", 21.8900, -102.2600, "2025-07-01T09:00:00", 110.0),
    ("Tren 1", 21.8700, -102.3000, "2025-07-01T08:15:00", 90.0),
    ("Tren 1", 21.8750, -102.2850, "2025-07-01T08:45:00", 130.0),
    ("Tren 1", 21.8800, -102.2700, "2025-07-01T09:15:00", 95.0),
];

pub fn reference_records() -> anyhow::Result<Vec<PositionRecord>> {
    let raw = REFERENCE_SAMPLES
        .iter()
        .map(|&(vehicle_id, lat, lon, timestamp, volume_tons)| RawPositionRecord {
            vehicle_id: Some(vehicle_id.to_string()),
            category: None,
            lat: Some(lat),
            lon: Some(lon),
            timestamp: Some(timestamp.to_string()),
            volume_tons: Some(volume_tons),
        })
        .collect();

    Ok(validate_records(raw)?)
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinRepository;

#[async_trait]
impl FleetRepository for BuiltinRepository {
    fn describe(&self) -> String {
        "built-in reference dataset".to_string()
    }

    async fn load_records(&self) -> anyhow::Result<Vec<PositionRecord>> {
        reference_records()
    }
}
