// Validation of raw position records before they reach the aggregator
use crate::domain::fleet::PositionRecord;
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Record as it arrives from a feed; every field is checked by `validate_records`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPositionRecord {
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timestamp: Option<String>,
    pub volume_tons: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("malformed fleet document: {0}")]
    Malformed(String),

    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: vehicle id is empty")]
    EmptyVehicleId { index: usize },

    #[error("record {index}: unparsable timestamp {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("record {index}: volume {value} must be a finite, non-negative number")]
    InvalidVolume { index: usize, value: f64 },

    #[error("record {index}: coordinates ({lat}, {lon}) are out of range")]
    InvalidCoordinates { index: usize, lat: f64, lon: f64 },
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Decode a JSON array of records and validate it
pub fn parse_fleet_json(bytes: &[u8]) -> Result<Vec<PositionRecord>, IngestError> {
    let raw: Vec<RawPositionRecord> =
        serde_json::from_slice(bytes).map_err(|e| IngestError::Malformed(e.to_string()))?;
    validate_records(raw)
}

pub fn validate_records(raw: Vec<RawPositionRecord>) -> Result<Vec<PositionRecord>, IngestError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect()
}

fn validate_record(index: usize, raw: RawPositionRecord) -> Result<PositionRecord, IngestError> {
    let missing = |field| IngestError::MissingField { index, field };

    let vehicle_id = raw.vehicle_id.ok_or_else(|| missing("vehicle_id"))?;
    let lat = raw.lat.ok_or_else(|| missing("lat"))?;
    let lon = raw.lon.ok_or_else(|| missing("lon"))?;
    let timestamp = raw.timestamp.ok_or_else(|| missing("timestamp"))?;
    let volume_tons = raw.volume_tons.ok_or_else(|| missing("volume_tons"))?;

    if vehicle_id.trim().is_empty() {
        return Err(IngestError::EmptyVehicleId { index });
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(IngestError::InvalidCoordinates { index, lat, lon });
    }
    if !volume_tons.is_finite() || volume_tons < 0.0 {
        return Err(IngestError::InvalidVolume {
            index,
            value: volume_tons,
        });
    }
    let timestamp = parse_timestamp(&timestamp).ok_or_else(|| IngestError::InvalidTimestamp {
        index,
        value: timestamp.clone(),
    })?;

    let record = PositionRecord::new(vehicle_id, lat, lon, timestamp, volume_tons);
    Ok(match raw.category.filter(|c| !c.trim().is_empty()) {
        Some(category) => record.with_category(category),
        None => record,
    })
}
