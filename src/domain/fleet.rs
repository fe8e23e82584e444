// Fleet domain model
use super::error::FleetError;
use super::snapshot::{compute_snapshots, VehicleSnapshot};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One observed sample of a vehicle. `volume_tons` is the increment moved
/// with this sample, not a running total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub vehicle_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: NaiveDateTime,
    pub volume_tons: f64,
}

impl PositionRecord {
    pub fn new(
        vehicle_id: impl Into<String>,
        lat: f64,
        lon: f64,
        timestamp: NaiveDateTime,
        volume_tons: f64,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            category: None,
            lat,
            lon,
            timestamp,
            volume_tons,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// What to do with a cutoff that falls outside the fleet's time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffPolicy {
    #[default]
    Clamp,
    Reject,
}

/// Immutable, non-empty set of samples for one simulation.
#[derive(Debug, Clone)]
pub struct Fleet {
    records: Vec<PositionRecord>,
    min_timestamp: NaiveDateTime,
    max_timestamp: NaiveDateTime,
    vehicles: Vec<VehicleEntry>,
    vehicle_index: HashMap<String, usize>,
}

/// Per-vehicle facts gathered once at load, in first-appearance order
#[derive(Debug, Clone)]
struct VehicleEntry {
    vehicle_id: String,
    samples: usize,
    category: Option<String>,
}

impl Fleet {
    pub fn new(records: Vec<PositionRecord>) -> Result<Self, FleetError> {
        let min_timestamp = records
            .iter()
            .map(|r| r.timestamp)
            .min()
            .ok_or(FleetError::EmptyInput)?;
        let max_timestamp = records
            .iter()
            .map(|r| r.timestamp)
            .max()
            .ok_or(FleetError::EmptyInput)?;

        let mut vehicles: Vec<VehicleEntry> = Vec::new();
        let mut vehicle_index: HashMap<String, usize> = HashMap::new();
        for record in &records {
            let slot = *vehicle_index
                .entry(record.vehicle_id.clone())
                .or_insert_with(|| {
                    vehicles.push(VehicleEntry {
                        vehicle_id: record.vehicle_id.clone(),
                        samples: 0,
                        category: None,
                    });
                    vehicles.len() - 1
                });
            let entry = &mut vehicles[slot];
            entry.samples += 1;
            if entry.category.is_none() {
                entry.category = record.category.clone();
            }
        }

        Ok(Self {
            records,
            min_timestamp,
            max_timestamp,
            vehicles,
            vehicle_index,
        })
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn min_timestamp(&self) -> NaiveDateTime {
        self.min_timestamp
    }

    pub fn max_timestamp(&self) -> NaiveDateTime {
        self.max_timestamp
    }

    /// Distinct vehicle ids in order of first appearance
    pub fn vehicle_ids(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.vehicle_id.as_str()).collect()
    }

    fn vehicle(&self, vehicle_id: &str) -> Option<&VehicleEntry> {
        self.vehicle_index.get(vehicle_id).map(|&slot| &self.vehicles[slot])
    }

    pub fn sample_count(&self, vehicle_id: &str) -> usize {
        self.vehicle(vehicle_id).map_or(0, |v| v.samples)
    }

    /// Explicit category carried by the vehicle's records, if any
    pub fn explicit_category(&self, vehicle_id: &str) -> Option<&str> {
        self.vehicle(vehicle_id).and_then(|v| v.category.as_deref())
    }

    /// Sorted distinct timestamps; the stops a cutoff slider can land on
    pub fn timeline(&self) -> Vec<NaiveDateTime> {
        let mut timeline: Vec<NaiveDateTime> = self.records.iter().map(|r| r.timestamp).collect();
        timeline.sort();
        timeline.dedup();
        timeline
    }

    pub fn clamp_cutoff(&self, cutoff: NaiveDateTime) -> NaiveDateTime {
        cutoff.clamp(self.min_timestamp, self.max_timestamp)
    }

    pub fn check_cutoff(&self, cutoff: NaiveDateTime) -> Result<NaiveDateTime, FleetError> {
        if cutoff < self.min_timestamp || cutoff > self.max_timestamp {
            return Err(FleetError::InvalidCutoff {
                cutoff,
                min: self.min_timestamp,
                max: self.max_timestamp,
            });
        }
        Ok(cutoff)
    }

    pub fn resolve_cutoff(
        &self,
        cutoff: NaiveDateTime,
        policy: CutoffPolicy,
    ) -> Result<NaiveDateTime, FleetError> {
        match policy {
            CutoffPolicy::Clamp => Ok(self.clamp_cutoff(cutoff)),
            CutoffPolicy::Reject => self.check_cutoff(cutoff),
        }
    }

    pub fn snapshots(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<BTreeMap<String, VehicleSnapshot>, FleetError> {
        compute_snapshots(&self.records, cutoff)
    }
}
