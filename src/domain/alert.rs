// Threshold alert classification
use super::snapshot::VehicleSnapshot;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_THRESHOLD_TONS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Danger,
    Completed,
    InProgress,
}

impl AlertLevel {
    /// Banner style the client should use
    pub fn severity(&self) -> &'static str {
        match self {
            AlertLevel::Danger => "danger",
            AlertLevel::Completed => "success",
            AlertLevel::InProgress => "info",
        }
    }

    pub fn message(&self, threshold: f64) -> String {
        match self {
            AlertLevel::Danger => {
                format!("Alert! A vehicle is transporting more than {} tons.", threshold)
            }
            AlertLevel::Completed => "Simulation completed without alerts.".to_string(),
            AlertLevel::InProgress => "Simulation in progress. No anomalies detected.".to_string(),
        }
    }
}

/// First match wins: any vehicle strictly above `threshold` is a danger even
/// at the end of the simulation; otherwise reaching `max_timestamp` completes.
pub fn classify_alert(
    snapshots: &BTreeMap<String, VehicleSnapshot>,
    cutoff: NaiveDateTime,
    max_timestamp: NaiveDateTime,
    threshold: f64,
) -> AlertLevel {
    if snapshots
        .values()
        .any(|s| s.cumulative_volume > threshold)
    {
        AlertLevel::Danger
    } else if cutoff == max_timestamp {
        AlertLevel::Completed
    } else {
        AlertLevel::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::compute_snapshots;
    use crate::domain::fixtures::{at, reference_records};

    fn snapshot(vehicle_id: &str, cumulative_volume: f64) -> (String, VehicleSnapshot) {
        (
            vehicle_id.to_string(),
            VehicleSnapshot {
                vehicle_id: vehicle_id.to_string(),
                trace: vec![(0.0, 0.0)],
                last_position: Some((0.0, 0.0)),
                cumulative_volume,
            },
        )
    }

    #[test]
    fn test_reference_scenario_is_danger() {
        let records = reference_records();
        let snapshots = compute_snapshots(&records, at(8, 30)).unwrap();
        let level = classify_alert(&snapshots, at(8, 30), at(9, 15), DEFAULT_THRESHOLD_TONS);
        assert_eq!(level, AlertLevel::Danger);
    }

    #[test]
    fn test_danger_wins_over_completion() {
        let snapshots = BTreeMap::from([snapshot("A", 121.0)]);
        let level = classify_alert(&snapshots, at(9, 15), at(9, 15), 120.0);
        assert_eq!(level, AlertLevel::Danger);
    }

    #[test]
    fn test_threshold_is_strict() {
        let snapshots = BTreeMap::from([snapshot("A", 120.0), snapshot("B", 3.0)]);
        assert_eq!(
            classify_alert(&snapshots, at(8, 0), at(9, 15), 120.0),
            AlertLevel::InProgress
        );
        assert_eq!(
            classify_alert(&snapshots, at(9, 15), at(9, 15), 120.0),
            AlertLevel::Completed
        );
    }

    #[test]
    fn test_empty_snapshots_fall_through() {
        let snapshots = BTreeMap::new();
        assert_eq!(
            classify_alert(&snapshots, at(7, 0), at(9, 15), 120.0),
            AlertLevel::InProgress
        );
        assert_eq!(
            classify_alert(&snapshots, at(9, 15), at(9, 15), 120.0),
            AlertLevel::Completed
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AlertLevel::Danger.message(120.0),
            "Alert! A vehicle is transporting more than 120 tons."
        );
        assert_eq!(AlertLevel::Completed.severity(), "success");
        assert_eq!(AlertLevel::InProgress.severity(), "info");
    }
}
