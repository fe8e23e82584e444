// Time-windowed aggregation of fleet samples
use super::error::FleetError;
use super::fleet::PositionRecord;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-vehicle view of the fleet at a cutoff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub vehicle_id: String,
    pub trace: Vec<(f64, f64)>,
    pub last_position: Option<(f64, f64)>,
    pub cumulative_volume: f64,
}

/// Build a snapshot for every vehicle with at least one sample at or before
/// `cutoff`. Vehicles that have not started yet are left out of the map.
pub fn compute_snapshots(
    records: &[PositionRecord],
    cutoff: NaiveDateTime,
) -> Result<BTreeMap<String, VehicleSnapshot>, FleetError> {
    if records.is_empty() {
        return Err(FleetError::EmptyInput);
    }

    let mut visible: BTreeMap<&str, Vec<&PositionRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.timestamp <= cutoff) {
        visible.entry(record.vehicle_id.as_str()).or_default().push(record);
    }

    let snapshots = visible
        .into_iter()
        .map(|(vehicle_id, mut samples)| {
            // Stable: samples sharing a timestamp keep their input order
            samples.sort_by_key(|r| r.timestamp);

            let trace: Vec<(f64, f64)> = samples.iter().map(|r| r.position()).collect();
            let cumulative_volume = samples.iter().map(|r| r.volume_tons).sum();

            let snapshot = VehicleSnapshot {
                vehicle_id: vehicle_id.to_string(),
                last_position: trace.last().copied(),
                trace,
                cumulative_volume,
            };
            (vehicle_id.to_string(), snapshot)
        })
        .collect();

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{at, reference_records};
    use chrono::Duration;

    #[test]
    fn test_reference_scenario_at_0830() {
        let records = reference_records();
        let snapshots = compute_snapshots(&records, at(8, 30)).unwrap();

        let truck = &snapshots["Camión 1"];
        assert_eq!(truck.cumulative_volume, 220.0);
        assert_eq!(truck.trace, vec![(21.8823, -102.2826), (21.8850, -102.2700)]);
        assert_eq!(truck.last_position, Some((21.8850, -102.2700)));

        let train = &snapshots["Tren 1"];
        assert_eq!(train.cumulative_volume, 90.0);
        assert_eq!(train.trace.len(), 1);
        assert_eq!(train.last_position, Some((21.8700, -102.3000)));
    }

    #[test]
    fn test_full_window_totals() {
        let records = reference_records();
        let snapshots = compute_snapshots(&records, at(9, 15)).unwrap();
        assert_eq!(snapshots["Camión 1"].cumulative_volume, 330.0);
        assert_eq!(snapshots["Tren 1"].cumulative_volume, 315.0);
    }

    #[test]
    fn test_vehicle_absent_before_first_sample() {
        let records = reference_records();

        let snapshots = compute_snapshots(&records, at(8, 0)).unwrap();
        assert!(snapshots.contains_key("Camión 1"));
        assert!(!snapshots.contains_key("Tren 1"));

        let snapshots = compute_snapshots(&records, at(7, 59)).unwrap();
        assert!(snapshots.is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(compute_snapshots(&[], at(8, 0)), Err(FleetError::EmptyInput));
    }

    #[test]
    fn test_unordered_input_yields_ordered_trace() {
        let records = vec![
            PositionRecord::new("A", 3.0, 3.0, at(9, 0), 5.0),
            PositionRecord::new("A", 1.0, 1.0, at(8, 0), 5.0),
            PositionRecord::new("A", 2.0, 2.0, at(8, 30), 5.0),
        ];
        let snapshots = compute_snapshots(&records, at(9, 0)).unwrap();
        assert_eq!(snapshots["A"].trace, vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(snapshots["A"].last_position, Some((3.0, 3.0)));
        assert_eq!(snapshots["A"].cumulative_volume, 15.0);
    }

    #[test]
    fn test_volume_is_monotonic_and_trace_grows_by_prefix() {
        let records = reference_records();
        let mut cutoffs = Vec::new();
        let mut t = at(7, 45);
        while t <= at(9, 30) {
            cutoffs.push(t);
            t += Duration::minutes(5);
        }

        for pair in cutoffs.windows(2) {
            let earlier = compute_snapshots(&records, pair[0]).unwrap();
            let later = compute_snapshots(&records, pair[1]).unwrap();

            for (vehicle_id, before) in &earlier {
                let after = &later[vehicle_id];
                assert!(before.cumulative_volume <= after.cumulative_volume);
                assert!(after.trace.starts_with(&before.trace));
            }
        }
    }
}
