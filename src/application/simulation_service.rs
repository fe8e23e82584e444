// Simulation service - Use case for building the dashboard at a cutoff
use crate::domain::alert::{classify_alert, AlertLevel};
use crate::domain::category::CategoryTable;
use crate::domain::dashboard::{
    AlertBanner, Dashboard, FleetSummary, KpiBar, KpiChart, MapView, Marker, TileData, Timeline,
    VehicleLayer, VehicleSummary,
};
use crate::domain::error::FleetError;
use crate::domain::fleet::Fleet;
use crate::domain::snapshot::VehicleSnapshot;
use crate::infrastructure::config::SimulatorConfig;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Snapshots and alert for one cutoff, without presentation details
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotView {
    pub cutoff: NaiveDateTime,
    pub snapshots: BTreeMap<String, VehicleSnapshot>,
    pub alert: AlertLevel,
}

/// The fleet is shared read-only; every call takes its own cutoff.
#[derive(Clone)]
pub struct SimulationService {
    fleet: Arc<Fleet>,
    config: SimulatorConfig,
    categories: CategoryTable,
}

impl SimulationService {
    pub fn new(fleet: Arc<Fleet>, config: SimulatorConfig) -> Self {
        let categories = config.category_table();
        Self {
            fleet,
            config,
            categories,
        }
    }

    pub fn timeline(&self) -> Vec<NaiveDateTime> {
        self.fleet.timeline()
    }

    /// Resolve the requested cutoff; no cutoff means the start of the simulation
    fn resolve_cutoff(&self, cutoff: Option<NaiveDateTime>) -> Result<NaiveDateTime, FleetError> {
        let requested = cutoff.unwrap_or_else(|| self.fleet.min_timestamp());
        let resolved = self
            .fleet
            .resolve_cutoff(requested, self.config.cutoff_policy)?;
        if resolved != requested {
            tracing::debug!("Clamped cutoff {} to {}", requested, resolved);
        }
        Ok(resolved)
    }

    pub fn snapshots_at(&self, cutoff: Option<NaiveDateTime>) -> Result<SnapshotView, FleetError> {
        let cutoff = self.resolve_cutoff(cutoff)?;
        let snapshots = self.fleet.snapshots(cutoff)?;
        let alert = classify_alert(
            &snapshots,
            cutoff,
            self.fleet.max_timestamp(),
            self.config.alert.threshold_tons,
        );

        Ok(SnapshotView {
            cutoff,
            snapshots,
            alert,
        })
    }

    pub fn dashboard_at(&self, cutoff: Option<NaiveDateTime>) -> Result<Dashboard, FleetError> {
        let view = self.snapshots_at(cutoff)?;
        let threshold = self.config.alert.threshold_tons;

        let mut layers = Vec::with_capacity(view.snapshots.len());
        let mut bars = Vec::with_capacity(view.snapshots.len());
        for snapshot in view.snapshots.values() {
            let category = self.categories.resolve(
                &snapshot.vehicle_id,
                self.fleet.explicit_category(&snapshot.vehicle_id),
            );

            let marker = snapshot.last_position.map(|position| Marker {
                position,
                label: format!("{} - {} t", snapshot.vehicle_id, snapshot.cumulative_volume),
            });

            bars.push(KpiBar {
                vehicle_id: snapshot.vehicle_id.clone(),
                value: snapshot.cumulative_volume,
                color: category.color.clone(),
            });

            layers.push(VehicleLayer {
                vehicle_id: snapshot.vehicle_id.clone(),
                category: category.name,
                color: category.color,
                trace: snapshot.trace.clone(),
                marker,
            });
        }

        let total_volume: f64 = bars.iter().map(|b| b.value).sum();
        let tiles = vec![
            TileData::new("total_volume", "Volume transported", "t", total_volume, 0),
            TileData::new(
                "active_vehicles",
                "Active vehicles",
                "",
                view.snapshots.len() as f64,
                0,
            ),
        ];

        tracing::debug!(
            "Dashboard at {}: {} active vehicles, alert {:?}",
            view.cutoff,
            layers.len(),
            view.alert
        );

        let map = &self.config.map;
        Ok(Dashboard {
            title: map.title.clone(),
            timeline: Timeline {
                cutoff: view.cutoff,
                min: self.fleet.min_timestamp(),
                max: self.fleet.max_timestamp(),
            },
            map: MapView {
                center: (map.center_lat, map.center_lon),
                zoom: map.zoom,
                layers,
            },
            tiles,
            kpi_chart: KpiChart {
                title: "KPI - Volume transported".to_string(),
                y_axis_title: "Tons".to_string(),
                bars,
            },
            alert: AlertBanner::new(view.alert, threshold),
        })
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        let vehicles = self
            .fleet
            .vehicle_ids()
            .into_iter()
            .map(|vehicle_id| {
                let category = self
                    .categories
                    .resolve(vehicle_id, self.fleet.explicit_category(vehicle_id));
                VehicleSummary {
                    vehicle_id: vehicle_id.to_string(),
                    category: category.name,
                    color: category.color,
                    samples: self.fleet.sample_count(vehicle_id),
                }
            })
            .collect();

        FleetSummary {
            record_count: self.fleet.record_count(),
            start: self.fleet.min_timestamp(),
            end: self.fleet.max_timestamp(),
            vehicles,
        }
    }
}
