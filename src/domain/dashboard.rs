// Dashboard domain model
use super::alert::AlertLevel;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub timeline: Timeline,
    pub map: MapView,
    pub tiles: Vec<TileData>,
    pub kpi_chart: KpiChart,
    pub alert: AlertBanner,
}

/// Slider state: the selected cutoff and the range it may move in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timeline {
    pub cutoff: NaiveDateTime,
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub layers: Vec<VehicleLayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleLayer {
    pub vehicle_id: String,
    pub category: String,
    pub color: String,
    pub trace: Vec<(f64, f64)>,
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: (f64, f64),
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: &str, value: f64, precision: i32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiChart {
    pub title: String,
    pub y_axis_title: String,
    pub bars: Vec<KpiBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiBar {
    pub vehicle_id: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertBanner {
    pub level: AlertLevel,
    pub severity: String,
    pub message: String,
}

impl AlertBanner {
    pub fn new(level: AlertLevel, threshold: f64) -> Self {
        Self {
            level,
            severity: level.severity().to_string(),
            message: level.message(threshold),
        }
    }
}

/// Static description of the loaded fleet
#[derive(Debug, Clone, Serialize)]
pub struct FleetSummary {
    pub record_count: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub vehicles: Vec<VehicleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    pub vehicle_id: String,
    pub category: String,
    pub color: String,
    pub samples: usize,
}
