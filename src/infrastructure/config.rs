use crate::domain::alert::DEFAULT_THRESHOLD_TONS;
use crate::domain::category::{CategoryRule, CategoryTable};
use crate::domain::fleet::CutoffPolicy;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: FleetSource,
    #[serde(default)]
    pub alert: AlertSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub cutoff_policy: CutoffPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            source: FleetSource::default(),
            alert: AlertSettings::default(),
            map: MapSettings::default(),
            categories: default_categories(),
            cutoff_policy: CutoffPolicy::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn category_table(&self) -> CategoryTable {
        CategoryTable::new(self.categories.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where position records are loaded from
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FleetSource {
    #[default]
    Builtin,
    File {
        path: PathBuf,
    },
    Http {
        url: String,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    pub threshold_tons: f64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold_tons: DEFAULT_THRESHOLD_TONS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub title: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: "Fleet Logistics Simulator".to_string(),
            center_lat: 21.88,
            center_lon: -102.28,
            zoom: 13,
        }
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("Camión", "truck", "blue"),
        CategoryRule::new("Tren", "train", "green"),
    ]
}

/// Load `config/simulator.*` (optional) overlaid with `FLEET_SIM__*` env vars
pub fn load_simulator_config() -> anyhow::Result<SimulatorConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/simulator").required(false))
        .add_source(config::Environment::with_prefix("FLEET_SIM").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
