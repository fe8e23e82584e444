// Vehicle categories (truck, train, ...) used for map coloring
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCategory {
    pub name: String,
    pub color: String,
}

/// Maps vehicle ids starting with `prefix` to a named category
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRule {
    pub prefix: String,
    pub name: String,
    pub color: String,
}

impl CategoryRule {
    pub fn new(prefix: &str, name: &str, color: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    fn category(&self) -> VehicleCategory {
        VehicleCategory {
            name: self.name.clone(),
            color: self.color.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
    fallback: VehicleCategory,
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self {
            rules,
            fallback: VehicleCategory {
                name: "other".to_string(),
                color: "gray".to_string(),
            },
        }
    }

    /// An explicit category name is looked up first; otherwise the longest
    /// matching prefix decides.
    pub fn resolve(&self, vehicle_id: &str, explicit: Option<&str>) -> VehicleCategory {
        if let Some(name) = explicit {
            return match self.rules.iter().find(|r| r.name == name) {
                Some(rule) => rule.category(),
                None => VehicleCategory {
                    name: name.to_string(),
                    color: self.fallback.color.clone(),
                },
            };
        }

        self.rules
            .iter()
            .filter(|r| vehicle_id.starts_with(&r.prefix))
            .max_by_key(|r| r.prefix.len())
            .map(CategoryRule::category)
            .unwrap_or_else(|| self.fallback.clone())
    }
}
