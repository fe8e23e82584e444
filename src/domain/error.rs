// Domain errors
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    #[error("no data available to simulate: the fleet has no position records")]
    EmptyInput,

    #[error("cutoff {cutoff} is outside the simulation window [{min}, {max}]")]
    InvalidCutoff {
        cutoff: NaiveDateTime,
        min: NaiveDateTime,
        max: NaiveDateTime,
    },
}
