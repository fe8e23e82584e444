// Domain layer - Fleet model, aggregation rules and dashboard shapes
pub mod alert;
pub mod category;
pub mod dashboard;
pub mod error;
pub mod fleet;
pub mod snapshot;

#[cfg(test)]
pub mod fixtures;
