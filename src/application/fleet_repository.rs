// Repository trait for fleet data access
use crate::domain::fleet::PositionRecord;
use async_trait::async_trait;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// Where the records come from, for logs
    fn describe(&self) -> String;

    /// Load every position record, already validated
    async fn load_records(&self) -> anyhow::Result<Vec<PositionRecord>>;
}
