#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// The record sequence to aggregate was never produced.
    #[error("No request records were provided for aggregation")]
    InvalidInput,
    /// Percentages were requested for an empty log.
    #[error("Cannot calculate percentages without any requests")]
    NoData,
}
