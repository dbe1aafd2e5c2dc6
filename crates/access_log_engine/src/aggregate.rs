use crate::{RequestRecord, StatsError};
use indexmap::IndexMap;
use tracing::instrument;

/// A requested resource. `None` collects all records without a resource.
pub type Resource = Option<String>;

/// A requesting host. `None` collects all records without a host.
pub type Host = Option<String>;

/// Raw frequency tables, accumulated in a single pass over all records.
///
/// All maps keep their keys in first-seen order, which the ranking functions
/// rely on to break ties deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationState {
    resource_call_count: IndexMap<Resource, u64>,
    requests_per_host: IndexMap<Host, Vec<Resource>>,
    resource_fail_count: IndexMap<Resource, u64>,
    all_requests: u64,
    successful_requests: u64,
}

impl AggregationState {
    /// How many times each resource was requested.
    pub fn resource_call_count(&self) -> &IndexMap<Resource, u64> {
        &self.resource_call_count
    }

    /// The resources requested by each host, in input order.
    pub fn requests_per_host(&self) -> &IndexMap<Host, Vec<Resource>> {
        &self.requests_per_host
    }

    /// How many requests for each resource failed. Resources without any
    /// failure are not included.
    pub fn resource_fail_count(&self) -> &IndexMap<Resource, u64> {
        &self.resource_fail_count
    }

    /// The total number of records, including unparsable ones.
    pub fn all_requests(&self) -> u64 {
        self.all_requests
    }

    pub fn successful_requests(&self) -> u64 {
        self.successful_requests
    }

    pub fn failed_requests(&self) -> u64 {
        self.all_requests - self.successful_requests
    }
}

/// Aggregates the given records into an [AggregationState].
///
/// `None` means that no record sequence was produced at all (e.g. because the
/// log could not be retrieved) and results in [StatsError::InvalidInput]. An
/// empty slice is valid input and results in an all-zero state.
#[instrument(level = "debug", skip_all)]
pub fn aggregate(records: Option<&[RequestRecord]>) -> Result<AggregationState, StatsError> {
    let records = records.ok_or(StatsError::InvalidInput)?;

    let mut state = AggregationState {
        all_requests: records.len() as u64,
        ..Default::default()
    };

    for record in records {
        let resource = &record.resource;

        *state
            .resource_call_count
            .entry(resource.clone())
            .or_default() += 1;

        state
            .requests_per_host
            .entry(record.host.clone())
            .or_default()
            .push(resource.clone());

        if record.is_successful() {
            state.successful_requests += 1;
        } else {
            *state
                .resource_fail_count
                .entry(resource.clone())
                .or_default() += 1;
        }
    }

    Ok(state)
}
