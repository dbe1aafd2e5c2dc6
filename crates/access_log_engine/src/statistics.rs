use crate::aggregate::{Host, Resource};
use crate::percentage::{failure_rate, success_rate};
use crate::ranking::*;
use crate::{AggregationState, RequestRecord, StatsError, aggregate};
use indexmap::IndexMap;
use tracing::{debug, instrument};

/// Number of hosts included in the top hosts views.
pub const TOP_HOSTS: usize = 10;

/// Number of distinct resources included in the top failing resources view.
pub const TOP_FAILING_RESOURCES: usize = 10;

/// Number of resources included per host in the per-host view.
pub const TOP_RESOURCES_PER_HOST: usize = 5;

/// Sorted, size-bounded views derived from an [AggregationState].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedViews {
    resources_by_calls: Vec<(Resource, u64)>,
    failing_resources_by_count: Vec<(Resource, u64)>,
    hosts_by_requests: Vec<(Host, u64)>,
    top_hosts: Vec<(Host, Vec<Resource>)>,
    top_failing_resources: Vec<Resource>,
    top_resources_per_host: IndexMap<Host, Vec<(Resource, u64)>>,
}

impl RankedViews {
    /// Derives all views from the given state.
    ///
    /// Every step only reads the outputs of the previous steps, so the views
    /// can't observe each other in a partially built state.
    pub fn from_state(state: &AggregationState) -> Self {
        let resources_by_calls = rank_by_count_descending(state.resource_call_count());
        let failing_resources_by_count = rank_by_count_descending(state.resource_fail_count());
        let hosts_by_requests = rank_hosts_by_request_count_descending(state.requests_per_host());

        let top_hosts =
            top_hosts_with_requests(&hosts_by_requests, state.requests_per_host(), TOP_HOSTS);

        let top_failing_resources =
            top_distinct_failing_resources(&failing_resources_by_count, TOP_FAILING_RESOURCES);

        let top_resources_per_host = top_resources_per_host(&top_hosts, TOP_RESOURCES_PER_HOST);

        Self {
            resources_by_calls,
            failing_resources_by_count,
            hosts_by_requests,
            top_hosts,
            top_failing_resources,
            top_resources_per_host,
        }
    }

    /// All resources, ranked by the number of requests.
    pub fn resources_by_calls(&self) -> &[(Resource, u64)] {
        &self.resources_by_calls
    }

    /// All failing resources, ranked by the number of failed requests.
    pub fn failing_resources_by_count(&self) -> &[(Resource, u64)] {
        &self.failing_resources_by_count
    }

    /// All hosts, ranked by the number of requests they performed.
    pub fn hosts_by_requests(&self) -> &[(Host, u64)] {
        &self.hosts_by_requests
    }

    /// The [TOP_HOSTS] most active hosts and all resources they requested.
    pub fn top_hosts(&self) -> &[(Host, Vec<Resource>)] {
        &self.top_hosts
    }

    /// Up to [TOP_FAILING_RESOURCES] distinct resources that failed most often.
    pub fn top_failing_resources(&self) -> &[Resource] {
        &self.top_failing_resources
    }

    /// The [TOP_RESOURCES_PER_HOST] most requested resources of each of the
    /// [TOP_HOSTS] most active hosts.
    pub fn top_resources_per_host(&self) -> &IndexMap<Host, Vec<(Resource, u64)>> {
        &self.top_resources_per_host
    }
}

/// An immutable snapshot of everything that was computed from one log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    state: AggregationState,
    views: RankedViews,
}

impl Statistics {
    /// Aggregates the records and derives all ranked views from them.
    #[instrument(skip_all)]
    pub fn compute(records: Option<&[RequestRecord]>) -> Result<Self, StatsError> {
        let state = aggregate(records)?;
        let views = RankedViews::from_state(&state);

        debug!(
            requests = state.all_requests(),
            successful = state.successful_requests(),
            resources = views.resources_by_calls.len(),
            hosts = views.hosts_by_requests.len(),
            "Computed access log statistics"
        );

        Ok(Self { state, views })
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    pub fn views(&self) -> &RankedViews {
        &self.views
    }

    /// The `n` most requested resources.
    pub fn most_requested(&self, n: usize) -> &[(Resource, u64)] {
        take_top(&self.views.resources_by_calls, n)
    }

    /// See [success_rate].
    pub fn success_rate(&self) -> Result<f64, StatsError> {
        success_rate(&self.state)
    }

    /// See [failure_rate].
    pub fn failure_rate(&self) -> Result<f64, StatsError> {
        failure_rate(&self.state)
    }
}
