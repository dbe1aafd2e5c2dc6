//! Endpoints that expose the statistics of the ingested access log.
//!
//! While no statistics are available yet, list endpoints respond with an
//! empty array and percentage endpoints with an empty object.

use crate::app::AppState;
use crate::views::{self, *};
use axum::Json;

/// Combines the responses of all other endpoints into a single object.
pub async fn get_logs(state: AppState) -> Json<EncodableLogs> {
    Json(views::logs(state.statistics().as_deref()))
}

/// The 10 most requested resources, with the number of requests for each.
pub async fn get_top_resources(state: AppState) -> Json<Vec<EncodableResourceRequests>> {
    Json(views::most_requested(state.statistics().as_deref()))
}

/// The percentage of requests with a `2xx` or `3xx` response code.
pub async fn get_success_percentage(state: AppState) -> Json<EncodableSuccessPercentage> {
    Json(views::success_percentage(state.statistics().as_deref()))
}

/// The percentage of failed requests, including unparsable ones.
pub async fn get_failure_percentage(state: AppState) -> Json<EncodableFailurePercentage> {
    Json(views::failure_percentage(state.statistics().as_deref()))
}

/// Up to 10 distinct resources that failed most often.
pub async fn get_top_failing_resources(state: AppState) -> Json<Vec<EncodableFailingResource>> {
    Json(views::failing_resources(state.statistics().as_deref()))
}

/// The 10 hosts that performed the most requests.
pub async fn get_top_hosts(state: AppState) -> Json<Vec<EncodableHostRequests>> {
    Json(views::top_hosts(state.statistics().as_deref()))
}

/// The 5 most requested resources of each of the 10 most active hosts.
pub async fn get_top_resources_per_host(
    state: AppState,
) -> Json<Vec<EncodableHostTopResources>> {
    Json(views::top_resources_per_host(state.statistics().as_deref()))
}
