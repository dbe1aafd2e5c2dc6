//! JSON encodings of the [Statistics] views.
//!
//! Missing hosts and resources (i.e. lines that could not be parsed) are
//! encoded as `null`.

use access_log_engine::{Host, Resource, Statistics, StatsError};
use serde::Serialize;

/// Number of resources included in the most requested view.
pub const MOST_REQUESTED: usize = 10;

#[derive(Debug, Serialize, PartialEq)]
pub struct EncodableResourceRequests {
    pub resource: Resource,
    pub requests: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EncodableFailingResource {
    pub resource: Resource,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EncodableHostRequests {
    pub host: Host,
    pub requests: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EncodableResourceCount {
    pub resource: Resource,
    pub count: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EncodableHostTopResources {
    pub host: Host,
    pub requests: Vec<EncodableResourceCount>,
}

/// Serialized as `{}` if no percentage could be calculated.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct EncodableSuccessPercentage {
    #[serde(
        rename = "successful request percentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<f64>,
}

/// Serialized as `{}` if no percentage could be calculated.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct EncodableFailurePercentage {
    #[serde(
        rename = "failed request percentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<f64>,
}

/// All views combined into a single object.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct EncodableLogs {
    #[serde(rename = "most requested")]
    pub most_requested: Vec<EncodableResourceRequests>,
    pub successful: EncodableSuccessPercentage,
    pub failed: EncodableFailurePercentage,
    #[serde(rename = "frequent resources")]
    pub frequent_resources: Vec<EncodableFailingResource>,
    #[serde(rename = "frequent hosts")]
    pub frequent_hosts: Vec<EncodableHostRequests>,
    #[serde(rename = "frequent requests for frequent hosts")]
    pub frequent_requests_for_frequent_hosts: Vec<EncodableHostTopResources>,
}

pub fn most_requested(statistics: Option<&Statistics>) -> Vec<EncodableResourceRequests> {
    let Some(statistics) = statistics else {
        return Vec::new();
    };

    statistics
        .most_requested(MOST_REQUESTED)
        .iter()
        .map(|(resource, requests)| EncodableResourceRequests {
            resource: resource.clone(),
            requests: *requests,
        })
        .collect()
}

pub fn success_percentage(statistics: Option<&Statistics>) -> EncodableSuccessPercentage {
    let rate = statistics.map(Statistics::success_rate);
    EncodableSuccessPercentage {
        percentage: encode_rate(rate),
    }
}

pub fn failure_percentage(statistics: Option<&Statistics>) -> EncodableFailurePercentage {
    let rate = statistics.map(Statistics::failure_rate);
    EncodableFailurePercentage {
        percentage: encode_rate(rate),
    }
}

pub fn failing_resources(statistics: Option<&Statistics>) -> Vec<EncodableFailingResource> {
    let Some(statistics) = statistics else {
        return Vec::new();
    };

    statistics
        .views()
        .top_failing_resources()
        .iter()
        .map(|resource| EncodableFailingResource {
            resource: resource.clone(),
        })
        .collect()
}

pub fn top_hosts(statistics: Option<&Statistics>) -> Vec<EncodableHostRequests> {
    let Some(statistics) = statistics else {
        return Vec::new();
    };

    statistics
        .views()
        .top_hosts()
        .iter()
        .map(|(host, requests)| EncodableHostRequests {
            host: host.clone(),
            requests: requests.len() as u64,
        })
        .collect()
}

pub fn top_resources_per_host(statistics: Option<&Statistics>) -> Vec<EncodableHostTopResources> {
    let Some(statistics) = statistics else {
        return Vec::new();
    };

    statistics
        .views()
        .top_resources_per_host()
        .iter()
        .map(|(host, resources)| EncodableHostTopResources {
            host: host.clone(),
            requests: resources
                .iter()
                .map(|(resource, count)| EncodableResourceCount {
                    resource: resource.clone(),
                    count: *count,
                })
                .collect(),
        })
        .collect()
}

pub fn logs(statistics: Option<&Statistics>) -> EncodableLogs {
    EncodableLogs {
        most_requested: most_requested(statistics),
        successful: success_percentage(statistics),
        failed: failure_percentage(statistics),
        frequent_resources: failing_resources(statistics),
        frequent_hosts: top_hosts(statistics),
        frequent_requests_for_frequent_hosts: top_resources_per_host(statistics),
    }
}

/// Rounds a rate to at most three fraction digits.
///
/// Missing statistics and [StatsError::NoData] are both encoded as `None`.
fn encode_rate(rate: Option<Result<f64, StatsError>>) -> Option<f64> {
    let rate = rate?.ok()?;
    Some((rate * 1000.).round() / 1000.)
}
