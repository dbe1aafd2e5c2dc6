//! Ranked, size-bounded views over the raw frequency tables.
//!
//! All rankings are sorted by count in descending order. Entries with equal
//! counts keep the first-seen order of the underlying [IndexMap], so a ranking
//! is always reproducible for the same input.

use indexmap::IndexMap;
use std::cmp::Reverse;
use std::hash::Hash;

/// Ranks the entries of a frequency table by count, in descending order.
pub fn rank_by_count_descending<K: Clone>(counts: &IndexMap<K, u64>) -> Vec<(K, u64)> {
    let ranking = counts.iter().map(|(key, count)| (key.clone(), *count));
    sort_descending(ranking.collect())
}

/// Ranks hosts by the number of requests they performed, in descending order.
pub fn rank_hosts_by_request_count_descending<K: Clone, V>(
    requests: &IndexMap<K, Vec<V>>,
) -> Vec<(K, u64)> {
    let ranking = requests
        .iter()
        .map(|(key, requests)| (key.clone(), requests.len() as u64));

    sort_descending(ranking.collect())
}

fn sort_descending<K>(mut ranking: Vec<(K, u64)>) -> Vec<(K, u64)> {
    // `sort_by_key()` is stable, which preserves first-seen order for ties.
    ranking.sort_by_key(|(_, count)| Reverse(*count));
    ranking
}

/// Returns the first `n` entries, or fewer if the sequence is shorter.
pub fn take_top<T>(ranking: &[T], n: usize) -> &[T] {
    &ranking[..n.min(ranking.len())]
}

/// Walks a failure ranking and collects up to `n` distinct resources.
///
/// Resources are compared by value. The result is never padded, so it is
/// shorter than `n` if there are fewer distinct failing resources.
pub fn top_distinct_failing_resources<K: Clone + PartialEq>(
    ranking: &[(K, u64)],
    n: usize,
) -> Vec<K> {
    let mut top: Vec<K> = Vec::with_capacity(n.min(ranking.len()));
    for (resource, _) in ranking {
        if top.len() >= n {
            break;
        }
        if !top.contains(resource) {
            top.push(resource.clone());
        }
    }
    top
}

/// Returns the first `n` hosts of a host ranking together with all resources
/// they requested.
pub fn top_hosts_with_requests<K, V>(
    ranking: &[(K, u64)],
    requests_per_host: &IndexMap<K, Vec<V>>,
    n: usize,
) -> Vec<(K, Vec<V>)>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    take_top(ranking, n)
        .iter()
        .filter_map(|(host, _)| {
            let requests = requests_per_host.get(host)?;
            Some((host.clone(), requests.clone()))
        })
        .collect()
}

/// Counts the resources requested by each host and keeps the `n` most
/// frequent ones per host.
pub fn top_resources_per_host<H, R>(
    top_hosts: &[(H, Vec<R>)],
    n: usize,
) -> IndexMap<H, Vec<(R, u64)>>
where
    H: Clone + Hash + Eq,
    R: Clone + Hash + Eq,
{
    top_hosts
        .iter()
        .map(|(host, requests)| {
            let mut counts = IndexMap::<R, u64>::new();
            for resource in requests {
                *counts.entry(resource.clone()).or_default() += 1;
            }

            let mut ranking = rank_by_count_descending(&counts);
            ranking.truncate(n);

            (host.clone(), ranking)
        })
        .collect()
}
