use crate::{AggregationState, StatsError};

/// The percentage of requests with a `2xx` or `3xx` response code.
///
/// Returns [StatsError::NoData] if the log did not contain any requests.
pub fn success_rate(state: &AggregationState) -> Result<f64, StatsError> {
    percentage(state.successful_requests(), state.all_requests())
}

/// The percentage of requests that did not succeed, including requests that
/// could not be parsed.
///
/// Returns [StatsError::NoData] if the log did not contain any requests.
pub fn failure_rate(state: &AggregationState) -> Result<f64, StatsError> {
    percentage(state.failed_requests(), state.all_requests())
}

fn percentage(part: u64, total: u64) -> Result<f64, StatsError> {
    if total == 0 {
        return Err(StatsError::NoData);
    }

    Ok(part as f64 / total as f64 * 100.)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::test_utils::*;
    use crate::RequestRecord;
    use claims::{assert_err, assert_err_eq, assert_ok, assert_ok_eq};
    use insta::assert_snapshot;

    #[test]
    fn test_no_data() {
        let state = assert_ok!(aggregate(Some(&[])));

        let error = assert_err!(success_rate(&state));
        assert_eq!(error, StatsError::NoData);
        assert_snapshot!(error, @"Cannot calculate percentages without any requests");
        assert_err_eq!(failure_rate(&state), StatsError::NoData);
    }

    #[test]
    fn test_rates() {
        let records = [
            record("a.example.com", "/a", "200"),
            record("a.example.com", "/b", "304"),
            record("a.example.com", "/c", "404"),
            RequestRecord::default(),
        ];
        let state = assert_ok!(aggregate(Some(&records)));

        assert_ok_eq!(success_rate(&state), 50.);
        assert_ok_eq!(failure_rate(&state), 50.);
    }

    #[test]
    fn test_rates_add_up() {
        let records = [
            record("a.example.com", "/a", "200"),
            record("a.example.com", "/b", "500"),
            record("a.example.com", "/c", "404"),
        ];
        let state = assert_ok!(aggregate(Some(&records)));

        let success = assert_ok!(success_rate(&state));
        let failure = assert_ok!(failure_rate(&state));
        assert!((success - 100. / 3.).abs() < 1e-9);
        assert!((success + failure - 100.).abs() < 1e-9);
        assert!(success.is_finite() && failure.is_finite());
    }
}
