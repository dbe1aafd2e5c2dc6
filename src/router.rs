use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use http::{Method, StatusCode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;

use crate::app::AppState;
use crate::controllers::*;
use crate::util::errors::not_found;

pub fn build_axum_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/logs", get(stats::get_logs))
        .route("/top10Resources", get(stats::get_top_resources))
        .route("/successPercentage", get(stats::get_success_percentage))
        .route("/failPercentage", get(stats::get_failure_percentage))
        .route("/top10FailingResources", get(stats::get_top_failing_resources))
        .route("/top10Hosts", get(stats::get_top_hosts))
        .route(
            "/top5RequestsForTop10Hosts",
            get(stats::get_top_resources_per_host),
        )
        .fallback(|method: Method| async move {
            match method {
                Method::HEAD => StatusCode::NOT_FOUND.into_response(),
                _ => not_found(),
            }
        })
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config;
    use access_log_engine::{Statistics, parse_lines};
    use axum::body::Body;
    use claims::assert_ok;
    use http::Request;
    use insta::assert_json_snapshot;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_state(statistics: Option<Statistics>) -> AppState {
        let app = App::new(config::Server::default());
        if let Some(statistics) = statistics {
            app.publish(statistics);
        }
        AppState::new(app)
    }

    fn basic_statistics() -> Statistics {
        let log = include_str!("../crates/access_log_engine/test_data/basic.log");
        let records = parse_lines(log.lines());
        assert_ok!(Statistics::compute(Some(records.as_slice())))
    }

    async fn request(state: AppState, method: Method, path: &str) -> (StatusCode, Value) {
        let router = build_axum_router(state);

        let request = Request::builder().method(method).uri(path).body(Body::empty());
        let response = assert_ok!(router.oneshot(assert_ok!(request)).await);

        let status = response.status();
        let bytes = assert_ok!(axum::body::to_bytes(response.into_body(), usize::MAX).await);
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            assert_ok!(serde_json::from_slice(&bytes))
        };

        (status, json)
    }

    async fn get_json(state: AppState, path: &str) -> (StatusCode, Value) {
        request(state, Method::GET, path).await
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, json) = get_json(app_state(None), "/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "errors": [{ "detail": "Not Found" }] }));

        let (status, json) = request(app_state(None), Method::HEAD, "/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, Value::Null);
    }

    #[tokio::test]
    async fn test_without_statistics() {
        for path in [
            "/top10Resources",
            "/top10FailingResources",
            "/top10Hosts",
            "/top5RequestsForTop10Hosts",
        ] {
            let (status, json) = get_json(app_state(None), path).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(json, json!([]), "{path}");
        }

        for path in ["/successPercentage", "/failPercentage"] {
            let (status, json) = get_json(app_state(None), path).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(json, json!({}), "{path}");
        }
    }

    #[tokio::test]
    async fn test_percentages() {
        let state = app_state(Some(basic_statistics()));

        let (status, json) = get_json(state.clone(), "/successPercentage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "successful request percentage": 77.778 }));

        let (status, json) = get_json(state, "/failPercentage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "failed request percentage": 22.222 }));
    }

    #[tokio::test]
    async fn test_empty_log_percentages() {
        let state = app_state(Some(assert_ok!(Statistics::compute(Some(&[])))));

        let (status, json) = get_json(state, "/successPercentage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({}));
    }

    #[tokio::test]
    async fn test_top_resources() {
        let (status, json) = get_json(app_state(Some(basic_statistics())), "/top10Resources").await;
        assert_eq!(status, StatusCode::OK);

        let resources = json.as_array().map(Vec::len);
        assert_eq!(resources, Some(10));
        assert_eq!(json[0], json!({ "resource": null, "requests": 3 }));
        assert_eq!(json[1], json!({ "resource": "/", "requests": 2 }));
    }

    #[tokio::test]
    async fn test_top_failing_resources() {
        let state = app_state(Some(basic_statistics()));
        let (status, json) = get_json(state, "/top10FailingResources").await;
        assert_eq!(status, StatusCode::OK);
        assert_json_snapshot!(json, @r#"
        [
          {
            "resource": null
          },
          {
            "resource": "/pub/winvn/readme.txt"
          },
          {
            "resource": "/pub/winvn/release.txt"
          }
        ]
        "#);
    }

    #[tokio::test]
    async fn test_top_hosts() {
        let (status, json) = get_json(app_state(Some(basic_statistics())), "/top10Hosts").await;
        assert_eq!(status, StatusCode::OK);
        assert_json_snapshot!(json, @r#"
        [
          {
            "host": "uplherc.upl.com",
            "requests": 6
          },
          {
            "host": "slppp6.intermind.net",
            "requests": 4
          },
          {
            "host": "ix-esc-ca2-07.ix.netcom.com",
            "requests": 3
          },
          {
            "host": null,
            "requests": 3
          },
          {
            "host": "kgtyk4.kj.yamagata-u.ac.jp",
            "requests": 2
          },
          {
            "host": "d0ucr6.fnal.gov",
            "requests": 2
          },
          {
            "host": "in24.inetnebr.com",
            "requests": 1
          },
          {
            "host": "piweba4y.prodigy.com",
            "requests": 1
          },
          {
            "host": "133.43.96.45",
            "requests": 1
          },
          {
            "host": "163.205.85.3",
            "requests": 1
          }
        ]
        "#);
    }

    #[tokio::test]
    async fn test_top_resources_per_host() {
        let state = app_state(Some(basic_statistics()));
        let (status, json) = get_json(state, "/top5RequestsForTop10Hosts").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(json.as_array().map(Vec::len), Some(10));
        assert_eq!(json[0]["host"], json!("uplherc.upl.com"));
        assert_eq!(
            json[0]["requests"][0],
            json!({ "resource": "/", "count": 1 })
        );
        assert_eq!(
            json[3],
            json!({ "host": null, "requests": [{ "resource": null, "count": 3 }] })
        );
    }

    #[tokio::test]
    async fn test_logs() {
        let (status, json) = get_json(app_state(Some(basic_statistics())), "/logs").await;
        assert_eq!(status, StatusCode::OK);

        let mut keys = json
            .as_object()
            .map(|object| object.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        keys.sort();

        let mut expected = vec![
            "failed",
            "frequent hosts",
            "frequent requests for frequent hosts",
            "frequent resources",
            "most requested",
            "successful",
        ];
        expected.sort();
        assert_eq!(keys, expected);

        assert_eq!(json["successful"], json!({ "successful request percentage": 77.778 }));
        assert_eq!(json["failed"], json!({ "failed request percentage": 22.222 }));
        assert_eq!(json["frequent hosts"].as_array().map(Vec::len), Some(10));
    }
}
