use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

/// Returns an error with status 404 and a JSON body in the same shape as
/// all other API errors.
pub fn not_found() -> Response {
    let body = json!({ "errors": [{ "detail": "Not Found" }] });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
