//! Response builders shared by the test handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::validation::RequestValidationError;

/// Path `/redirect` points clients at.
pub const REDIRECT_TARGET: &str = "/redirected";

/// 200 with body `OK`.
pub fn ok() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// 400 with the violated condition as body.
pub fn fail(error: RequestValidationError) -> Response {
    tracing::debug!(reason = %error, "Rejecting request");
    (StatusCode::BAD_REQUEST, format!("{error}\n")).into_response()
}

/// 302 to [`REDIRECT_TARGET`] with an empty body.
pub fn redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, REDIRECT_TARGET)]).into_response()
}

pub fn redirected() -> Response {
    (StatusCode::OK, "Redirected").into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}
