//! Fixed test endpoints.
//!
//! Handlers are registered with `any` so that method checks happen here and
//! produce the descriptive 400 body instead of axum's bare 405.

use axum::{
    body::Bytes,
    http::{HeaderMap, Method},
    response::Response,
};

use crate::http::response;
use crate::http::validation::{validate_get, validate_post};

/// `/get` and `/stress`.
pub async fn get(method: Method, headers: HeaderMap, body: Bytes) -> Response {
    match validate_get(&method, &headers, &body) {
        Ok(()) => response::ok(),
        Err(e) => response::fail(e),
    }
}

/// `/post`.
pub async fn post(method: Method, headers: HeaderMap, body: Bytes) -> Response {
    match validate_post(&method, &headers, &body) {
        Ok(()) => response::ok(),
        Err(e) => response::fail(e),
    }
}

/// `/redirect`, regardless of method or body.
pub async fn redirect() -> Response {
    response::redirect()
}

/// `/redirected`, regardless of method or body.
pub async fn redirected() -> Response {
    response::redirected()
}

pub async fn not_found() -> Response {
    response::not_found()
}
