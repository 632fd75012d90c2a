//! Request validation for the `/get`, `/stress` and `/post` endpoints.
//!
//! Checks run in a fixed order and the first violation wins:
//! method, body presence, `Accept`, `User-Agent`, then (POST only) the
//! exact body.

use axum::http::{header, HeaderMap, HeaderName, Method};
use thiserror::Error;

/// Value the client must send in `Accept`.
pub const EXPECTED_ACCEPT: &str = "naett/testresult";

/// Value the client must send in `User-Agent`.
pub const EXPECTED_USER_AGENT: &str = "Naett/1.0";

/// Body the client must send to `/post`.
pub const EXPECTED_POST_BODY: &[u8] = b"TestRequest!";

/// Headers every validated request must carry, with their display names.
static REQUIRED_HEADERS: [(HeaderName, &str, &str); 2] = [
    (header::ACCEPT, "Accept", EXPECTED_ACCEPT),
    (header::USER_AGENT, "User-Agent", EXPECTED_USER_AGENT),
];

/// Why a request was rejected. Rendered verbatim into the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    #[error("Unexpected method, {0:?}")]
    UnexpectedMethod(String),

    #[error("Non-empty body in GET")]
    NonEmptyBody,

    #[error("Empty body in POST")]
    EmptyBody,

    #[error(
        "Expected header {name:?} to be {expected:?}, got {}",
        quote_values(.actual)
    )]
    HeaderMismatch {
        name: &'static str,
        expected: &'static str,
        actual: Vec<String>,
    },

    #[error("Unexpected body: {}", format_bytes(.0))]
    UnexpectedBody(Vec<u8>),
}

/// Validate a request against the GET contract.
pub fn validate_get(
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), RequestValidationError> {
    expect_method(method, &Method::GET)?;

    if !body.is_empty() {
        return Err(RequestValidationError::NonEmptyBody);
    }

    check_required_headers(headers)
}

/// Validate a request against the POST contract.
pub fn validate_post(
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), RequestValidationError> {
    expect_method(method, &Method::POST)?;

    if body.is_empty() {
        return Err(RequestValidationError::EmptyBody);
    }

    check_required_headers(headers)?;

    if body != EXPECTED_POST_BODY {
        return Err(RequestValidationError::UnexpectedBody(body.to_vec()));
    }

    Ok(())
}

fn expect_method(actual: &Method, expected: &Method) -> Result<(), RequestValidationError> {
    if actual != expected {
        return Err(RequestValidationError::UnexpectedMethod(
            actual.as_str().to_string(),
        ));
    }
    Ok(())
}

fn check_required_headers(headers: &HeaderMap) -> Result<(), RequestValidationError> {
    for (name, display, expected) in REQUIRED_HEADERS.iter() {
        check_header(headers, name, *display, *expected)?;
    }
    Ok(())
}

/// A header matches only when its first value equals `expected` byte for byte.
pub fn check_header(
    headers: &HeaderMap,
    name: &HeaderName,
    display: &'static str,
    expected: &'static str,
) -> Result<(), RequestValidationError> {
    let matches = headers
        .get(name)
        .map(|value| value.as_bytes() == expected.as_bytes())
        .unwrap_or(false);

    if matches {
        return Ok(());
    }

    let actual = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();

    Err(RequestValidationError::HeaderMismatch {
        name: display,
        expected,
        actual,
    })
}

/// `["a" "b"]`
fn quote_values(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
    format!("[{}]", quoted.join(" "))
}

/// `[84 101 115 116]`
fn format_bytes(bytes: &[u8]) -> String {
    let decimals: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("[{}]", decimals.join(" "))
}
