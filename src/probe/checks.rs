//! Individual probe checks.

use reqwest::{header, Method, StatusCode};
use tokio::task::JoinSet;

use crate::http::validation::{EXPECTED_ACCEPT, EXPECTED_POST_BODY};
use crate::probe::{Probe, ProbeError};

/// What a finished request looked like, reduced to what the checks verify.
struct Observed {
    status: StatusCode,
    content_length: Option<String>,
    body: String,
}

impl Probe {
    /// GET `/get` with the required headers; expect 200 `OK`.
    pub async fn check_get(&self) -> Result<(), ProbeError> {
        let observed = self.fetch("get", Method::GET, "/get", None, true).await?;
        verify("get", &observed, "OK")
    }

    /// POST `/post` with `TestRequest!`; expect 200 `OK`.
    pub async fn check_post(&self) -> Result<(), ProbeError> {
        let observed = self
            .fetch("post", Method::POST, "/post", Some(EXPECTED_POST_BODY), true)
            .await?;
        verify("post", &observed, "OK")
    }

    /// GET `/redirect` and follow it; expect 200 `Redirected`.
    pub async fn check_redirect(&self) -> Result<(), ProbeError> {
        let observed = self
            .fetch("redirect", Method::GET, "/redirect", None, false)
            .await?;
        verify("redirect", &observed, "Redirected")
    }

    /// Fire `requests` concurrent GETs at `/stress`; every one must pass.
    pub async fn check_stress(&self, requests: usize) -> Result<(), ProbeError> {
        let mut tasks = JoinSet::new();
        for _ in 0..requests {
            let probe = self.clone();
            tasks.spawn(async move {
                let observed = probe
                    .fetch("stress", Method::GET, "/stress", None, true)
                    .await?;
                verify("stress", &observed, "OK")
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.map_err(|e| ProbeError::failed("stress", e.to_string()))??;
        }
        Ok(())
    }

    async fn fetch(
        &self,
        check: &'static str,
        method: Method,
        path: &str,
        body: Option<&'static [u8]>,
        with_accept: bool,
    ) -> Result<Observed, ProbeError> {
        let mut request = self.client.request(method, self.url(path));
        if with_accept {
            request = request.header(header::ACCEPT, EXPECTED_ACCEPT);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ProbeError::Connection { check, source })?;

        let status = response.status();
        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|source| ProbeError::Connection { check, source })?;

        Ok(Observed {
            status,
            content_length,
            body,
        })
    }
}

/// Body first, then `Content-Length`, then status.
fn verify(check: &'static str, observed: &Observed, expected_body: &str) -> Result<(), ProbeError> {
    if observed.body != expected_body {
        return Err(ProbeError::failed(
            check,
            format!(
                "Expected body: [\n{}\n], got: [\n{}]",
                expected_body, observed.body
            ),
        ));
    }

    let length = observed
        .content_length
        .as_deref()
        .ok_or_else(|| ProbeError::failed(check, "Expected 'Content-Length' header"))?;
    let length: usize = length
        .trim()
        .parse()
        .map_err(|_| ProbeError::failed(check, format!("Invalid 'Content-Length' {length:?}")))?;
    if length != observed.body.len() {
        return Err(ProbeError::failed(
            check,
            format!(
                "Received body ({}) and 'Content-Length' ({}) mismatch.",
                observed.body.len(),
                length
            ),
        ));
    }

    if observed.status != StatusCode::OK {
        return Err(ProbeError::failed(
            check,
            format!("Expected 200, got {}", observed.status.as_u16()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(status: StatusCode, content_length: Option<&str>, body: &str) -> Observed {
        Observed {
            status,
            content_length: content_length.map(str::to_owned),
            body: body.to_owned(),
        }
    }

    #[test]
    fn test_verify_accepts_matching_response() {
        assert!(verify("get", &observed(StatusCode::OK, Some("2"), "OK"), "OK").is_ok());
    }

    #[test]
    fn test_verify_checks_body_before_status() {
        let err = verify(
            "get",
            &observed(StatusCode::BAD_REQUEST, Some("22"), "Non-empty body in GET\n"),
            "OK",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("get: FAIL - Expected body"));
    }

    #[test]
    fn test_verify_requires_content_length() {
        let err = verify("post", &observed(StatusCode::OK, None, "OK"), "OK").unwrap_err();
        assert_eq!(
            err.to_string(),
            "post: FAIL - Expected 'Content-Length' header"
        );
    }

    #[test]
    fn test_verify_detects_length_mismatch() {
        let err = verify("post", &observed(StatusCode::OK, Some("3"), "OK"), "OK").unwrap_err();
        assert_eq!(
            err.to_string(),
            "post: FAIL - Received body (2) and 'Content-Length' (3) mismatch."
        );
    }

    #[test]
    fn test_verify_requires_200() {
        let err = verify(
            "redirect",
            &observed(StatusCode::CREATED, Some("10"), "Redirected"),
            "Redirected",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "redirect: FAIL - Expected 200, got 201");
    }
}
