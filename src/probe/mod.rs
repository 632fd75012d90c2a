//! Reference client check suite.
//!
//! Exercises a running test server the way the naett client tests do:
//! GET, POST and a followed redirect, plus an optional `/stress` burst.
//! The `rig-probe` binary wraps this so it can stand in for the external
//! test executable.

pub mod checks;

use thiserror::Error;

use crate::http::validation::EXPECTED_USER_AGENT;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{check}: FAIL - Connection failed: {source}")]
    Connection {
        check: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{check}: FAIL - {message}")]
    Failed { check: &'static str, message: String },
}

impl ProbeError {
    fn failed(check: &'static str, message: impl Into<String>) -> Self {
        ProbeError::Failed {
            check,
            message: message.into(),
        }
    }
}

/// Names of the checks that passed, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub passed: Vec<&'static str>,
}

/// Client bound to one test server endpoint.
#[derive(Debug, Clone)]
pub struct Probe {
    client: reqwest::Client,
    endpoint: String,
}

impl Probe {
    /// `endpoint` is the server's base URL, e.g. `http://localhost:4711`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(EXPECTED_USER_AGENT)
            .no_proxy()
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Run every check, stopping at the first failure.
    ///
    /// `stress_requests` of zero skips the `/stress` burst.
    pub async fn run_all(&self, stress_requests: usize) -> Result<ProbeReport, ProbeError> {
        let mut report = ProbeReport::default();

        self.check_get().await?;
        report.passed.push("get");

        self.check_post().await?;
        report.passed.push("post");

        self.check_redirect().await?;
        report.passed.push("redirect");

        if stress_requests > 0 {
            self.check_stress(stress_requests).await?;
            report.passed.push("stress");
        }

        tracing::debug!(passed = ?report.passed, "Probe finished");
        Ok(report)
    }
}
