//! HTTP report store client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::ReportError;
use crate::models::{RawReport, StoreResponse};

/// Source of stored reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn get_report(&self, id: &str, token: &str) -> Result<RawReport, ReportError>;
}

/// `GET {base}/report/{id}` with a bearer token
pub struct HttpReportStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpReportStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReportError> {
        let base_url = Url::parse(base_url).map_err(|e| ReportError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ReportError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aqhr/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The id is pushed as a single path segment, so it is percent-encoded
    pub fn report_url(&self, id: &str) -> Result<Url, ReportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ReportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("report")
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl ReportStore for HttpReportStore {
    async fn get_report(&self, id: &str, token: &str) -> Result<RawReport, ReportError> {
        let url = self.report_url(id)?;
        tracing::debug!(%url, "Fetching health report");

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        // The store reports failures in the body, so parse it whatever the status
        let body = response.bytes().await?;
        let parsed: StoreResponse = serde_json::from_slice(&body).map_err(|e| {
            ReportError::Fetch(format!("unreadable response (HTTP {status}): {e}"))
        })?;

        tracing::debug!(%status, success = parsed.success, "Report store responded");
        interpret_response(parsed)
    }
}

/// Map the store envelope onto a report or an error
pub fn interpret_response(response: StoreResponse) -> Result<RawReport, ReportError> {
    if !response.success {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| ReportError::Fetch(String::new()).to_string());
        return Err(ReportError::ServerRejected(message));
    }

    response
        .report
        .ok_or_else(|| ReportError::Fetch("store reported success without a report".to_string()))
}
