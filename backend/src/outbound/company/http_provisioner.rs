//! Reqwest-backed company provisioner.
//!
//! The adapter owns transport details only: request encoding, the client
//! timeout, status mapping and interpretation of the response body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{CompanyReply, CreateCompanyRequestDto, CreateCompanyResponseDto};
use crate::domain::ports::{CompanyProvisioner, CompanyProvisionerError};

/// Company provisioner that POSTs to one company-creation endpoint.
pub struct HttpCompanyProvisioner {
    client: Client,
    endpoint: Url,
}

impl HttpCompanyProvisioner {
    /// Build an adapter whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint companies are created at.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompanyProvisioner for HttpCompanyProvisioner {
    async fn create_company(&self, name: &str) -> Result<String, CompanyProvisionerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&CreateCompanyRequestDto { name })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "company service replied");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_company_id(body.as_ref())
    }
}

fn parse_company_id(body: &[u8]) -> Result<String, CompanyProvisionerError> {
    let decoded: CreateCompanyResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompanyProvisionerError::decode(format!("invalid company JSON payload: {error}"))
    })?;
    match decoded.into_reply() {
        CompanyReply::Created(id) => Ok(id),
        CompanyReply::Failed(message) => Err(CompanyProvisionerError::rejected(message)),
        CompanyReply::Malformed(reason) => Err(CompanyProvisionerError::decode(reason)),
    }
}

fn map_transport_error(error: reqwest::Error) -> CompanyProvisionerError {
    if error.is_timeout() {
        CompanyProvisionerError::timeout(error.to_string())
    } else {
        CompanyProvisionerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompanyProvisionerError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompanyProvisionerError::timeout(message)
        }
        _ => CompanyProvisionerError::rejected(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
