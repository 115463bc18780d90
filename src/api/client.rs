use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    api::{error::ApiError, health::HealthReport},
    form::form_model::FormDraft,
    result::result_model::StrategyResult,
};

pub const HEALTH_PATH: &str = "/health";
pub const STRATEGY_PATH: &str = "/generate-marketing-strategy";

/// JSON body of a strategy request. All fields are strings; `price` and
/// `target_audience` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub target_audience: String,
}

impl From<&FormDraft> for ProductRequest {
    fn from(draft: &FormDraft) -> Self {
        Self {
            name: draft.name.clone(),
            category: draft.category.clone(),
            description: draft.description.clone(),
            price: draft.price.clone(),
            target_audience: draft.target_audience.as_str().to_string(),
        }
    }
}

/// The remote recommendation service.
pub trait RecommendationApi {
    fn health(&self) -> Result<HealthReport, ApiError>;

    fn generate_strategy(&self, request: &ProductRequest) -> Result<StrategyResult, ApiError>;
}

// ============================================================================
// HTTP backend
// ============================================================================

pub struct HttpApi {
    pub base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpApi {
    /// Client without a request timeout: a hung request stays in flight.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(base_url, &e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl RecommendationApi for HttpApi {
    fn health(&self) -> Result<HealthReport, ApiError> {
        let url = self.url(HEALTH_PATH);
        debug!(%url, "probing service health");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::transport(&url, &e))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let report = HealthReport::parse(&body);
        if report.is_degraded() {
            warn!(status = ?report.status, models = ?report.models, "service reports degraded health");
        }
        Ok(report)
    }

    fn generate_strategy(&self, request: &ProductRequest) -> Result<StrategyResult, ApiError> {
        let url = self.url(STRATEGY_PATH);
        debug!(%url, product = %request.name, "requesting marketing strategy");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| ApiError::transport(&url, &e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ApiError::transport(&url, &e))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode {
                context: STRATEGY_PATH.to_string(),
                message: e.to_string(),
            })?;

        Ok(StrategyResult::from_value(value))
    }
}
