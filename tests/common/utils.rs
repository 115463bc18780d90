use std::sync::Mutex;
use std::thread::sleep;
use std::time::Duration;

use copyflow_client::{
    api::{
        client::{ProductRequest, RecommendationApi},
        error::ApiError,
        health::HealthReport,
    },
    form::form_model::{FormDraft, TargetAudience},
    result::result_model::StrategyResult,
};

/// In-memory service with scripted answers.
///
/// Health outcomes are consumed in order; the last one repeats.
pub struct ScriptedApi {
    health: Mutex<Vec<Result<HealthReport, ApiError>>>,
    strategy: Result<StrategyResult, ApiError>,
    health_delay: Duration,
    requests: Mutex<Vec<ProductRequest>>,
    health_calls: Mutex<u32>,
}

impl ScriptedApi {
    pub fn connected() -> Self {
        Self {
            health: Mutex::new(vec![Ok(healthy_report())]),
            strategy: Ok(StrategyResult::default()),
            health_delay: Duration::ZERO,
            requests: Mutex::new(vec![]),
            health_calls: Mutex::new(0),
        }
    }

    pub fn with_health(self, outcomes: Vec<Result<HealthReport, ApiError>>) -> Self {
        Self {
            health: Mutex::new(outcomes),
            ..self
        }
    }

    pub fn with_strategy(self, strategy: Result<StrategyResult, ApiError>) -> Self {
        Self { strategy, ..self }
    }

    pub fn with_health_delay(self, delay: Duration) -> Self {
        Self {
            health_delay: delay,
            ..self
        }
    }

    pub fn requests(&self) -> Vec<ProductRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn health_calls(&self) -> u32 {
        *self.health_calls.lock().unwrap()
    }
}

impl RecommendationApi for ScriptedApi {
    fn health(&self) -> Result<HealthReport, ApiError> {
        sleep(self.health_delay);
        *self.health_calls.lock().unwrap() += 1;

        let mut outcomes = self.health.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes
                .first()
                .cloned()
                .unwrap_or_else(|| Ok(HealthReport::default()))
        }
    }

    fn generate_strategy(&self, request: &ProductRequest) -> Result<StrategyResult, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.strategy.clone()
    }
}

pub fn healthy_report() -> HealthReport {
    HealthReport {
        status: Some("healthy".into()),
        database: Some("connected".into()),
        models: Some("loaded".into()),
        models_loading: Some(false),
        models_loaded: Some(true),
        error: None,
    }
}

pub fn refused() -> ApiError {
    ApiError::Transport {
        url: "http://localhost:8000/api/health".into(),
        message: "error sending request: connection refused".into(),
    }
}

pub fn status_error(status: u16, detail: Option<&str>) -> ApiError {
    ApiError::Status {
        status,
        detail: detail.map(str::to_string),
    }
}

pub fn smart_mug() -> FormDraft {
    FormDraft {
        name: "Smart Mug".into(),
        category: "Kitchen".into(),
        description: "Keeps drinks hot".into(),
        price: "".into(),
        target_audience: TargetAudience::Unspecified,
    }
}

/// Parse a JSON literal into a raw strategy result the way the HTTP client does.
pub fn raw(json: &str) -> StrategyResult {
    StrategyResult::from_value(serde_json::from_str(json).unwrap())
}
