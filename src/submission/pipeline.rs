use tracing::{info, warn};

use crate::{
    api::client::{ProductRequest, RecommendationApi},
    form::form_model::FormDraft,
    result::{normalized_model::NormalizedResult, normalizer::normalize, result_model::StrategyResult},
    api::error::ApiError,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(Box<NormalizedResult>),
    /// Message to surface to the user
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded(_) | SubmissionState::Failed(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::InFlight => "in_flight",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }

    pub fn result(&self) -> Option<&NormalizedResult> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Runs strategy requests. Sole owner of [`SubmissionState`].
///
/// Callers are expected to check eligibility first; the pipeline does not
/// re-validate the draft.
#[derive(Debug, Default)]
pub struct SubmissionPipeline {
    state: SubmissionState,
    submissions: u64,
}

impl SubmissionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Number of submissions started.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// idle -> in_flight. Returns the request body to send.
    pub fn begin(&mut self, draft: &FormDraft) -> ProductRequest {
        self.submissions += 1;
        self.state = SubmissionState::InFlight;
        info!(submission = self.submissions, product = %draft.name, "submission started");
        ProductRequest::from(draft)
    }

    /// in_flight -> succeeded | failed. Exactly one terminal transition per
    /// submission: an outcome arriving while not in flight is ignored.
    pub fn complete(&mut self, outcome: Result<StrategyResult, ApiError>) -> &SubmissionState {
        if !self.state.is_in_flight() {
            warn!(state = self.state.name(), "ignoring submission outcome, nothing in flight");
            return &self.state;
        }

        self.state = match outcome {
            Ok(raw) => {
                info!(submission = self.submissions, "submission succeeded");
                SubmissionState::Succeeded(Box::new(normalize(&raw)))
            }
            Err(e) => {
                warn!(submission = self.submissions, error = %e, "submission failed");
                SubmissionState::Failed(e.user_message())
            }
        };
        &self.state
    }

    /// Single-attempt request: begin, call the service, complete.
    pub fn submit(
        &mut self,
        api: &dyn RecommendationApi,
        draft: &FormDraft,
    ) -> Result<NormalizedResult, String> {
        let request = self.begin(draft);
        let outcome = api.generate_strategy(&request);

        match self.complete(outcome) {
            SubmissionState::Succeeded(result) => Ok(result.as_ref().clone()),
            SubmissionState::Failed(message) => Err(message.clone()),
            other => Err(format!("submission ended in unexpected state {}", other.name())),
        }
    }

    /// succeeded | failed -> idle. A running request is left alone.
    pub fn reset(&mut self) {
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }
}
