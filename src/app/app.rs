use tracing::{debug, info, warn};

use crate::{
    api::{
        client::{ProductRequest, RecommendationApi},
        error::ApiError,
        health::HealthReport,
    },
    app::app_model::AppPhase,
    connectivity::monitor::{ConnectivityMonitor, ConnectivityStatus},
    form::form_model::{self, FormDraft, FormError, FormField, FormModel, SubmitBlocker},
    result::result_model::StrategyResult,
    startup::sequencer::{StartupEvent, StartupSequencer},
    submission::pipeline::{SubmissionPipeline, SubmissionState},
    trace::{logger::TraceLogger, trace::TraceEvent},
    view::result_view::{ActiveTab, ResultView},
};

/// Single owner of all interface state.
///
/// Each component keeps its own state; the app only routes events to them
/// and derives the current [`AppPhase`].
#[derive(Debug, Default)]
pub struct App {
    startup: StartupSequencer,
    connectivity: ConnectivityMonitor,
    form: FormModel,
    pipeline: SubmissionPipeline,
    view: Option<ResultView>,
    error: Option<String>,
    tracer: TraceLogger,
    seq: u64,
}

impl App {
    pub fn new(startup: StartupSequencer) -> Self {
        Self {
            startup,
            ..Self::default()
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    // ---- Accessors ----

    pub fn phase(&self) -> AppPhase {
        if !self.startup.is_ready() {
            AppPhase::Starting
        } else if self.view.is_some() {
            AppPhase::Results
        } else {
            AppPhase::Form
        }
    }

    pub fn startup(&self) -> &StartupSequencer {
        &self.startup
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity.status()
    }

    pub fn monitor(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    pub fn draft(&self) -> &FormDraft {
        self.form.draft()
    }

    pub fn submission(&self) -> &SubmissionState {
        self.pipeline.state()
    }

    pub fn result_view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    /// Message from the last failed submission, until dismissed or resubmitted.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ---- Startup ----

    pub fn tick(&mut self) -> StartupEvent {
        let event = self.startup.advance();
        if event == StartupEvent::Ready {
            info!("interface ready");
            self.trace("startup_ready", |e| e);
        }
        event
    }

    // ---- Connectivity ----

    pub fn probe(&mut self, api: &dyn RecommendationApi) -> ConnectivityStatus {
        let outcome = api.health();
        self.apply_probe(outcome)
    }

    pub fn apply_probe(&mut self, outcome: Result<HealthReport, ApiError>) -> ConnectivityStatus {
        let status = self.connectivity.apply(outcome);
        self.trace("probe", |e| e.with_detail(status));
        status
    }

    // ---- Form ----

    /// Edit one field. Only allowed on the form screen; a finished
    /// submission returns to idle, a running one keeps going.
    pub fn edit(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        if self.phase() != AppPhase::Form {
            return Err(FormError::NotEditable);
        }

        self.form.set(field, value)?;
        self.pipeline.reset();
        debug!(%field, "draft edited");
        self.trace("edit", |e| e.with_detail(field));
        Ok(())
    }

    pub fn submit_blockers(&self) -> Vec<SubmitBlocker> {
        if self.phase() != AppPhase::Form {
            return vec![];
        }
        form_model::submit_blockers(self.form.draft(), self.connectivity.status(), self.pipeline.state())
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == AppPhase::Form && self.submit_blockers().is_empty()
    }

    // ---- Submission ----

    /// Start a submission if the form is eligible.
    pub fn begin_submit(&mut self) -> Result<ProductRequest, Vec<SubmitBlocker>> {
        if self.phase() != AppPhase::Form {
            return Err(vec![]);
        }
        let blockers = self.submit_blockers();
        if !blockers.is_empty() {
            return Err(blockers);
        }

        self.error = None;
        let request = self.pipeline.begin(self.form.draft());
        self.trace("submit_started", |e| e.with_detail(&request.name));
        Ok(request)
    }

    /// Apply the outcome of the running submission.
    pub fn finish_submit(&mut self, outcome: Result<StrategyResult, ApiError>) -> &SubmissionState {
        if !self.pipeline.state().is_in_flight() {
            return self.pipeline.complete(outcome);
        }

        match self.pipeline.complete(outcome).clone() {
            SubmissionState::Succeeded(result) => {
                self.view = Some(ResultView::new(*result));
                self.trace("submit_succeeded", |e| e.with_tab(ActiveTab::Overview));
            }
            SubmissionState::Failed(message) => {
                self.error = Some(message.clone());
                self.trace("submit_failed", |e| e.with_detail(message));
            }
            _ => {}
        }
        self.pipeline.state()
    }

    /// Eligibility check, request and completion in one call.
    pub fn submit(
        &mut self,
        api: &dyn RecommendationApi,
    ) -> Result<&SubmissionState, Vec<SubmitBlocker>> {
        let request = self.begin_submit()?;
        let outcome = api.generate_strategy(&request);
        Ok(self.finish_submit(outcome))
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ---- Results ----

    /// Switch tabs. Returns false when no result is shown.
    pub fn select_tab(&mut self, tab: ActiveTab) -> bool {
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        view.select(tab);
        self.trace("tab_selected", |e| e.with_tab(tab));
        true
    }

    /// Discard the result and go back to the (unchanged) form.
    pub fn new_analysis(&mut self) {
        if self.view.take().is_some() {
            self.pipeline.reset();
            self.trace("new_analysis", |e| e);
        }
    }

    fn trace(&mut self, event: &'static str, build: impl FnOnce(TraceEvent) -> TraceEvent) {
        self.seq += 1;
        let base = TraceEvent::now(
            self.seq,
            event,
            self.phase(),
            self.connectivity.status(),
            self.pipeline.state().name(),
        );
        if let Err(e) = self.tracer.log(&build(base)) {
            warn!(event, error = %e, "session trace write failed, tracing disabled");
            self.tracer = TraceLogger::disabled();
        }
    }
}
