use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::api::client::RecommendationApi;
use crate::app::app::App;
use crate::app::session::{ReprobePolicy, reprobe, run_startup};
use crate::connectivity::monitor::ConnectivityStatus;
use crate::form::form_model::{FormDraft, FormField};
use crate::startup::sequencer::StartupSequencer;
use crate::submission::pipeline::SubmissionState;
use crate::trace::logger::TraceLogger;
use crate::view::console::{format_all, format_panel};
use crate::view::result_view::ActiveTab;

/// Which panel(s) `analyze` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSelection {
    One(ActiveTab),
    All,
}

pub fn parse_tab_selection(value: &str) -> Result<TabSelection, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(TabSelection::All);
    }
    value.parse::<ActiveTab>().map(TabSelection::One)
}

// ============================================================================
// health subcommand
// ============================================================================

pub fn cmd_health(api: &dyn RecommendationApi) -> ConnectivityStatus {
    let mut app = App::default();
    let status = app.probe(api);

    println!("{}", status);
    if let Some(report) = app.monitor().last_report() {
        if let Some(service_status) = &report.status {
            println!("  service: {}", service_status);
        }
        if let Some(models) = &report.models {
            println!("  models: {}", models);
        }
    }
    status
}

// ============================================================================
// analyze subcommand
// ============================================================================

/// Options for one `analyze` session.
pub struct AnalyzeOptions {
    pub draft: FormDraft,
    pub tab: TabSelection,
    pub json: bool,
    pub reprobe: ReprobePolicy,
    pub probe_timeout: Duration,
}

/// Run a full session and print the requested output. Returns whether
/// the analysis succeeded.
pub fn cmd_analyze(
    api: Arc<dyn RecommendationApi + Send + Sync>,
    startup: StartupSequencer,
    tracer: TraceLogger,
    options: &AnalyzeOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut app = App::new(startup).with_tracer(tracer);

    if let Some(pending) = run_startup(&mut app, api.clone()) {
        pending.settle(&mut app, options.probe_timeout);
    }
    info!(status = %app.connectivity(), "startup complete");
    let status = reprobe(&mut app, &*api, options.reprobe);

    eprintln!("Service: {}", status.label());

    fill_form(&mut app, &options.draft)?;

    let outcome = match app.submit(&*api) {
        Ok(state) => state.clone(),
        Err(blockers) => {
            eprintln!("Cannot submit:");
            for blocker in blockers {
                eprintln!("  - {}", blocker);
            }
            return Ok(false);
        }
    };

    if let SubmissionState::Failed(message) = outcome {
        eprintln!("Error: {}", message);
        return Ok(false);
    }

    if let TabSelection::One(tab) = options.tab {
        app.select_tab(tab);
    }
    let Some(view) = app.result_view() else {
        return Ok(false);
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(view.result())?);
        return Ok(true);
    }

    let output = match options.tab {
        TabSelection::All => format_all(view),
        TabSelection::One(_) => format_panel(&view.panel()),
    };
    print!("{}", output);

    Ok(true)
}

fn fill_form(app: &mut App, draft: &FormDraft) -> Result<(), Box<dyn std::error::Error>> {
    app.edit(FormField::Name, &draft.name)?;
    app.edit(FormField::Category, &draft.category)?;
    app.edit(FormField::Description, &draft.description)?;
    app.edit(FormField::Price, &draft.price)?;
    app.edit(FormField::TargetAudience, draft.target_audience.as_str())?;
    Ok(())
}
