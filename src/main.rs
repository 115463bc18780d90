use std::sync::Arc;

use clap::Parser;
use copyflow_client::cli::commands::{AnalyzeOptions, cmd_analyze, cmd_health, parse_tab_selection};
use copyflow_client::cli::config::{
    Cli, Commands, build_api, build_probe_timeout, build_reprobe_policy, build_sequencer,
    load_config,
};
use copyflow_client::connectivity::monitor::ConnectivityStatus;
use copyflow_client::form::form_model::{FormDraft, TargetAudience};
use copyflow_client::trace::logger::TraceLogger;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("copyflow_client={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Resolve settings: CLI > config > defaults
    let config = load_config(cli.config.as_deref()).merge_cli(&cli);
    let api = Arc::new(build_api(&config.api)?);

    match cli.command {
        Commands::Health => {
            if cmd_health(&*api) != ConnectivityStatus::Connected {
                std::process::exit(1);
            }
        }
        Commands::Analyze {
            name,
            category,
            description,
            price,
            audience,
            tab,
            json,
        } => {
            let target_audience: TargetAudience = audience.parse()?;
            let options = AnalyzeOptions {
                draft: FormDraft {
                    name,
                    category,
                    description,
                    price,
                    target_audience,
                },
                tab: parse_tab_selection(&tab)?,
                json,
                reprobe: build_reprobe_policy(&config.connectivity),
                probe_timeout: build_probe_timeout(&config.connectivity),
            };
            let tracer = match &config.trace.file {
                Some(path) => TraceLogger::new(path),
                None => TraceLogger::disabled(),
            };

            let succeeded = cmd_analyze(api, build_sequencer(&config.startup), tracer, &options)?;
            if !succeeded {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
