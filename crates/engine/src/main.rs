use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use engine::clock::SystemClock;
use engine::config::EngineConfig;
use engine::detect::ThreatDetector;
use engine::parser::LineParser;

/// Initialise the tracing / logging subsystem.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: engine <log-file>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load()?;
    if let Err(reason) = config.validate() {
        return Err(reason.into());
    }

    let catalog = Arc::new(config.catalog()?);
    info!(rules = catalog.len(), "rule catalog loaded");

    let bytes = std::fs::read(path)?;
    let text = engine::batch::decode(&bytes)?;

    let parser = LineParser::new(Arc::new(SystemClock));
    let detector = ThreatDetector::new(catalog);
    let (results, report) = engine::batch::analyze(text, &parser, &detector);

    for line in &results {
        for threat in &line.threats {
            info!(
                line = line.line_no,
                rule = %threat.rule,
                severity = threat.severity.as_str(),
                "{}",
                threat.description
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
