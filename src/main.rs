use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use qa_report::cli::Cli;
use qa_report::config::Config;
use qa_report::error::Error;
use qa_report::orchestrator::Orchestrator;
use qa_report::outputs::{ActionOutput, RESULT_OUTPUT, set_failed};
use qa_report::sources::github::GitHubSource;

fn init_logging() {
    // stdout is reserved for workflow commands
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn fail(err: &Error) -> ! {
    error!("{err}");
    set_failed(&err.to_string());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    info!(version = env!("CARGO_PKG_VERSION"), "qa-report starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };

    info!(?config, "config loaded");

    let source = GitHubSource::new(&config);
    let orchestrator = Orchestrator::new(source, config);

    let result = tokio::task::spawn_blocking(move || orchestrator.run())
        .await
        .map_err(|e| Error::Runtime(format!("check task failed: {e}")))
        .and_then(|r| r);

    match result {
        Ok(outcome) => {
            info!(
                result = outcome.result_value(),
                label = outcome.label().unwrap_or("-"),
                "check complete"
            );
            if let Err(e) = ActionOutput::from_env().set_output(RESULT_OUTPUT, outcome.result_value())
            {
                fail(&e);
            }
        }
        Err(e) => fail(&e),
    }
}
