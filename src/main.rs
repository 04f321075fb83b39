use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use regime_lens::{
    analysis::{AnalysisOrchestrator, RunOutcome, adapters::HttpReasoningBoundary},
    catalog::{COMPANIES, SignalCatalog},
    classifier::DashboardView,
    cli::{CliCommand, args_from_env, selection_from_flags},
    config::Config,
    logging::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args_from_env()?;

    if args.command == CliCommand::ListSignals {
        let listing = json!({
            "signals": SignalCatalog.group_by_category(),
            "companies": COMPANIES,
        });
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let config_path = args.resolved_config_path()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let logging_guard = init_tracing(&config.logging).context("failed to initialize logging")?;
    tracing::info!(
        target: "cli",
        process_id = %logging_guard.process_id(),
        config = %config_path.display(),
        command = ?args.command,
        "command_started"
    );

    let boundary = HttpReasoningBoundary::from_config(&config.reasoning)
        .context("failed to construct reasoning boundary")?;

    match args.command {
        CliCommand::ListSignals => Ok(()),
        CliCommand::Health => {
            boundary.health().await.with_context(|| {
                format!(
                    "reasoning service at {} is not healthy",
                    config.reasoning.endpoint
                )
            })?;
            println!("{}", json!({ "status": "ok" }));
            Ok(())
        }
        CliCommand::Analyze { signals, companies } => {
            let selection = selection_from_flags(&signals, &companies)?;

            let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));
            match orchestrator.run(&selection).await {
                RunOutcome::Succeeded { .. } => {
                    let result = orchestrator
                        .result()
                        .ok_or_else(|| anyhow!("analysis succeeded without a result"))?;
                    let view = DashboardView::derive(&result);
                    println!("{}", serde_json::to_string_pretty(&view)?);
                    Ok(())
                }
                RunOutcome::Failed { error, .. } => {
                    eprintln!("{}", error.user_message());
                    Err(anyhow!(error)).context("analysis run failed")
                }
                RunOutcome::Superseded { run_id } => {
                    Err(anyhow!("analysis run {run_id} was superseded"))
                }
            }
        }
    }
}
