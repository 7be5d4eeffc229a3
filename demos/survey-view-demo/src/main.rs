//! Survey View Resolution demo
//!
//! Runs every case of a scenario file through the standard nine-gate
//! pipeline and prints which outcome each view request resolves to.
//! Collaborators are in-memory, seeded from the scenario.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use survey_view_gate::{LicenseEntitlementResolver, Resolution, ResolutionError, SurveyViewPipeline};
use survey_view_types::{BuiltinLocaleDisplay, ResolvedOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod scenario;

use config::DemoConfig;
use scenario::{Case, Scenario};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

/// Survey View Resolution demo CLI
#[derive(Parser)]
#[command(name = "survey-view-demo")]
#[command(about = "Resolve survey view requests through the gate pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SURVEY_VIEW_CONFIG")]
    config: Option<String>,

    /// Scenario file (defaults to the built-in scenario)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Log level (overrides configuration)
    #[arg(long, env = "SURVEY_VIEW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "SURVEY_VIEW_LOG_JSON")]
    json_logs: bool,

    #[arg(short, long, value_enum, default_value = "pretty")]
    output: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = DemoConfig::load(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    if cli.json_logs || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    };

    let backend = Arc::new(scenario.backend());
    let entitlements = Arc::new(LicenseEntitlementResolver::new(
        config.license.clone(),
        config.view.is_cloud,
    ));
    let pipeline =
        SurveyViewPipeline::standard(config.view.clone(), backend.clone().collaborators(entitlements));

    tracing::info!(cases = scenario.cases.len(), "Running scenario");

    for case in &scenario.cases {
        let result = run_case(&pipeline, case).await;
        match cli.output {
            OutputFormat::Pretty => print_pretty(case, &result),
            OutputFormat::Json => print_json(case, &result)?,
        }
    }

    if matches!(cli.output, OutputFormat::Pretty) {
        println!();
        println!("  {} {} collaborator lookups", "└".dimmed(), backend.lookups());
    }
    Ok(())
}

/// Resolve one case, submitting its PIN when it hits a PIN challenge.
async fn run_case(
    pipeline: &SurveyViewPipeline,
    case: &Case,
) -> Result<(Resolution, Option<ResolvedOutcome>), ResolutionError> {
    let survey = Arc::new(case.survey.clone());
    let resolution = pipeline
        .resolve_traced(survey.clone(), case.request.clone())
        .await?;

    let unlocked = match (&resolution.outcome, &case.submit_pin) {
        (ResolvedOutcome::PinChallenge(_), Some(pin)) => pipeline
            .unlock(survey, case.request.clone(), pin)
            .await?
            .map(ResolvedOutcome::Survey),
        _ => None,
    };

    Ok((resolution, unlocked))
}

fn header(title: &str) {
    println!();
    println!("{}", "═".repeat(72).cyan());
    println!("  {}", title.cyan().bold());
    println!("{}", "═".repeat(72).cyan());
}

fn print_outcome(outcome: &ResolvedOutcome) {
    match outcome {
        ResolvedOutcome::NotFound => {
            println!("  {}   outcome:    {}", "│".dimmed(), "NOT FOUND".red().bold());
        }
        ResolvedOutcome::Inactive { status, message } => {
            println!("  {}   outcome:    {}", "│".dimmed(), "INACTIVE".yellow().bold());
            println!("  {}   status:     {}", "│".dimmed(), status);
            if let Some(heading) = message.as_ref().and_then(|m| m.heading.as_deref()) {
                println!("  {}   message:    {}", "│".dimmed(), heading.yellow());
            }
        }
        ResolvedOutcome::LanguageSelector(selection) => {
            println!(
                "  {}   outcome:    {}",
                "│".dimmed(),
                "CHOOSE LANGUAGE".blue().bold()
            );
            for option in selection.options(&BuiltinLocaleDisplay) {
                println!(
                    "  {}     {} {} ({})",
                    "│".dimmed(),
                    option.glyph,
                    option.name,
                    option.href.dimmed()
                );
            }
            if selection.needs_scroll_hint() {
                println!("  {}     {}", "│".dimmed(), "scroll to see more".dimmed());
            }
        }
        ResolvedOutcome::PinChallenge(challenge) => {
            println!("  {}   outcome:    {}", "│".dimmed(), "ENTER PIN".magenta().bold());
            println!("  {}   language:   {}", "│".dimmed(), challenge.language_code);
            println!(
                "  {}   verified:   {:?}",
                "│".dimmed(),
                challenge.verification.status
            );
        }
        ResolvedOutcome::Survey(view) => {
            println!("  {}   outcome:    {}", "│".dimmed(), "SURVEY".green().bold());
            println!("  {}   language:   {}", "│".dimmed(), view.language_code);
            println!("  {}   verified:   {:?}", "│".dimmed(), view.verification.status);
            if view.verification.is_verified() {
                if let Some(email) = &view.verification.verified_email {
                    println!("  {}   email:      {}", "│".dimmed(), email);
                }
            }
            if let Some(count) = view.response_count {
                println!("  {}   responses:  {}", "│".dimmed(), count);
            }
        }
    }
}

fn print_pretty(case: &Case, result: &Result<(Resolution, Option<ResolvedOutcome>), ResolutionError>) {
    header(&case.name);
    match result {
        Ok((resolution, unlocked)) => {
            let gates: Vec<&str> = resolution.trace.iter().map(|(n, _)| n.as_str()).collect();
            println!("  {}   gates:      {}", "│".dimmed(), gates.join(" → ").dimmed());
            print_outcome(&resolution.outcome);
            if let Some(outcome) = unlocked {
                println!("  {} {}", "├".dimmed(), "PIN accepted".green());
                print_outcome(outcome);
            }
        }
        Err(e) => {
            println!("  {}   error:      {}", "│".dimmed(), e.to_string().red().bold());
        }
    }
}

fn print_json(
    case: &Case,
    result: &Result<(Resolution, Option<ResolvedOutcome>), ResolutionError>,
) -> anyhow::Result<()> {
    let value = match result {
        Ok((resolution, unlocked)) => serde_json::json!({
            "case": case.name,
            "outcome": resolution.outcome,
            "unlocked": unlocked,
        }),
        Err(e) => serde_json::json!({
            "case": case.name,
            "error": e.to_string(),
        }),
    };
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}
