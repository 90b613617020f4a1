//! services/cli/src/bin/analyzer.rs

use clap::Parser;
use cli_lib::{
    client::ApiClient,
    error::CliError,
    orchestrator::{Orchestrator, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL},
    progress, prompts, render,
};
use console::style;
use prompt_analyzer_core::domain::AnalysisRequest;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Analyze which search/AI prompts are worth targeting for a domain.
#[derive(Parser, Debug)]
#[command(name = "analyzer", version)]
struct Args {
    /// Base URL of the analyzer API.
    #[arg(long, env = "ANALYZER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// The website domain to analyze (e.g., stripe.com).
    #[arg(long)]
    domain: String,

    /// A candidate prompt; repeat the flag to add more (at least 5 total).
    #[arg(long = "prompt")]
    prompts: Vec<String>,

    /// A file with one candidate prompt per line, combined with --prompt.
    #[arg(long)]
    prompts_file: Option<PathBuf>,

    /// Seconds to wait between status polls.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    poll_interval_secs: u64,

    /// How many polls to attempt before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Disable the step-progress animation.
    #[arg(long)]
    no_animation: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let mut candidate_prompts = args.prompts;
    if let Some(path) = &args.prompts_file {
        candidate_prompts.extend(prompts::load_prompts_file(path)?);
    }

    let request = AnalysisRequest {
        domain: args.domain.trim().to_string(),
        prompts: candidate_prompts,
    };

    let client = ApiClient::new(reqwest::Client::new(), args.api_url);
    let mut orchestrator = Orchestrator::new(
        client,
        Duration::from_secs(args.poll_interval_secs),
        args.max_attempts,
    );

    // The cosmetic animation and the real polling loop run independently;
    // they only meet here, where the loop's outcome cancels the animation.
    let animation_token = CancellationToken::new();
    let animation = if args.no_animation {
        None
    } else {
        Some(progress::spawn_animation(animation_token.clone()))
    };

    let outcome = orchestrator.run(request.clone()).await;

    animation_token.cancel();
    if let Some(handle) = animation {
        let _ = handle.await;
    }

    let recommendations = outcome?;
    render::render_recommendations(&request.domain, &recommendations);
    Ok(())
}
