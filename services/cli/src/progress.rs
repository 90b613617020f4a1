//! services/cli/src/progress.rs
//!
//! The cosmetic step-progress animation shown while an analysis runs. The
//! phases are a fixed, predetermined script advanced on a timer; they carry
//! no functional weight and are driven independently of the real polling
//! loop, which tears the animation down through its cancellation token once
//! results (or a timeout) arrive.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The scripted phases, in display order.
pub const PROCESSING_STEPS: &[(&str, &str)] = &[
    (
        "Validating input & creating session",
        "Initializing analysis session",
    ),
    (
        "Generating relevant prompts",
        "Creating contextual prompts based on your domain",
    ),
    (
        "Analyzing AI visibility",
        "Checking citations in Perplexity and Gemini",
    ),
    (
        "Gathering SEO metrics",
        "Analyzing search volume, difficulty, and SERP features",
    ),
    (
        "Calculating opportunity scores",
        "Computing AI and SEO opportunity scores",
    ),
    (
        "Storing analysis results",
        "Saving all metrics",
    ),
    (
        "Ranking and filtering",
        "Selecting top prompts by combined score",
    ),
    (
        "Preparing recommendations",
        "Formatting final results with reasoning",
    ),
];

/// How long each scripted phase is shown before advancing.
pub const STEP_INTERVAL: Duration = Duration::from_secs(20);

/// Spawns the animation task. The caller cancels the token when the real
/// work finishes; the task then clears its spinner and exits.
pub fn spawn_animation(token: CancellationToken) -> JoinHandle<()> {
    spawn_animation_with_interval(token, STEP_INTERVAL)
}

pub fn spawn_animation_with_interval(
    token: CancellationToken,
    step_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} [{prefix}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));

        for (index, (label, description)) in PROCESSING_STEPS.iter().enumerate() {
            spinner.set_prefix(format!("{}/{}", index + 1, PROCESSING_STEPS.len()));
            spinner.set_message(format!("{label} — {description}"));

            // The final phase holds until cancellation instead of advancing.
            if index + 1 == PROCESSING_STEPS.len() {
                token.cancelled().await;
                break;
            }
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(step_interval) => {}
            }
        }

        spinner.finish_and_clear();
    })
}
