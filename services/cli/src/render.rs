//! services/cli/src/render.rs
//!
//! Renders the delivered recommendations as a ranked terminal table. Records
//! arrive already sorted by descending `final_score` with `rank` consistent
//! with that order, so display order is delivery order.

use console::style;
use prompt_analyzer_core::domain::RecommendedPrompt;

const PROMPT_WIDTH: usize = 48;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{cut}…")
}

fn check(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "-"
    }
}

fn citation_cell(cited: bool, rank: Option<u32>) -> String {
    match (cited, rank) {
        (true, Some(rank)) => format!("#{rank}"),
        (true, None) => "yes".to_string(),
        _ => "-".to_string(),
    }
}

pub fn render_recommendations(domain: &str, prompts: &[RecommendedPrompt]) {
    println!();
    println!(
        "{} {}",
        style("Recommended prompts for").bold(),
        style(domain).bold().cyan()
    );
    println!();
    println!(
        "{:<4} {:<width$} {:>6} {:>5} {:>5}  {:>5} {:>6}  {:>7} {:>4} {:>6}  {:>4} {:>4} {:>4}",
        "Rank",
        "Prompt",
        "Score",
        "AI",
        "SEO",
        "Pplx",
        "Gemini",
        "Volume",
        "KD",
        "CPC",
        "Snip",
        "PAA",
        "AIO",
        width = PROMPT_WIDTH,
    );

    for record in prompts {
        println!(
            "{:<4} {:<width$} {:>6.1} {:>5.0} {:>5.0}  {:>5} {:>6}  {:>7} {:>4.0} {:>6.2}  {:>4} {:>4} {:>4}",
            record.rank,
            truncate(&record.prompt_text, PROMPT_WIDTH),
            record.final_score,
            record.ai_opportunity_score,
            record.seo_opportunity_score,
            citation_cell(record.perplexity_cited, record.perplexity_citation_rank),
            citation_cell(record.gemini_cited, record.gemini_citation_rank),
            record.search_volume,
            record.keyword_difficulty,
            record.cpc,
            check(record.has_featured_snippet),
            check(record.has_paa),
            check(record.has_ai_overview),
            width = PROMPT_WIDTH,
        );
    }

    println!();
    for record in prompts {
        if !record.score_reasoning.is_empty() {
            println!(
                "{} {}",
                style(format!("#{}", record.rank)).bold(),
                record.score_reasoning
            );
        }
    }
}
