//! services/cli/src/prompts.rs
//!
//! Loads candidate prompts from a file, one per line. Matches what the web
//! client's CSV upload accepted: surrounding quotes are stripped and blank
//! lines skipped.

use crate::error::CliError;
use std::path::Path;

pub fn load_prompts_file(path: &Path) -> Result<Vec<String>, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_prompt_lines(&content))
}

fn parse_prompt_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.replace('"', "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
