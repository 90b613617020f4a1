pub mod client;
pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod prompts;
pub mod render;
