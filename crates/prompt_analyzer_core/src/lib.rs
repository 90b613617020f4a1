pub mod domain;
pub mod ports;

pub use domain::{
    AnalysisJob, AnalysisRequest, AnalysisStatus, ErrorResponse, RecommendedPrompt,
    StartAnalysisResponse, StoreResultsRequest, ValidationError, MIN_PROMPTS,
};
pub use ports::{AnalysisDispatcher, PortError, PortResult, ResultStore};
