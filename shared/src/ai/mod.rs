mod pr_analysis;
mod prompts;

pub use pr_analysis::{AnalysisResponse, PrAnalysis};
