pub mod analysis;
pub mod analysis_modules;
pub mod error;
pub mod util;

pub use analysis::{analyze, analyze_with, AnalysisParameters, StrideAnalysis};
pub use error::{AnalysisError, Result};
