pub mod extraction; // grid walk, tokenizing, dedup, cross-reference join
pub mod models; // domains, items, scale metadata

pub use extraction::orchestrator::extract_scale;
pub use extraction::{ExtractionError, ExtractionReport};
pub use models::{AssessmentItem, CoverageSummary, Domain};
