pub mod assemble;
pub mod crossref;
pub mod emit;
pub mod orchestrator;
pub mod registry;
pub mod tokenize;
pub mod types;
pub mod validate;
pub mod walker;

pub use assemble::*;
pub use crossref::*;
pub use emit::*;
pub use orchestrator::*;
pub use registry::*;
pub use tokenize::*;
pub use types::*;
pub use validate::*;
pub use walker::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The whole grid yielded no recognizable header-row / section-title
    /// pair. Individual malformed rows are recovered locally; this fires
    /// only when there is no table structure to recover at all.
    #[error("No header row / domain section pair recognized across the grid")]
    NoTableStructure,
}
