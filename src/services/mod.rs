//! Business logic layer
//!
//! The join engine (relevance filtering), the per-case assembler, and the
//! pipeline that orchestrates one full conversion run.

pub mod assembler;
pub mod pipeline;
pub mod relevance;

pub use assembler::CaseAssembler;
pub use pipeline::{run_conversion, ConvertOptions, RunSummary};
pub use relevance::{relevant_post_ids, PostSet};
