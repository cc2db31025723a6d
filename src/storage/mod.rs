//! Storage layer for casepack
//!
//! Loads the source tables and writes the published artifacts with atomic
//! JSON writes, so a failed run never leaves half-written files behind.

pub mod file_io;
pub mod output;
pub mod sources;

pub use file_io::{read_json_required, write_json_atomic};
pub use output::ArtifactWriter;
pub use sources::SourceTables;
