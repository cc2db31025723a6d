//! Configuration for casepack
//!
//! Path resolution for the source data layout and the output directory, plus
//! the persisted cipher parameter set shared by all encrypted artifacts.

pub mod cipher;
pub mod paths;

pub use cipher::CipherConfig;
pub use paths::{DataPaths, DatasetVariant};
