//! Path management for casepack
//!
//! Resolves all source table locations under a single data directory and all
//! artifact locations under a single output directory.
//!
//! ## Source layout
//!
//! - `results/sb_top20_mechanisms.csv` (required)
//! - `results/sb_prince_exploration.json` (optional)
//! - `results/sb_post_daily_views.csv` (required)
//! - `raw/posts_combined.csv` (required)
//! - `processed/superusers_top1pct.csv` (optional)
//! - `raw/pageviews.csv` (optional, enables the peak self-view metric)

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CasepackError;

/// Which logical dataset variant a run produces
///
/// Both variants read the same source layout; they differ in output file
/// names, and the hourly variant additionally publishes a plain top-20
/// summary table. All variants share one cipher config so a single password
/// decrypts every artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DatasetVariant {
    /// Daily view counts (default)
    #[default]
    Daily,
    /// Hourly-deduplicated view counts
    Hourly,
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Hourly => write!(f, "hourly"),
        }
    }
}

/// Manages all paths used by casepack
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Root of the source data tree
    data_dir: PathBuf,
    /// Directory the published artifacts are written to
    output_dir: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths instance
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Get the source data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Ranked mechanisms table (required)
    pub fn mechanisms_file(&self) -> PathBuf {
        self.data_dir.join("results").join("sb_top20_mechanisms.csv")
    }

    /// Nested prince exploration analytics (optional)
    pub fn exploration_file(&self) -> PathBuf {
        self.data_dir
            .join("results")
            .join("sb_prince_exploration.json")
    }

    /// Per-post daily view counts (required)
    pub fn daily_views_file(&self) -> PathBuf {
        self.data_dir
            .join("results")
            .join("sb_post_daily_views.csv")
    }

    /// Combined raw posts table (required)
    pub fn posts_file(&self) -> PathBuf {
        self.data_dir.join("raw").join("posts_combined.csv")
    }

    /// Top-1% superuser ids (optional)
    pub fn superusers_file(&self) -> PathBuf {
        self.data_dir
            .join("processed")
            .join("superusers_top1pct.csv")
    }

    /// Raw pageview log (optional)
    pub fn pageviews_file(&self) -> PathBuf {
        self.data_dir.join("raw").join("pageviews.csv")
    }

    /// Public case summaries for the given variant
    pub fn metadata_file(&self, variant: DatasetVariant) -> PathBuf {
        match variant {
            DatasetVariant::Daily => self.output_dir.join("metadata.json"),
            DatasetVariant::Hourly => self.output_dir.join("hourly_metadata.json"),
        }
    }

    /// Encrypted case document for the given variant
    pub fn encrypted_file(&self, variant: DatasetVariant) -> PathBuf {
        match variant {
            DatasetVariant::Daily => self.output_dir.join("cases.encrypted"),
            DatasetVariant::Hourly => self.output_dir.join("hourly_cases.encrypted"),
        }
    }

    /// Plain top-20 summary table (hourly variant only)
    pub fn top20_file(&self) -> PathBuf {
        self.output_dir.join("hourly_top20.json")
    }

    /// Shared cipher parameter document (one per output directory)
    pub fn cipher_config_file(&self) -> PathBuf {
        self.output_dir.join("encryption_config.json")
    }

    /// Ensure the output directory exists
    pub fn ensure_output_dir(&self) -> Result<(), CasepackError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            CasepackError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_paths() {
        let paths = DataPaths::new("/data", "/out");

        assert_eq!(
            paths.mechanisms_file(),
            PathBuf::from("/data/results/sb_top20_mechanisms.csv")
        );
        assert_eq!(
            paths.posts_file(),
            PathBuf::from("/data/raw/posts_combined.csv")
        );
        assert_eq!(
            paths.superusers_file(),
            PathBuf::from("/data/processed/superusers_top1pct.csv")
        );
    }

    #[test]
    fn test_variant_output_paths() {
        let paths = DataPaths::new("/data", "/out");

        assert_eq!(
            paths.metadata_file(DatasetVariant::Daily),
            PathBuf::from("/out/metadata.json")
        );
        assert_eq!(
            paths.metadata_file(DatasetVariant::Hourly),
            PathBuf::from("/out/hourly_metadata.json")
        );
        assert_eq!(
            paths.encrypted_file(DatasetVariant::Hourly),
            PathBuf::from("/out/hourly_cases.encrypted")
        );
        // One cipher config regardless of variant
        assert_eq!(
            paths.cipher_config_file(),
            PathBuf::from("/out/encryption_config.json")
        );
    }

    #[test]
    fn test_ensure_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested").join("site-data");
        let paths = DataPaths::new(temp_dir.path(), &out);

        paths.ensure_output_dir().unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(DatasetVariant::Daily.to_string(), "daily");
        assert_eq!(DatasetVariant::Hourly.to_string(), "hourly");
    }
}
