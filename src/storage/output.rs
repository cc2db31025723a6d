//! Artifact writing
//!
//! Writes the published artifact set for one run: the public metadata, the
//! encrypted case document, the shared cipher config, and (for the hourly
//! variant) the plain top-20 table. Writing happens only after assembly and
//! encryption have fully succeeded, and each file is written atomically, so
//! a fatal error never leaves a partial artifact set that mixes runs.

use crate::config::{CipherConfig, DataPaths, DatasetVariant};
use crate::crypto::Envelope;
use crate::error::CasepackResult;
use crate::models::{CaseSummary, Top20Entry};
use crate::storage::file_io::write_json_atomic;

/// Writes one run's artifact set into the output directory
pub struct ArtifactWriter<'a> {
    paths: &'a DataPaths,
    variant: DatasetVariant,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(paths: &'a DataPaths, variant: DatasetVariant) -> Self {
        Self { paths, variant }
    }

    /// Write all artifacts for the run
    pub fn write_all(
        &self,
        summaries: &[CaseSummary],
        envelope: &Envelope,
        top20: Option<&[Top20Entry]>,
        config: &CipherConfig,
    ) -> CasepackResult<()> {
        self.paths.ensure_output_dir()?;

        write_json_atomic(self.paths.metadata_file(self.variant), &summaries, true)?;
        write_json_atomic(self.paths.encrypted_file(self.variant), envelope, false)?;

        if let Some(entries) = top20 {
            write_json_atomic(self.paths.top20_file(), &entries, true)?;
        }

        // Written last: artifacts only become decryptable once the shared
        // parameter set they were produced under is on disk.
        config.save(&self.paths.cipher_config_file())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_envelope() -> Envelope {
        Envelope {
            ciphertext: "Y2lwaGVy".to_string(),
            iv: "aXY=".to_string(),
            salt: "c2FsdA==".to_string(),
        }
    }

    #[test]
    fn test_daily_artifact_set() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::new(temp_dir.path(), temp_dir.path().join("out"));
        let writer = ArtifactWriter::new(&paths, DatasetVariant::Daily);

        writer
            .write_all(&[], &sample_envelope(), None, &CipherConfig::default())
            .unwrap();

        assert!(paths.metadata_file(DatasetVariant::Daily).exists());
        assert!(paths.encrypted_file(DatasetVariant::Daily).exists());
        assert!(paths.cipher_config_file().exists());
        assert!(!paths.top20_file().exists());
    }

    #[test]
    fn test_hourly_artifact_set_includes_top20() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::new(temp_dir.path(), temp_dir.path().join("out"));
        let writer = ArtifactWriter::new(&paths, DatasetVariant::Hourly);

        writer
            .write_all(&[], &sample_envelope(), Some(&[]), &CipherConfig::default())
            .unwrap();

        assert!(paths.metadata_file(DatasetVariant::Hourly).exists());
        assert!(paths.encrypted_file(DatasetVariant::Hourly).exists());
        assert!(paths.top20_file().exists());
    }

    #[test]
    fn test_envelope_wire_fields() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::new(temp_dir.path(), temp_dir.path().join("out"));
        let writer = ArtifactWriter::new(&paths, DatasetVariant::Daily);

        writer
            .write_all(&[], &sample_envelope(), None, &CipherConfig::default())
            .unwrap();

        let raw =
            std::fs::read_to_string(paths.encrypted_file(DatasetVariant::Daily)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("ciphertext"));
        assert!(obj.contains_key("iv"));
        assert!(obj.contains_key("salt"));
    }
}
