//! Conversion pipeline
//!
//! Orchestrates one full run: load sources, filter to the relevant working
//! set, assemble case documents, canonicalize and encrypt, then write the
//! artifact set. All validation and encryption happens before the first
//! byte is written, so a fatal error leaves the output directory untouched.

use crate::config::{CipherConfig, DataPaths, DatasetVariant};
use crate::crypto::{encrypt_value, SecureString};
use crate::error::CasepackResult;
use crate::models::{CaseSummary, Top20Entry};
use crate::services::assembler::CaseAssembler;
use crate::services::relevance::{relevant_post_ids, PostSet};
use crate::storage::{ArtifactWriter, SourceTables};

/// Options for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Which dataset variant to produce
    pub variant: DatasetVariant,
    /// Half-width of the peak self-view window, in days
    pub peak_window_days: i64,
    /// Explicit iteration count; overrides a stored config when given
    pub iterations: Option<u32>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            variant: DatasetVariant::Daily,
            peak_window_days: 3,
            iterations: None,
        }
    }
}

/// What a completed run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Number of case documents encrypted
    pub case_count: usize,
    /// Size of the filtered post working set
    pub relevant_posts: usize,
    /// Whether the cipher config was reused from a previous run
    pub config_reused: bool,
    /// The parameter set the artifacts were produced under
    pub config: CipherConfig,
}

/// Run one full conversion
pub fn run_conversion(
    paths: &DataPaths,
    password: &SecureString,
    options: &ConvertOptions,
) -> CasepackResult<RunSummary> {
    println!("Loading source data...");
    let tables = SourceTables::load(paths)?;
    println!("  Mechanisms: {} cases", tables.mechanisms.len());
    println!("  Exploration: {} records", tables.exploration.len());
    println!("  View rows: {}", tables.daily_views.len());
    println!("  Raw posts: {} total", tables.posts.len());
    if !tables.superusers.is_empty() {
        println!("  Superusers: {} users", tables.superusers.len());
    }

    let ids = relevant_post_ids(&tables.mechanisms, &tables.exploration, &tables.posts);
    let posts = PostSet::filtered(&tables.posts, &ids);
    println!("  Relevant posts extracted: {}", posts.len());

    println!("Assembling case data...");
    let assembler = CaseAssembler::new(&tables, &posts, options.peak_window_days);
    let cases = assembler.assemble_all(&tables.mechanisms);
    println!("  Assembled {} cases", cases.len());

    let summaries: Vec<CaseSummary> = cases.iter().map(CaseSummary::from_case).collect();
    let top20: Option<Vec<Top20Entry>> = match options.variant {
        DatasetVariant::Hourly => Some(cases.iter().map(Top20Entry::from_case).collect()),
        DatasetVariant::Daily => None,
    };

    // Reuse a stored parameter set so one password opens every artifact
    let default = options
        .iterations
        .map(CipherConfig::with_iterations)
        .unwrap_or_default();
    let (mut config, config_reused) =
        CipherConfig::load_or_init(&paths.cipher_config_file(), default)?;
    if config_reused {
        println!("Using existing encryption config");
        if let Some(iterations) = options.iterations {
            if iterations != config.iterations {
                println!(
                    "  Overriding stored iteration count {} with {} \
                     (artifacts from earlier runs stay on the old count)",
                    config.iterations, iterations
                );
                config.iterations = iterations;
            }
        }
    } else {
        println!("Using default encryption config");
    }

    println!("Encrypting case data...");
    let payload = serde_json::to_value(&cases)?;
    let envelope = encrypt_value(&payload, password.as_str(), &config)?;

    let writer = ArtifactWriter::new(paths, options.variant);
    writer.write_all(&summaries, &envelope, top20.as_deref(), &config)?;
    println!(
        "Saved {} and {}",
        paths.metadata_file(options.variant).display(),
        paths.encrypted_file(options.variant).display()
    );

    Ok(RunSummary {
        case_count: cases.len(),
        relevant_posts: posts.len(),
        config_reused,
        config,
    })
}
