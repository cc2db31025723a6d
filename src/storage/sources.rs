//! Source table loading
//!
//! Loads the CSV tables and the exploration JSON into memory. Required
//! tables fail the run when absent; optional enrichments degrade to empty
//! collections. All inputs are read-only for the duration of a run.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::config::DataPaths;
use crate::error::{CasepackError, CasepackResult};
use crate::models::mechanism::MechanismRow;
use crate::models::{
    DailyViewRow, ExplorationRecord, Mechanism, PageViewRow, RawPost, UserId,
};
use crate::storage::file_io::read_json_required;

/// All source data for one run
#[derive(Debug, Default)]
pub struct SourceTables {
    /// Ranked primary entities, in table order
    pub mechanisms: Vec<Mechanism>,
    /// Exploration analytics; empty when the file is absent
    pub exploration: Vec<ExplorationRecord>,
    /// View time-series rows for all posts
    pub daily_views: Vec<DailyViewRow>,
    /// The full raw posts table
    pub posts: Vec<RawPost>,
    /// High-activity author ids; empty when the file is absent
    pub superusers: HashSet<UserId>,
    /// Raw pageview log; None when the file is absent
    pub pageviews: Option<Vec<PageViewRow>>,
}

impl SourceTables {
    /// Load every source table for a run
    pub fn load(paths: &DataPaths) -> CasepackResult<Self> {
        Ok(Self {
            mechanisms: load_mechanisms(&paths.mechanisms_file())?,
            exploration: load_exploration(&paths.exploration_file())?,
            daily_views: load_csv_required(&paths.daily_views_file())?,
            posts: load_csv_required(&paths.posts_file())?,
            superusers: load_superusers(&paths.superusers_file())?,
            pageviews: load_pageviews(&paths.pageviews_file())?,
        })
    }
}

/// Load the ranked mechanisms table
///
/// Rows with an unparseable rank or post id fail the run.
pub fn load_mechanisms(path: &Path) -> CasepackResult<Vec<Mechanism>> {
    if !path.exists() {
        return Err(CasepackError::input_missing(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut mechanisms = Vec::new();
    for (idx, result) in reader.deserialize::<MechanismRow>().enumerate() {
        let row = result.map_err(|e| {
            CasepackError::Csv(format!("{}: row {}: {}", path.display(), idx, e))
        })?;
        mechanisms.push(Mechanism::from_row(row, idx)?);
    }
    Ok(mechanisms)
}

/// Load the exploration analytics, or an empty list when the file is absent
pub fn load_exploration(path: &Path) -> CasepackResult<Vec<ExplorationRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json_required(path)
}

/// Load a required CSV table of serde rows
fn load_csv_required<T: for<'de> Deserialize<'de>>(path: &Path) -> CasepackResult<Vec<T>> {
    if !path.exists() {
        return Err(CasepackError::input_missing(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        rows.push(result.map_err(|e| {
            CasepackError::Csv(format!("{}: row {}: {}", path.display(), idx, e))
        })?);
    }
    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct SuperuserRow {
    simplified_user_id: UserId,
}

/// Load the superuser id set, or an empty set when the file is absent
pub fn load_superusers(path: &Path) -> CasepackResult<HashSet<UserId>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut ids = HashSet::new();
    for result in reader.deserialize::<SuperuserRow>() {
        let row = result.map_err(|e| {
            CasepackError::Csv(format!("{}: {}", path.display(), e))
        })?;
        ids.insert(row.simplified_user_id);
    }
    Ok(ids)
}

/// Load the pageview log when present
pub fn load_pageviews(path: &Path) -> CasepackResult<Option<Vec<PageViewRow>>> {
    if !path.exists() {
        return Ok(None);
    }
    load_csv_required(path).map(Some)
}
