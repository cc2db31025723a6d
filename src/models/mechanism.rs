//! Mechanism model
//!
//! One row of the ranked mechanisms table, the primary entity of a run.
//! The identifier and rank are structurally required: a row where either is
//! unparseable fails the whole run. Everything else degrades gracefully.

use serde::{Deserialize, Serialize};

use super::ids::{loose_id, PostId};
use crate::error::{CasepackError, CasepackResult};

/// A ranked case under analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    /// 1-based position in the ranking
    pub rank: u32,

    /// Unique post identifier of the case
    pub post_id: PostId,

    /// Post title
    pub title: String,

    /// Headline burst metric
    #[serde(rename = "B")]
    pub b: f64,

    /// Peak offset in days from post creation
    pub tm: i64,

    /// Creation date of the post (carried as written in the source table)
    pub created_date: String,

    /// Forum category
    pub category: String,

    /// Assigned mechanism label
    pub mechanism: String,

    /// Confidence label for the mechanism assignment
    pub confidence: String,

    /// Free-text supporting evidence
    pub evidence: String,

    /// Antecedent ("prince") post reference, if any
    pub prince_id: Option<PostId>,
}

/// CSV row shape for the mechanisms table
///
/// Identifier-like columns come in as strings so that float-formatted values
/// survive, then get converted with proper error attribution.
#[derive(Debug, Deserialize)]
pub(crate) struct MechanismRow {
    rank: String,
    post_id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "B")]
    b: f64,
    tm: i64,
    #[serde(default)]
    created_date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    mechanism: String,
    #[serde(default)]
    confidence: String,
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    prince_id: Option<String>,
}

impl Mechanism {
    pub(crate) fn from_row(row: MechanismRow, row_number: usize) -> CasepackResult<Self> {
        let rank = required_int(&row.rank)
            .ok_or_else(|| {
                CasepackError::schema(format!(
                    "mechanism row {}: rank '{}' is not an integer",
                    row_number, row.rank
                ))
            })
            .and_then(|r| {
                u32::try_from(r).map_err(|_| {
                    CasepackError::schema(format!(
                        "mechanism row {}: rank '{}' is out of range",
                        row_number, row.rank
                    ))
                })
            })?;

        let post_id = required_int(&row.post_id).ok_or_else(|| {
            CasepackError::schema(format!(
                "mechanism row {}: post_id '{}' is not an integer",
                row_number, row.post_id
            ))
        })?;

        Ok(Self {
            rank,
            post_id,
            title: row.title,
            b: row.b,
            tm: row.tm,
            created_date: row.created_date,
            category: row.category,
            mechanism: row.mechanism,
            confidence: row.confidence,
            evidence: row.evidence,
            // A missing or non-numeric prince reference means "no prince"
            prince_id: row.prince_id.as_deref().and_then(loose_id),
        })
    }
}

/// Parse a structurally required integer, tolerating float formatting
fn required_int(s: &str) -> Option<i64> {
    loose_id(s)
}
