//! Assembled case documents
//!
//! The self-contained per-case record that gets encrypted, plus the public
//! summary shapes. Field names and nesting match what the deployed viewer
//! parses after decryption, so renames here are wire-format changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{PostId, UserId};

/// One fully-joined case document (encrypted payload element)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub rank: u32,
    pub post_id: PostId,
    pub title: String,
    #[serde(rename = "B")]
    pub b: f64,
    pub tm: i64,
    pub created_date: String,
    pub category: String,
    pub mechanism: String,
    pub confidence: String,
    pub evidence: String,

    /// The case's own post; None when no post row resolves to the case id
    pub main_post: Option<MainPost>,

    /// Comments on the case, ascending by timestamp
    pub comments: Vec<CommentEntry>,

    /// View time series, ascending by post age
    pub daily_views: Vec<ViewPoint>,

    /// Resolved prince post, when the case references one and it resolves
    pub prince_post: Option<PrincePost>,

    /// Exploration analytics; empty lists when no record exists for the case
    pub exploration: ExplorationSummary,

    /// Peak-window self-views, present only when a pageview log was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_self_views: Option<PeakSelfViews>,
}

/// The case's main post content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainPost {
    pub title: Option<String>,
    pub body: String,
    pub author_id: Option<UserId>,
    pub is_superuser: bool,
    pub date: String,
    pub category: String,
}

/// One comment on a case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    pub user_id: Option<UserId>,
    pub body: String,
    pub date: String,
}

/// One point of the published view time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPoint {
    pub post_age_days: f64,
    pub daily_views: i64,
}

/// The resolved antecedent post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincePost {
    pub post_id: PostId,
    pub title: Option<String>,
    pub body: String,
    pub author_id: Option<UserId>,
    pub is_superuser: bool,
    pub date: String,
}

/// Exploration block of a case document
///
/// Always present; a case without an exploration record carries four empty
/// lists rather than null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub author_posts: Vec<super::AuthorPost>,
    pub author_comments_elsewhere: Vec<Value>,
    pub peak_commenters: Vec<Value>,
    pub commenter_activity: Vec<super::CommenterActivity>,
}

/// Self-views by the case author around the ranked peak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakSelfViews {
    /// Number of matching views (counts all matches, not just the listed ones)
    pub count: usize,
    /// Matching view timestamps, truncated for display
    pub timestamps: Vec<String>,
}

/// Public per-case summary (published unencrypted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    pub rank: u32,
    pub post_id: PostId,
    pub title: String,
    #[serde(rename = "B")]
    pub b: f64,
    pub tm: i64,
    pub category: String,
    pub mechanism: String,
    pub confidence: String,
    pub comments_count: usize,
    pub has_prince: bool,
}

impl CaseSummary {
    /// Project the public summary out of a full case document
    pub fn from_case(case: &CaseRecord) -> Self {
        Self {
            rank: case.rank,
            post_id: case.post_id,
            title: case.title.clone(),
            b: case.b,
            tm: case.tm,
            category: case.category.clone(),
            mechanism: case.mechanism.clone(),
            confidence: case.confidence.clone(),
            comments_count: case.comments.len(),
            has_prince: case.prince_post.is_some(),
        }
    }
}

/// Row of the plain top-20 display table (hourly variant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Top20Entry {
    pub rank: u32,
    pub post_id: PostId,
    pub title: String,
    #[serde(rename = "B")]
    pub b: f64,
    pub tm: i64,
    pub category: String,
    pub mechanism: String,
    pub confidence: String,
}

impl Top20Entry {
    pub fn from_case(case: &CaseRecord) -> Self {
        Self {
            rank: case.rank,
            post_id: case.post_id,
            title: case.title.clone(),
            b: case.b,
            tm: case.tm,
            category: case.category.clone(),
            mechanism: case.mechanism.clone(),
            confidence: case.confidence.clone(),
        }
    }
}
