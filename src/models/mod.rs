//! Core data models for casepack
//!
//! This module contains the structures for the join inputs (mechanisms, raw
//! posts, view counts, exploration analytics, superusers) and for the
//! assembled per-case documents that get encrypted and published.

pub mod case;
pub mod exploration;
pub mod ids;
pub mod mechanism;
pub mod post;
pub mod views;

pub use case::{
    CaseRecord, CaseSummary, CommentEntry, ExplorationSummary, MainPost, PeakSelfViews,
    PrincePost, Top20Entry, ViewPoint,
};
pub use exploration::{AuthorPost, CommenterActivity, CreatedPost, ExplorationRecord, ThreadRef};
pub use ids::{loose_id, loose_id_value, PostId, UserId};
pub use mechanism::Mechanism;
pub use post::RawPost;
pub use views::{DailyViewRow, PageViewRow};
