//! Case assembly
//!
//! Builds one self-contained case document per mechanism by joining the
//! filtered post working set, the view time series, the exploration
//! analytics, the superuser set, and (optionally) the raw pageview log.
//! Missing optional data always degrades to an absent marker or an empty
//! collection; assembly itself cannot fail.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{
    CaseRecord, CommentEntry, ExplorationRecord, ExplorationSummary, MainPost, Mechanism,
    PageViewRow, PeakSelfViews, PostId, PrincePost, RawPost, UserId, ViewPoint,
};
use crate::storage::SourceTables;

use super::relevance::PostSet;

/// Maximum number of matching view timestamps carried in a case document
///
/// Everything beyond the cap is counted but not listed.
pub const MAX_PEAK_VIEW_TIMESTAMPS: usize = 50;

/// Assembles case documents for one run
pub struct CaseAssembler<'a> {
    exploration_by_id: HashMap<PostId, &'a ExplorationRecord>,
    views_by_id: HashMap<PostId, Vec<ViewPoint>>,
    posts: &'a PostSet,
    superusers: &'a HashSet<UserId>,
    pageviews: Option<&'a [PageViewRow]>,
    peak_window_days: i64,
}

impl<'a> CaseAssembler<'a> {
    /// Build an assembler over one run's loaded tables and post working set
    pub fn new(tables: &'a SourceTables, posts: &'a PostSet, peak_window_days: i64) -> Self {
        let exploration_by_id = tables
            .exploration
            .iter()
            .map(|record| (record.post_id, record))
            .collect();

        // Group and pre-sort the view time series, ascending by age
        let mut views_by_id: HashMap<PostId, Vec<ViewPoint>> = HashMap::new();
        for row in &tables.daily_views {
            views_by_id.entry(row.post_id).or_default().push(ViewPoint {
                post_age_days: row.post_age_days,
                daily_views: row.daily_views,
            });
        }
        for points in views_by_id.values_mut() {
            points.sort_by(|a, b| a.post_age_days.total_cmp(&b.post_age_days));
        }

        Self {
            exploration_by_id,
            views_by_id,
            posts,
            superusers: &tables.superusers,
            pageviews: tables.pageviews.as_deref(),
            peak_window_days,
        }
    }

    /// Assemble all case documents, in input (rank) order
    pub fn assemble_all(&self, mechanisms: &[Mechanism]) -> Vec<CaseRecord> {
        mechanisms.iter().map(|m| self.assemble(m)).collect()
    }

    /// Assemble the document for one case
    pub fn assemble(&self, mechanism: &Mechanism) -> CaseRecord {
        let main_post = self.posts.get(mechanism.post_id).map(|post| MainPost {
            title: post.title.clone(),
            body: post.body_text(),
            author_id: post.simplified_user_id,
            is_superuser: self.is_superuser(post.simplified_user_id),
            date: post.datecreated.clone(),
            category: post.category.clone().unwrap_or_default(),
        });

        let comments = self
            .posts
            .comments_of(mechanism.post_id)
            .into_iter()
            .map(|comment| CommentEntry {
                user_id: comment.simplified_user_id,
                body: comment.body_text(),
                date: comment.datecreated.clone(),
            })
            .collect();

        let daily_views = self
            .views_by_id
            .get(&mechanism.post_id)
            .cloned()
            .unwrap_or_default();

        // No prince reference means no lookup at all
        let prince_post = mechanism
            .prince_id
            .and_then(|prince_id| self.posts.get(prince_id).map(|p| (prince_id, p)))
            .map(|(prince_id, post)| self.prince_post(prince_id, post));

        let exploration = self
            .exploration_by_id
            .get(&mechanism.post_id)
            .map(|record| ExplorationSummary {
                author_posts: record.author_posts.clone(),
                author_comments_elsewhere: record.author_comments_elsewhere.clone(),
                peak_commenters: record.peak_commenters.clone(),
                commenter_activity: record.commenter_activity.clone(),
            })
            .unwrap_or_default();

        let author_id = main_post.as_ref().and_then(|p| p.author_id);
        let peak_self_views = self.peak_self_views(mechanism, author_id);

        CaseRecord {
            rank: mechanism.rank,
            post_id: mechanism.post_id,
            title: mechanism.title.clone(),
            b: mechanism.b,
            tm: mechanism.tm,
            created_date: mechanism.created_date.clone(),
            category: mechanism.category.clone(),
            mechanism: mechanism.mechanism.clone(),
            confidence: mechanism.confidence.clone(),
            evidence: mechanism.evidence.clone(),
            main_post,
            comments,
            daily_views,
            prince_post,
            exploration,
            peak_self_views,
        }
    }

    fn prince_post(&self, prince_id: PostId, post: &RawPost) -> PrincePost {
        PrincePost {
            post_id: prince_id,
            title: post.title.clone(),
            body: post.body_text(),
            author_id: post.simplified_user_id,
            is_superuser: self.is_superuser(post.simplified_user_id),
            date: post.datecreated.clone(),
        }
    }

    /// Superuser membership; an absent or unknown author is never a superuser
    fn is_superuser(&self, author_id: Option<UserId>) -> bool {
        author_id.is_some_and(|id| self.superusers.contains(&id))
    }

    /// Count the case author's views of their own post around the peak
    ///
    /// Returns None only when no pageview log was supplied. With a log
    /// present, zero matches (including an unknown author or unparseable
    /// dates) is a well-defined empty result.
    fn peak_self_views(
        &self,
        mechanism: &Mechanism,
        author_id: Option<UserId>,
    ) -> Option<PeakSelfViews> {
        let pageviews = self.pageviews?;

        let window = match (author_id, parse_date_loose(&mechanism.created_date)) {
            (Some(author), Some(created)) => {
                let peak = created + Duration::days(mechanism.tm);
                Some((author, peak))
            }
            _ => None,
        };

        let mut count = 0;
        let mut timestamps = Vec::new();
        if let Some((author, peak)) = window {
            for view in pageviews {
                if view.post_id != mechanism.post_id || view.user_id != Some(author) {
                    continue;
                }
                let Some(view_date) = parse_date_loose(&view.timestamp) else {
                    continue;
                };
                if (view_date - peak).num_days().abs() <= self.peak_window_days {
                    count += 1;
                    if timestamps.len() < MAX_PEAK_VIEW_TIMESTAMPS {
                        timestamps.push(view.timestamp.clone());
                    }
                }
            }
        }

        Some(PeakSelfViews { count, timestamps })
    }
}

/// Parse a source date or timestamp into a calendar date, leniently
fn parse_date_loose(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
