//! Relevance filtering
//!
//! Computes the transitive set of post ids a run needs to retain and
//! projects the raw posts table down to that working set. The closure is a
//! single pass: the nesting of the analytics records is fixed and
//! enumerated, so no fixpoint iteration is required. Pure filter, no side
//! effects.

use std::collections::{HashMap, HashSet};

use crate::models::{ExplorationRecord, Mechanism, PostId, RawPost};

/// Compute the set of post ids the viewer needs
///
/// Retained: every case id; every post whose thread root is a case id (the
/// comments); every referenced prince id; every id mentioned in the
/// exploration analytics (author posts, commenter-created posts, and
/// loosely-typed thread references that parse as integers).
pub fn relevant_post_ids(
    mechanisms: &[Mechanism],
    exploration: &[ExplorationRecord],
    posts: &[RawPost],
) -> HashSet<PostId> {
    let mut ids = HashSet::new();
    let case_ids: HashSet<PostId> = mechanisms.iter().map(|m| m.post_id).collect();

    // Main case posts and their prince references
    for mechanism in mechanisms {
        ids.insert(mechanism.post_id);
        if let Some(prince_id) = mechanism.prince_id {
            ids.insert(prince_id);
        }
    }

    // Comments on case posts
    for post in posts {
        if let Some(parent) = post.superparentid {
            if case_ids.contains(&parent) {
                ids.insert(post.postid);
            }
        }
    }

    // Everything referenced from the exploration analytics
    for record in exploration {
        for author_post in &record.author_posts {
            ids.insert(author_post.post_id);
        }
        for activity in &record.commenter_activity {
            for created in &activity.posts_created {
                ids.insert(created.post_id);
            }
            for thread in &activity.threads_participated {
                if let Some(thread_id) = thread.thread_id() {
                    ids.insert(thread_id);
                }
            }
        }
    }

    ids
}

/// The filtered post working set with lookup indexes
///
/// Preserves the input table order, which is the tie-breaker for comment
/// sorting.
#[derive(Debug, Default)]
pub struct PostSet {
    posts: Vec<RawPost>,
    by_id: HashMap<PostId, usize>,
    by_parent: HashMap<PostId, Vec<usize>>,
}

impl PostSet {
    /// Project the raw posts table down to the given id set
    pub fn filtered(all: &[RawPost], ids: &HashSet<PostId>) -> Self {
        let mut set = Self::default();
        for post in all {
            if !ids.contains(&post.postid) {
                continue;
            }
            let idx = set.posts.len();
            // First occurrence wins, matching "first matching row" lookups
            set.by_id.entry(post.postid).or_insert(idx);
            if let Some(parent) = post.superparentid {
                set.by_parent.entry(parent).or_default().push(idx);
            }
            set.posts.push(post.clone());
        }
        set
    }

    /// Number of posts in the working set
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// First post with the given id, if any
    pub fn get(&self, id: PostId) -> Option<&RawPost> {
        self.by_id.get(&id).map(|&idx| &self.posts[idx])
    }

    /// All posts whose thread root is the given id, ascending by timestamp
    ///
    /// Stable sort: equal timestamps keep the original table order.
    pub fn comments_of(&self, id: PostId) -> Vec<&RawPost> {
        let mut comments: Vec<&RawPost> = self
            .by_parent
            .get(&id)
            .map(|indexes| indexes.iter().map(|&idx| &self.posts[idx]).collect())
            .unwrap_or_default();
        comments.sort_by(|a, b| a.datecreated.cmp(&b.datecreated));
        comments
    }
}
