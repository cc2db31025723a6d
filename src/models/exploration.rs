//! Prince exploration analytics
//!
//! Free-form nested analytics keyed by post id. Only the id fields are given
//! explicit types (the join engine needs them); everything else is flattened
//! through untouched so the viewer receives the records as produced upstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{loose_id_value, PostId};

/// Analytics record for one case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorationRecord {
    /// Case the record belongs to
    pub post_id: PostId,

    /// Other posts by the case author
    #[serde(default)]
    pub author_posts: Vec<AuthorPost>,

    /// Comments the case author left elsewhere
    #[serde(default)]
    pub author_comments_elsewhere: Vec<Value>,

    /// Commenters active around the case's peak
    #[serde(default)]
    pub peak_commenters: Vec<Value>,

    /// Activity profiles of the case's commenters
    #[serde(default)]
    pub commenter_activity: Vec<CommenterActivity>,
}

/// A post authored by the case author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorPost {
    pub post_id: PostId,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Activity profile of one commenter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommenterActivity {
    #[serde(default)]
    pub posts_created: Vec<CreatedPost>,

    #[serde(default)]
    pub threads_participated: Vec<ThreadRef>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A post created by a commenter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPost {
    pub post_id: PostId,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A thread a commenter participated in
///
/// The id here is loosely typed upstream (number, float-formatted number,
/// string, or missing).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadRef {
    #[serde(default)]
    pub post_id: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThreadRef {
    /// The referenced thread id, if it can be read as an integer
    pub fn thread_id(&self) -> Option<PostId> {
        self.post_id.as_ref().and_then(loose_id_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let record: ExplorationRecord = serde_json::from_value(json!({
            "post_id": 42,
            "author_posts": [{"post_id": 100, "title": "other post"}],
            "author_comments_elsewhere": [{"body": "hi"}],
            "peak_commenters": [{"user_id": 5, "n_comments": 3}],
            "commenter_activity": [{
                "user_id": 5,
                "posts_created": [{"post_id": 200}],
                "threads_participated": [
                    {"post_id": "300.0"},
                    {"post_id": null},
                    {}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(record.post_id, 42);
        assert_eq!(record.author_posts[0].post_id, 100);
        assert_eq!(record.author_posts[0].extra["title"], "other post");

        let activity = &record.commenter_activity[0];
        assert_eq!(activity.posts_created[0].post_id, 200);
        assert_eq!(activity.threads_participated[0].thread_id(), Some(300));
        assert_eq!(activity.threads_participated[1].thread_id(), None);
        assert_eq!(activity.threads_participated[2].thread_id(), None);
    }

    #[test]
    fn test_sparse_record_defaults_to_empty_lists() {
        let record: ExplorationRecord =
            serde_json::from_value(json!({"post_id": 7})).unwrap();

        assert!(record.author_posts.is_empty());
        assert!(record.author_comments_elsewhere.is_empty());
        assert!(record.peak_commenters.is_empty());
        assert!(record.commenter_activity.is_empty());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let input = json!({
            "post_id": 42,
            "author_posts": [{"post_id": 100, "score": 12, "title": "t"}]
        });
        let record: ExplorationRecord = serde_json::from_value(input).unwrap();
        let output = serde_json::to_value(&record.author_posts[0]).unwrap();

        assert_eq!(output["post_id"], 100);
        assert_eq!(output["score"], 12);
        assert_eq!(output["title"], "t");
    }
}
