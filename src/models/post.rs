//! Raw post model
//!
//! One row of the combined posts table. A post can be a case's main post, a
//! comment on it (linked through `superparentid`), a prince post, or
//! background activity referenced from the exploration analytics.

use serde::{Deserialize, Serialize};

use super::ids::{de_loose_opt_id, PostId, UserId};

/// A post or comment from the combined raw posts table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    /// Unique post identifier
    pub postid: PostId,

    /// Thread root this post belongs to; None for top-level posts
    #[serde(default, deserialize_with = "de_loose_opt_id")]
    pub superparentid: Option<PostId>,

    /// Pseudonymized author identifier
    #[serde(default, deserialize_with = "de_loose_opt_id")]
    pub simplified_user_id: Option<UserId>,

    /// Post title (empty for comments)
    #[serde(default)]
    pub title: Option<String>,

    /// Body text; None where the source cell is empty
    #[serde(default)]
    pub body: Option<String>,

    /// Creation timestamp as written in the source table
    #[serde(default)]
    pub datecreated: String,

    /// Forum category
    #[serde(default)]
    pub category: Option<String>,
}

impl RawPost {
    /// Body text with the missing-value sentinel collapsed to empty
    pub fn body_text(&self) -> String {
        self.body.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_csv() {
        let data = "postid,superparentid,simplified_user_id,title,body,datecreated,category\n\
                    42,,7,Hello,World,2024-01-01 10:00:00,General\n\
                    43,42.0,8,,reply text,2024-01-02 11:00:00,\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let posts: Vec<RawPost> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].postid, 42);
        assert_eq!(posts[0].superparentid, None);
        assert_eq!(posts[0].simplified_user_id, Some(7));

        // Float-formatted parent id from the nullable column
        assert_eq!(posts[1].superparentid, Some(42));
        assert_eq!(posts[1].title, None);
        assert_eq!(posts[1].category, None);
    }

    #[test]
    fn test_body_text_collapses_missing() {
        let data = "postid,superparentid,simplified_user_id,title,body,datecreated,category\n\
                    1,,5,T,,2024-01-01,Cat\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let post: RawPost = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(post.body, None);
        assert_eq!(post.body_text(), "");
    }
}
