//! View-count models
//!
//! Time-series rows (view counts per post age) and raw pageview log rows.

use serde::{Deserialize, Serialize};

use super::ids::{de_loose_opt_id, PostId, UserId};

/// One (age, count) point of a post's view time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyViewRow {
    /// Post the measurement belongs to
    pub post_id: PostId,

    /// Age of the post at measurement time, in days (hours for the hourly
    /// dedup variant, carried through unchanged)
    pub post_age_days: f64,

    /// View count in that interval
    pub daily_views: i64,
}

/// One row of the optional raw pageview log
///
/// Used only for the peak self-view metric; the whole table is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageViewRow {
    /// Post that was viewed
    pub post_id: PostId,

    /// Viewer, if the log row carries one
    #[serde(default, deserialize_with = "de_loose_opt_id")]
    pub user_id: Option<UserId>,

    /// View timestamp as written in the log
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_view_row_csv() {
        let data = "post_id,post_age_days,daily_views\n42,0,120\n42,1.5,38\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<DailyViewRow> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].daily_views, 120);
        assert_eq!(rows[1].post_age_days, 1.5);
    }

    #[test]
    fn test_pageview_row_missing_user() {
        let data = "post_id,user_id,timestamp\n42,,2024-01-05 09:30:00\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: PageViewRow = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(row.post_id, 42);
        assert_eq!(row.user_id, None);
    }
}
