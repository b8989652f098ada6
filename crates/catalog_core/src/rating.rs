//! Pre-aggregated performer rating rows.

use serde_json::Value;

use crate::record::{resolve, to_count, to_float, to_text, FieldPath};

const RANK_PATHS: &[FieldPath] = &[&["rank"], &["position"]];
const PERFORMER_PATHS: &[FieldPath] = &[&["performer"], &["name"]];
const SCORE_PATHS: &[FieldPath] = &[&["score"], &["score_with_engagement"]];
const TOTAL_VIEWS_PATHS: &[FieldPath] = &[&["total_views"], &["totalViews"]];
const PEAK_VIEWS_PATHS: &[FieldPath] = &[&["peak_views"], &["peakViews"]];
const VIDEO_COUNT_PATHS: &[FieldPath] = &[&["video_count"], &["videoCount"]];
const TOTAL_MINUTES_PATHS: &[FieldPath] = &[&["total_minutes"], &["totalMinutes"]];
const TOTAL_LIKES_PATHS: &[FieldPath] = &[&["total_likes"], &["totalLikes"]];
const LIKE_RATE_PATHS: &[FieldPath] = &[&["like_rate_pct"], &["likeRatePct"]];
const LIKE_RATE_SMOOTH_PATHS: &[FieldPath] = &[&["like_rate_smooth_pct"], &["likeRateSmoothPct"]];

/// Read-only rating row supplied by the external aggregation step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingEntry {
    pub rank: u32,
    pub performer: String,
    pub score: f64,
    pub total_views: u64,
    pub peak_views: u64,
    pub video_count: u64,
    pub total_minutes: f64,
    pub total_likes: u64,
    pub like_rate_pct: f64,
    pub like_rate_smooth_pct: f64,
}

impl RatingEntry {
    /// Projects a rating row out of an arbitrary JSON value without failing.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        Self {
            rank: u32::try_from(to_count(resolve(fields, RANK_PATHS))).unwrap_or(u32::MAX),
            performer: to_text(resolve(fields, PERFORMER_PATHS)),
            score: to_float(resolve(fields, SCORE_PATHS)),
            total_views: to_count(resolve(fields, TOTAL_VIEWS_PATHS)),
            peak_views: to_count(resolve(fields, PEAK_VIEWS_PATHS)),
            video_count: to_count(resolve(fields, VIDEO_COUNT_PATHS)),
            total_minutes: to_float(resolve(fields, TOTAL_MINUTES_PATHS)),
            total_likes: to_count(resolve(fields, TOTAL_LIKES_PATHS)),
            like_rate_pct: to_float(resolve(fields, LIKE_RATE_PATHS)),
            like_rate_smooth_pct: to_float(resolve(fields, LIKE_RATE_SMOOTH_PATHS)),
        }
    }
}

/// Case-insensitive lookup of a performer's rating row.
pub fn find_rating<'a>(rating: &'a [RatingEntry], performer: &str) -> Option<&'a RatingEntry> {
    let wanted = performer.to_lowercase();
    rating
        .iter()
        .find(|entry| entry.performer.to_lowercase() == wanted)
}
