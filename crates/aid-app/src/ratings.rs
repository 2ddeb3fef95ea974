// Rust guideline compliant 2026-10-16

//! Rating requests: submit and per-user summary.

use crate::access::{guard, guard_kind};
use crate::error::{AppError, Result};
use crate::fields::Fields;
use crate::list::list_records;
use aid_core::{Action, Identity, Rating, RatingDraft, ResourceKind};
use serde::Serialize;

/// Row to insert for a new rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRating {
    pub rater_id: String,
    pub rated_user_id: String,
    pub help_post_id: Option<String>,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Validates a rating submission.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing `rated_user_id` or `rating`, a
/// non-integer or out-of-range score, or a self-rating.
pub fn prepare_submit(identity: &Identity, fields: &Fields) -> Result<NewRating> {
    let rated_user_id = fields.required_str("rated_user_id")?;
    let rating = fields
        .optional_i64("rating")?
        .ok_or_else(|| AppError::InvalidInput("rating is required".to_string()))?;

    let draft = RatingDraft {
        rated_user_id,
        rating,
        help_post_id: fields.optional_str("help_post_id")?,
        comment: fields.optional_str("comment")?,
    };
    guard(identity, &draft, Action::Create)?;

    Ok(NewRating {
        rater_id: identity.id.clone(),
        rated_user_id: draft.rated_user_id,
        help_post_id: draft.help_post_id,
        rating: draft.rating,
        comment: draft.comment,
    })
}

/// Ratings received by one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Rows, newest first.
    pub data: Vec<Rating>,
    /// Mean score rounded to one decimal; 0 without ratings.
    pub average_rating: f64,
    pub total_ratings: usize,
}

/// Summarizes the ratings `user_id` received.
///
/// `rows` may hold ratings of other members; only those for `user_id` count.
///
/// # Errors
///
/// Returns `InvalidInput` if `user_id` is missing.
pub fn summarize(identity: &Identity, fields: &Fields, rows: Vec<Rating>) -> Result<RatingSummary> {
    guard_kind(identity, ResourceKind::Rating, Action::Read)?;
    let user_id = fields.required_str("user_id")?;

    let data = list_records(identity, rows, |r| r.rated_user_id == user_id);
    let total_ratings = data.len();
    let average_rating = if total_ratings == 0 {
        0.0
    } else {
        let sum: i64 = data.iter().map(|r| r.rating).sum();
        round_one_decimal(sum as f64 / total_ratings as f64)
    };

    Ok(RatingSummary {
        data,
        average_rating,
        total_ratings,
    })
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(4.25), 4.3);
        assert_eq!(round_one_decimal(11.0 / 3.0), 3.7);
    }
}
