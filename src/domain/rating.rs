//! Rating records and publisher score aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReservationId;

/// A subscriber's rating of a publisher, attached to one confirmed
/// reservation.
///
/// At most one rating exists per reservation; resubmitting edits the
/// existing row in place (upsert keyed by `reservation_id`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    /// Unique rating identifier.
    pub id: Uuid,
    /// Reservation this rating belongs to (one-to-one).
    pub reservation_id: ReservationId,
    /// Publisher being rated (owner of the reservation's offer).
    pub publisher_id: Uuid,
    /// Subscriber who submitted the rating.
    pub subscriber_id: Uuid,
    /// Score, integer in `[1, 5]`.
    pub rating: i32,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for upserting a rating row.
#[derive(Debug, Clone)]
pub struct NewRating {
    /// Reservation this rating belongs to.
    pub reservation_id: ReservationId,
    /// Publisher being rated.
    pub publisher_id: Uuid,
    /// Subscriber submitting the rating.
    pub subscriber_id: Uuid,
    /// Score, integer in `[1, 5]` (already validated).
    pub rating: i32,
    /// Optional comment (already trimmed).
    pub comment: Option<String>,
}

/// Aggregate view of a publisher's ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Unweighted mean of all scores, rounded to one decimal place.
    /// `None` when the publisher has no ratings yet.
    pub average: Option<f64>,
    /// Number of ratings received.
    pub count: u32,
}

impl RatingSummary {
    /// Computes the summary over a publisher's ratings.
    #[must_use]
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self {
                average: None,
                count: 0,
            };
        }
        let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum as f64 / ratings.len() as f64;
        Self {
            average: Some((mean * 10.0).round() / 10.0),
            count: ratings.len() as u32,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn rating_with_score(score: i32) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            reservation_id: ReservationId::new(),
            publisher_id: Uuid::new_v4(),
            subscriber_id: Uuid::new_v4(),
            rating: score,
            comment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = RatingSummary::from_ratings(&[]);
        assert_eq!(summary.average, None);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn mean_of_five_three_four_is_four() {
        let ratings: Vec<Rating> = [5, 3, 4].into_iter().map(rating_with_score).collect();
        let summary = RatingSummary::from_ratings(&ratings);
        assert_eq!(summary.average, Some(4.0));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        // (5 + 4 + 4) / 3 = 4.333... → 4.3
        let ratings: Vec<Rating> = [5, 4, 4].into_iter().map(rating_with_score).collect();
        let summary = RatingSummary::from_ratings(&ratings);
        assert_eq!(summary.average, Some(4.3));

        // (5 + 4) / 2 = 4.5 stays 4.5
        let ratings: Vec<Rating> = [5, 4].into_iter().map(rating_with_score).collect();
        assert_eq!(RatingSummary::from_ratings(&ratings).average, Some(4.5));
    }
}
