//! Rating DTOs for submission and publisher score lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Rating, RatingSummary, ReservationId};

/// Request body for `POST /reservations/{id}/rating`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRatingRequest {
    /// Score, integer in `[1, 5]`.
    pub rating: i32,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A stored rating.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    /// Rating identifier.
    pub id: Uuid,
    /// Reservation the rating belongs to.
    pub reservation_id: ReservationId,
    /// Publisher being rated.
    pub publisher_id: Uuid,
    /// Subscriber who submitted it.
    pub subscriber_id: Uuid,
    /// Score in `[1, 5]`.
    pub rating: i32,
    /// Optional comment.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingDto {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id,
            reservation_id: r.reservation_id,
            publisher_id: r.publisher_id,
            subscriber_id: r.subscriber_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

/// Response body for `GET /publishers/{id}/rating`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublisherRatingResponse {
    /// Publisher the summary is for.
    pub publisher_id: Uuid,
    /// Mean score rounded to one decimal; `null` with no ratings.
    pub average: Option<f64>,
    /// Number of ratings received.
    pub count: u32,
}

impl PublisherRatingResponse {
    /// Builds the response from a domain summary.
    #[must_use]
    pub fn new(publisher_id: Uuid, summary: RatingSummary) -> Self {
        Self {
            publisher_id,
            average: summary.average,
            count: summary.count,
        }
    }
}
