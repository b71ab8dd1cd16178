//! Reservation DTOs for create, transition, and listing operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::rating_dto::RatingDto;
use crate::domain::validation::ReservationInput;
use crate::domain::{OfferId, Rating, Reservation, ReservationId, ReservationStatus};

/// Request body for `POST /reservations`.
///
/// All fields arrive as raw strings and are validated server-side;
/// per-field failures are reported together in the error response.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Offer being reserved, as a UUID string.
    pub offer_id: String,
    /// Contact name shown to the publisher.
    pub subscriber_name: String,
    /// Contact email shown to the publisher.
    pub subscriber_email: String,
    /// Optional contact phone.
    #[serde(default)]
    pub subscriber_phone: Option<String>,
    /// Optional message to the publisher (max 1000 chars).
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateReservationRequest {
    /// Converts the wire payload into unvalidated reservation input.
    #[must_use]
    pub fn into_input(self) -> ReservationInput {
        ReservationInput {
            offer_id: self.offer_id,
            subscriber_name: self.subscriber_name,
            subscriber_email: self.subscriber_email,
            subscriber_phone: self.subscriber_phone,
            message: self.message,
        }
    }
}

/// Response body for `POST /reservations` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Identifier of the new reservation.
    pub reservation_id: ReservationId,
    /// Human-readable confirmation message.
    pub message: String,
}

/// A reservation as returned by listing and transition endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    /// Reservation identifier.
    pub id: ReservationId,
    /// Offer the reservation targets.
    pub offer_id: OfferId,
    /// Subscriber who created it.
    pub subscriber_id: Uuid,
    /// Contact name.
    pub subscriber_name: String,
    /// Contact email.
    pub subscriber_email: String,
    /// Optional contact phone.
    pub subscriber_phone: Option<String>,
    /// Optional message to the publisher.
    pub message: Option<String>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last status-change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            offer_id: r.offer_id,
            subscriber_id: r.subscriber_id,
            subscriber_name: r.subscriber_name,
            subscriber_email: r.subscriber_email,
            subscriber_phone: r.subscriber_phone,
            message: r.message,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// A subscriber's reservation paired with the rating they gave it, if
/// any. Returned by `GET /reservations/mine`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWithRatingDto {
    /// The reservation.
    pub reservation: ReservationDto,
    /// The caller's rating for it, when one exists.
    pub rating: Option<RatingDto>,
}

impl From<(Reservation, Option<Rating>)> for ReservationWithRatingDto {
    fn from((reservation, rating): (Reservation, Option<Rating>)) -> Self {
        Self {
            reservation: reservation.into(),
            rating: rating.map(Into::into),
        }
    }
}

/// Query parameters for `GET /reservations/received`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReceivedQuery {
    /// Optional status filter (`pending`, `confirmed`, `cancelled`).
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}
