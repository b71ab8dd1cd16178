//! Data-access layer for the marketplace tables.
//!
//! [`MarketStore`] is the query interface the services consume. The
//! production implementation is [`postgres::PostgresStore`] backed by
//! `sqlx::PgPool`; [`memory::MemoryStore`] backs unit tests and DB-less
//! local runs.

pub mod memory;
pub mod postgres;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    NewRating, NewReservation, Offer, OfferCategory, OfferId, Rating, Reservation, ReservationId,
    ReservationStatus, Subscription,
};
use crate::error::ApiError;

/// Contact identity of an offer owner, used as the notification
/// recipient. The email is the verified address mirrored from the
/// identity provider.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OwnerContact {
    /// Display name of the publisher.
    pub name: String,
    /// Verified email address of the publisher.
    pub email: String,
}

/// Query interface over the marketplace tables.
///
/// Each method is a single-row or single-statement operation; the store
/// provides per-row atomicity and nothing orchestrates multi-row
/// transactions on top of it.
#[allow(async_fn_in_trait)]
pub trait MarketStore: Send + Sync {
    /// Fetches an offer by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>, ApiError>;

    /// Resolves the contact identity (name plus verified email) of an
    /// offer owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn get_owner_contact(&self, owner_id: Uuid) -> Result<Option<OwnerContact>, ApiError>;

    /// Inserts a reservation row with `status = pending` and
    /// server-assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, ApiError>;

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>, ApiError>;

    /// Sets a reservation's status and bumps `updated_at`, returning the
    /// updated row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] if the row does not
    /// exist, or [`ApiError::Persistence`] on store failure.
    async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, ApiError>;

    /// Lists reservations made against a publisher's offers, newest
    /// first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn list_reservations_for_publisher(
        &self,
        publisher_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, ApiError>;

    /// Lists a subscriber's own reservations, newest first, each with
    /// its rating if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn list_reservations_with_ratings(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<(Reservation, Option<Rating>)>, ApiError>;

    /// Inserts a rating or, if one already exists for the reservation,
    /// updates its score and comment in place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn upsert_rating(&self, new: NewRating) -> Result<Rating, ApiError>;

    /// Lists all ratings received by a publisher.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn list_ratings(&self, publisher_id: Uuid) -> Result<Vec<Rating>, ApiError>;

    /// Fetches a subscriber's feed preferences.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, ApiError>;

    /// Lists active (non-expired) offers in a town, newest first,
    /// restricted to the given categories. An empty category slice
    /// matches all categories.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    async fn list_active_offers(
        &self,
        town: &str,
        categories: &[OfferCategory],
        now: DateTime<Utc>,
    ) -> Result<Vec<Offer>, ApiError>;
}
