//! PostgreSQL implementation of the data-access layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{MarketStore, OwnerContact};
use crate::domain::{
    NewRating, NewReservation, Offer, OfferCategory, OfferId, Rating, Reservation, ReservationId,
    ReservationStatus, Subscription,
};
use crate::error::ApiError;

const OFFER_COLUMNS: &str = "id, title, description, category, town, price, store_name, \
     contact, image_url, created_by, created_at, expires_at";

const RESERVATION_COLUMNS: &str = "id, offer_id, subscriber_id, subscriber_name, \
     subscriber_email, subscriber_phone, message, status, created_at, updated_at";

const RATING_COLUMNS: &str =
    "id, reservation_id, publisher_id, subscriber_id, rating, comment, created_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence(e: sqlx::Error) -> ApiError {
    ApiError::Persistence(e.to_string())
}

impl MarketStore for PostgresStore {
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>, ApiError> {
        sqlx::query_as::<_, Offer>(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)
    }

    async fn get_owner_contact(&self, owner_id: Uuid) -> Result<Option<OwnerContact>, ApiError> {
        sqlx::query_as::<_, OwnerContact>("SELECT name, email FROM profiles WHERE user_id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)
    }

    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, ApiError> {
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (offer_id, subscriber_id, subscriber_name, \
             subscriber_email, subscriber_phone, message) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(new.offer_id.as_uuid())
        .bind(new.subscriber_id)
        .bind(&new.subscriber_name)
        .bind(&new.subscriber_email)
        .bind(&new.subscriber_phone)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>, ApiError> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, ApiError> {
        sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET status = $2, updated_at = now() \
             WHERE id = $1 RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?
        .ok_or(ApiError::ReservationNotFound(id))
    }

    async fn list_reservations_for_publisher(
        &self,
        publisher_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, ApiError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT r.id, r.offer_id, r.subscriber_id, r.subscriber_name, \
             r.subscriber_email, r.subscriber_phone, r.message, r.status, \
             r.created_at, r.updated_at \
             FROM reservations r JOIN offers o ON o.id = r.offer_id \
             WHERE o.created_by = $1 \
             AND ($2::reservation_status IS NULL OR r.status = $2) \
             ORDER BY r.created_at DESC",
        )
        .bind(publisher_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn list_reservations_with_ratings(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<(Reservation, Option<Rating>)>, ApiError> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE subscriber_id = $1 ORDER BY created_at DESC"
        ))
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;

        let ratings = sqlx::query_as::<_, Rating>(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE subscriber_id = $1"
        ))
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;

        let by_reservation: std::collections::HashMap<ReservationId, Rating> = ratings
            .into_iter()
            .map(|r| (r.reservation_id, r))
            .collect();

        Ok(reservations
            .into_iter()
            .map(|r| {
                let rating = by_reservation.get(&r.id).cloned();
                (r, rating)
            })
            .collect())
    }

    async fn upsert_rating(&self, new: NewRating) -> Result<Rating, ApiError> {
        sqlx::query_as::<_, Rating>(&format!(
            "INSERT INTO ratings (reservation_id, publisher_id, subscriber_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (reservation_id) \
             DO UPDATE SET rating = EXCLUDED.rating, comment = EXCLUDED.comment \
             RETURNING {RATING_COLUMNS}"
        ))
        .bind(new.reservation_id.as_uuid())
        .bind(new.publisher_id)
        .bind(new.subscriber_id)
        .bind(new.rating)
        .bind(&new.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn list_ratings(&self, publisher_id: Uuid) -> Result<Vec<Rating>, ApiError> {
        sqlx::query_as::<_, Rating>(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE publisher_id = $1"
        ))
        .bind(publisher_id)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, ApiError> {
        sqlx::query_as::<_, Subscription>(
            "SELECT user_id, town, categories, updated_at FROM subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)
    }

    async fn list_active_offers(
        &self,
        town: &str,
        categories: &[OfferCategory],
        now: DateTime<Utc>,
    ) -> Result<Vec<Offer>, ApiError> {
        sqlx::query_as::<_, Offer>(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE town = $1 \
             AND (cardinality($2::offer_category[]) = 0 OR category = ANY($2)) \
             AND (expires_at IS NULL OR expires_at > $3) \
             ORDER BY created_at DESC"
        ))
        .bind(town)
        .bind(categories)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)
    }
}
