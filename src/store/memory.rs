//! In-memory implementation of the data-access layer.
//!
//! Backs the service unit tests and DB-less local runs. Mirrors the
//! PostgreSQL semantics: server-assigned ids, `pending` default status,
//! upsert-by-reservation for ratings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MarketStore, OwnerContact};
use crate::domain::{
    NewRating, NewReservation, Offer, OfferCategory, OfferId, Rating, Reservation, ReservationId,
    ReservationStatus, Subscription,
};
use crate::error::ApiError;

/// In-memory store over `RwLock`-protected maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    offers: RwLock<HashMap<OfferId, Offer>>,
    profiles: RwLock<HashMap<Uuid, OwnerContact>>,
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
    ratings: RwLock<HashMap<ReservationId, Rating>>,
    subscriptions: RwLock<HashMap<Uuid, Subscription>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an offer row.
    pub async fn insert_offer(&self, offer: Offer) {
        self.offers.write().await.insert(offer.id, offer);
    }

    /// Seeds a publisher profile row.
    pub async fn insert_profile(&self, user_id: Uuid, contact: OwnerContact) {
        self.profiles.write().await.insert(user_id, contact);
    }

    /// Seeds a subscription row.
    pub async fn insert_subscription(&self, subscription: Subscription) {
        self.subscriptions
            .write()
            .await
            .insert(subscription.user_id, subscription);
    }
}

impl MarketStore for MemoryStore {
    async fn get_offer(&self, id: OfferId) -> Result<Option<Offer>, ApiError> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn get_owner_contact(&self, owner_id: Uuid) -> Result<Option<OwnerContact>, ApiError> {
        Ok(self.profiles.read().await.get(&owner_id).cloned())
    }

    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, ApiError> {
        let now = Utc::now();
        let reservation = Reservation {
            id: ReservationId::new(),
            offer_id: new.offer_id,
            subscriber_id: new.subscriber_id,
            subscriber_name: new.subscriber_name,
            subscriber_email: new.subscriber_email,
            subscriber_phone: new.subscriber_phone,
            message: new.message,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>, ApiError> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, ApiError> {
        let mut map = self.reservations.write().await;
        let reservation = map.get_mut(&id).ok_or(ApiError::ReservationNotFound(id))?;
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn list_reservations_for_publisher(
        &self,
        publisher_id: Uuid,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, ApiError> {
        let offers = self.offers.read().await;
        let mut rows: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| {
                offers
                    .get(&r.offer_id)
                    .is_some_and(|o| o.created_by == publisher_id)
                    && status.is_none_or(|s| r.status == s)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_reservations_with_ratings(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<(Reservation, Option<Rating>)>, ApiError> {
        let ratings = self.ratings.read().await;
        let mut rows: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.subscriber_id == subscriber_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .map(|r| {
                let rating = ratings.get(&r.id).cloned();
                (r, rating)
            })
            .collect())
    }

    async fn upsert_rating(&self, new: NewRating) -> Result<Rating, ApiError> {
        use std::collections::hash_map::Entry;

        let mut map = self.ratings.write().await;
        let rating = match map.entry(new.reservation_id) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.rating = new.rating;
                existing.comment = new.comment;
                existing.clone()
            }
            Entry::Vacant(entry) => entry
                .insert(Rating {
                    id: Uuid::new_v4(),
                    reservation_id: new.reservation_id,
                    publisher_id: new.publisher_id,
                    subscriber_id: new.subscriber_id,
                    rating: new.rating,
                    comment: new.comment,
                    created_at: Utc::now(),
                })
                .clone(),
        };
        Ok(rating)
    }

    async fn list_ratings(&self, publisher_id: Uuid) -> Result<Vec<Rating>, ApiError> {
        Ok(self
            .ratings
            .read()
            .await
            .values()
            .filter(|r| r.publisher_id == publisher_id)
            .cloned()
            .collect())
    }

    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, ApiError> {
        Ok(self.subscriptions.read().await.get(&user_id).cloned())
    }

    async fn list_active_offers(
        &self,
        town: &str,
        categories: &[OfferCategory],
        now: DateTime<Utc>,
    ) -> Result<Vec<Offer>, ApiError> {
        let mut rows: Vec<Offer> = self
            .offers
            .read()
            .await
            .values()
            .filter(|o| {
                o.town == town
                    && (categories.is_empty() || categories.contains(&o.category))
                    && o.is_active(now)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
