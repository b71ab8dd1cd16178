//! Rating ledger: one rating per confirmed reservation, publisher
//! score aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewRating, Rating, RatingSummary, ReservationId, ReservationStatus};
use crate::error::ApiError;
use crate::identity::AuthenticatedUser;
use crate::store::MarketStore;

/// Manages the rating ledger.
#[derive(Debug)]
pub struct RatingService<S> {
    store: Arc<S>,
}

impl<S: MarketStore> RatingService<S> {
    /// Creates a new `RatingService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Submits or updates the rating for a confirmed reservation owned
    /// by the caller. Upsert semantics: resubmission edits the existing
    /// row rather than creating a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an out-of-range score,
    /// [`ApiError::ReservationNotFound`] for a missing reservation, or
    /// [`ApiError::NotEligible`] when the reservation belongs to someone
    /// else or is not confirmed.
    pub async fn submit(
        &self,
        requester: &AuthenticatedUser,
        reservation_id: ReservationId,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Rating, ApiError> {
        if !(1..=5).contains(&rating) {
            let mut fields = BTreeMap::new();
            fields.insert(
                "rating".to_string(),
                "must be an integer between 1 and 5".to_string(),
            );
            return Err(ApiError::Validation(fields));
        }

        let reservation = self
            .store
            .get_reservation(reservation_id)
            .await?
            .ok_or(ApiError::ReservationNotFound(reservation_id))?;

        if reservation.subscriber_id != requester.id
            || reservation.status != ReservationStatus::Confirmed
        {
            return Err(ApiError::NotEligible);
        }

        let offer = self
            .store
            .get_offer(reservation.offer_id)
            .await?
            .ok_or(ApiError::OfferNotFound(reservation.offer_id))?;

        let comment = comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let rating = self
            .store
            .upsert_rating(NewRating {
                reservation_id,
                publisher_id: offer.created_by,
                subscriber_id: requester.id,
                rating,
                comment,
            })
            .await?;
        tracing::info!(reservation_id = %reservation_id, score = rating.rating, "rating submitted");
        Ok(rating)
    }

    /// Computes a publisher's unweighted average rating (one decimal
    /// place) and rating count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    pub async fn publisher_average(&self, publisher_id: Uuid) -> Result<RatingSummary, ApiError> {
        let ratings = self.store.list_ratings(publisher_id).await?;
        Ok(RatingSummary::from_ratings(&ratings))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::notify::NotificationDispatcher;
    use crate::service::reservation_service::tests::{
        CaptureMailer, input_for, seeded_store, user,
    };
    use crate::service::ReservationService;
    use crate::store::memory::MemoryStore;

    struct Fixture {
        reservations: ReservationService<MemoryStore, CaptureMailer>,
        ratings: RatingService<MemoryStore>,
        publisher: Uuid,
        offer_id: crate::domain::OfferId,
    }

    async fn fixture() -> Fixture {
        let (store, publisher, offer) = seeded_store().await;
        let reservations = ReservationService::new(
            Arc::clone(&store),
            NotificationDispatcher::new(CaptureMailer::default()),
        );
        let ratings = RatingService::new(store);
        Fixture {
            reservations,
            ratings,
            publisher,
            offer_id: offer.id,
        }
    }

    async fn confirmed_reservation(fx: &Fixture, subscriber: &AuthenticatedUser) -> ReservationId {
        let Ok(reservation) = fx
            .reservations
            .create(subscriber, input_for(fx.offer_id))
            .await
        else {
            panic!("creation failed");
        };
        let Ok(_) = fx
            .reservations
            .transition(
                &user(fx.publisher),
                reservation.id,
                ReservationStatus::Confirmed,
            )
            .await
        else {
            panic!("confirmation failed");
        };
        reservation.id
    }

    #[tokio::test]
    async fn rating_on_pending_reservation_is_not_eligible() {
        let fx = fixture().await;
        let subscriber = user(Uuid::new_v4());
        let Ok(reservation) = fx
            .reservations
            .create(&subscriber, input_for(fx.offer_id))
            .await
        else {
            panic!("creation failed");
        };

        let result = fx.ratings.submit(&subscriber, reservation.id, 5, None).await;
        assert!(matches!(result, Err(ApiError::NotEligible)));

        let Ok(summary) = fx.ratings.publisher_average(fx.publisher).await else {
            panic!("aggregation failed");
        };
        assert_eq!(summary.count, 0);
    }

    #[tokio::test]
    async fn foreign_reservation_is_not_eligible() {
        let fx = fixture().await;
        let subscriber = user(Uuid::new_v4());
        let reservation_id = confirmed_reservation(&fx, &subscriber).await;

        let result = fx
            .ratings
            .submit(&user(Uuid::new_v4()), reservation_id, 5, None)
            .await;
        assert!(matches!(result, Err(ApiError::NotEligible)));
    }

    #[tokio::test]
    async fn out_of_range_score_is_a_validation_error() {
        let fx = fixture().await;
        let subscriber = user(Uuid::new_v4());
        let reservation_id = confirmed_reservation(&fx, &subscriber).await;

        for score in [0, 6, -1] {
            let result = fx
                .ratings
                .submit(&subscriber, reservation_id, score, None)
                .await;
            let Err(ApiError::Validation(fields)) = result else {
                panic!("expected validation error for score {score}");
            };
            assert!(fields.contains_key("rating"));
        }
    }

    #[tokio::test]
    async fn missing_reservation_is_not_found() {
        let fx = fixture().await;
        let result = fx
            .ratings
            .submit(&user(Uuid::new_v4()), ReservationId::new(), 5, None)
            .await;
        assert!(matches!(result, Err(ApiError::ReservationNotFound(_))));
    }

    #[tokio::test]
    async fn resubmission_updates_in_place() {
        let fx = fixture().await;
        let subscriber = user(Uuid::new_v4());
        let reservation_id = confirmed_reservation(&fx, &subscriber).await;

        let Ok(first) = fx
            .ratings
            .submit(&subscriber, reservation_id, 2, Some("Regular".to_string()))
            .await
        else {
            panic!("first submission failed");
        };
        let Ok(second) = fx
            .ratings
            .submit(&subscriber, reservation_id, 4, Some("Mejor".to_string()))
            .await
        else {
            panic!("second submission failed");
        };
        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 4);
        assert_eq!(second.comment.as_deref(), Some("Mejor"));

        let Ok(summary) = fx.ratings.publisher_average(fx.publisher).await else {
            panic!("aggregation failed");
        };
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, Some(4.0));
    }

    #[tokio::test]
    async fn average_over_three_ratings() {
        let fx = fixture().await;
        for score in [5, 3, 4] {
            let subscriber = user(Uuid::new_v4());
            let reservation_id = confirmed_reservation(&fx, &subscriber).await;
            let Ok(_) = fx
                .ratings
                .submit(&subscriber, reservation_id, score, None)
                .await
            else {
                panic!("submission failed");
            };
        }

        let Ok(summary) = fx.ratings.publisher_average(fx.publisher).await else {
            panic!("aggregation failed");
        };
        assert_eq!(summary.average, Some(4.0));
        assert_eq!(summary.count, 3);
    }

    #[tokio::test]
    async fn full_reservation_to_rating_scenario() {
        let fx = fixture().await;
        let subscriber = user(Uuid::new_v4());

        let Ok(reservation) = fx
            .reservations
            .create(&subscriber, input_for(fx.offer_id))
            .await
        else {
            panic!("creation failed");
        };
        assert_eq!(reservation.status, ReservationStatus::Pending);

        let Ok(confirmed) = fx
            .reservations
            .transition(
                &user(fx.publisher),
                reservation.id,
                ReservationStatus::Confirmed,
            )
            .await
        else {
            panic!("confirmation failed");
        };
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        let Ok(rating) = fx
            .ratings
            .submit(&subscriber, reservation.id, 5, Some("Genial".to_string()))
            .await
        else {
            panic!("rating failed");
        };
        assert_eq!(rating.rating, 5);
        assert_eq!(rating.comment.as_deref(), Some("Genial"));

        let Ok(summary) = fx.ratings.publisher_average(fx.publisher).await else {
            panic!("aggregation failed");
        };
        assert_eq!(summary.average, Some(5.0));
        assert_eq!(summary.count, 1);
    }
}
