//! Subscription-driven offer feed.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::Offer;
use crate::error::ApiError;
use crate::identity::AuthenticatedUser;
use crate::store::MarketStore;

/// Surfaces the offers matching a subscriber's saved preferences.
#[derive(Debug)]
pub struct FeedService<S> {
    store: Arc<S>,
}

impl<S: MarketStore> FeedService<S> {
    /// Creates a new `FeedService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists active offers in the caller's subscribed town and
    /// categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SubscriptionNotFound`] when the caller has no
    /// subscription row, or [`ApiError::Persistence`] on store failure.
    pub async fn offers_for(&self, requester: &AuthenticatedUser) -> Result<Vec<Offer>, ApiError> {
        let subscription = self
            .store
            .get_subscription(requester.id)
            .await?
            .ok_or(ApiError::SubscriptionNotFound)?;

        self.store
            .list_active_offers(&subscription.town, &subscription.categories, Utc::now())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::{OfferCategory, Subscription};
    use crate::service::reservation_service::tests::{offer_owned_by, user};
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn feed_without_subscription_is_not_found() {
        let service = FeedService::new(Arc::new(MemoryStore::new()));
        let result = service.offers_for(&user(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApiError::SubscriptionNotFound)));
    }

    #[tokio::test]
    async fn feed_filters_by_town_category_and_expiry() {
        let store = Arc::new(MemoryStore::new());
        let publisher = Uuid::new_v4();

        let matching = offer_owned_by(publisher);
        store.insert_offer(matching.clone()).await;

        let mut wrong_town = offer_owned_by(publisher);
        wrong_town.town = "Figueres".to_string();
        store.insert_offer(wrong_town).await;

        let mut wrong_category = offer_owned_by(publisher);
        wrong_category.category = OfferCategory::OutletTecno;
        store.insert_offer(wrong_category).await;

        let mut expired = offer_owned_by(publisher);
        expired.expires_at = Some(Utc::now() - Duration::hours(1));
        store.insert_offer(expired).await;

        let subscriber = user(Uuid::new_v4());
        store
            .insert_subscription(Subscription {
                user_id: subscriber.id,
                town: "Girona".to_string(),
                categories: vec![OfferCategory::OutletZapatos],
                updated_at: Utc::now(),
            })
            .await;

        let service = FeedService::new(store);
        let Ok(offers) = service.offers_for(&subscriber).await else {
            panic!("feed failed");
        };
        assert_eq!(offers.len(), 1);
        let Some(offer) = offers.first() else {
            panic!("expected one offer");
        };
        assert_eq!(offer.id, matching.id);
    }

    #[tokio::test]
    async fn empty_category_set_surfaces_all_categories_in_town() {
        let store = Arc::new(MemoryStore::new());
        let publisher = Uuid::new_v4();
        store.insert_offer(offer_owned_by(publisher)).await;
        let mut other = offer_owned_by(publisher);
        other.category = OfferCategory::OutletRopa;
        store.insert_offer(other).await;

        let subscriber = user(Uuid::new_v4());
        store
            .insert_subscription(Subscription {
                user_id: subscriber.id,
                town: "Girona".to_string(),
                categories: vec![],
                updated_at: Utc::now(),
            })
            .await;

        let service = FeedService::new(store);
        let Ok(offers) = service.offers_for(&subscriber).await else {
            panic!("feed failed");
        };
        assert_eq!(offers.len(), 2);
    }
}
