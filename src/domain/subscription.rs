//! Subscription preferences consumed by the offer feed.
//!
//! The gateway reads subscription rows to filter a subscriber's feed but
//! never mutates them; preference management lives with the front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::offer::{Offer, OfferCategory};

/// A subscriber's feed preferences: one town plus a set of categories.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    /// Owning subscriber.
    pub user_id: Uuid,
    /// Town whose offers the feed surfaces.
    pub town: String,
    /// Categories of interest. Empty means all categories.
    pub categories: Vec<OfferCategory>,
    /// Last preference update.
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Returns whether an offer falls inside this subscription's feed
    /// (town match plus category match; expiry is checked separately).
    #[must_use]
    pub fn covers(&self, offer: &Offer) -> bool {
        self.town == offer.town
            && (self.categories.is_empty() || self.categories.contains(&offer.category))
    }
}
