//! Offer records and the closed category set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::OfferId;

/// Closed set of outlet categories an offer may belong to.
///
/// Stored as the PostgreSQL enum `offer_category` and validated at the
/// data-access boundary so free-form category strings can never be
/// persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "offer_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferCategory {
    /// Clothing outlet deals.
    OutletRopa,
    /// Technology outlet deals.
    OutletTecno,
    /// Home goods outlet deals.
    OutletHogar,
    /// Footwear outlet deals.
    OutletZapatos,
    /// Beauty outlet deals.
    OutletBelleza,
    /// Anything that does not fit the other categories.
    Otros,
}

/// An outlet deal posted by a publisher.
///
/// Owned exclusively by its publisher; `created_by` is immutable after
/// creation. Expiry is derived from `expires_at`, never stored as a flag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    /// Unique offer identifier.
    pub id: OfferId,
    /// Offer headline shown to subscribers.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Outlet category.
    pub category: OfferCategory,
    /// Town where the deal is redeemable.
    pub town: String,
    /// Price in euros (non-negative).
    pub price: f64,
    /// Name of the store running the deal.
    pub store_name: String,
    /// Public contact line shown on the offer card.
    pub contact: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Publisher (owner) user id. Immutable.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional expiry; the offer is inactive once passed.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Offer {
    /// Returns whether the offer is still active at `now`.
    ///
    /// Offers without an expiry never go inactive.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn sample_offer(expires_at: Option<DateTime<Utc>>) -> Offer {
        Offer {
            id: OfferId::new(),
            title: "Zapatillas".to_string(),
            description: None,
            category: OfferCategory::OutletZapatos,
            town: "Girona".to_string(),
            price: 19.99,
            store_name: "Outlet Girona".to_string(),
            contact: "info@outletgirona.example".to_string(),
            image_url: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn offer_without_expiry_is_always_active() {
        let offer = sample_offer(None);
        assert!(offer.is_active(Utc::now()));
    }

    #[test]
    fn offer_past_expiry_is_inactive() {
        let now = Utc::now();
        let offer = sample_offer(Some(now - Duration::hours(1)));
        assert!(!offer.is_active(now));
        let offer = sample_offer(Some(now + Duration::hours(1)));
        assert!(offer.is_active(now));
    }

    #[test]
    fn category_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&OfferCategory::OutletRopa).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"OUTLET_ROPA\"");
        let parsed: Result<OfferCategory, _> = serde_json::from_str("\"OTROS\"");
        assert_eq!(parsed.ok(), Some(OfferCategory::Otros));
    }
}
