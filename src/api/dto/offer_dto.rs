//! Offer DTOs for the subscription feed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Offer, OfferCategory, OfferId};

/// An offer as shown in a subscriber's feed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferDto {
    /// Offer identifier.
    pub id: OfferId,
    /// Offer headline.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Outlet category.
    pub category: OfferCategory,
    /// Town where the deal is redeemable.
    pub town: String,
    /// Price in euros.
    pub price: f64,
    /// Name of the store running the deal.
    pub store_name: String,
    /// Public contact line.
    pub contact: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Publisher user id.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Offer> for OfferDto {
    fn from(o: Offer) -> Self {
        Self {
            id: o.id,
            title: o.title,
            description: o.description,
            category: o.category,
            town: o.town,
            price: o.price,
            store_name: o.store_name,
            contact: o.contact,
            image_url: o.image_url,
            created_by: o.created_by,
            created_at: o.created_at,
            expires_at: o.expires_at,
        }
    }
}
