//! Domain layer: core marketplace types and pure business rules.
//!
//! This module holds the entity types (offers, reservations, ratings,
//! subscriptions), the typed identifiers, the reservation status machine,
//! and the pure validation step that runs before any side effect.

pub mod ids;
pub mod offer;
pub mod rating;
pub mod reservation;
pub mod subscription;
pub mod validation;

pub use ids::{OfferId, ReservationId};
pub use offer::{Offer, OfferCategory};
pub use rating::{NewRating, Rating, RatingSummary};
pub use reservation::{NewReservation, Reservation, ReservationStatus, TransitionKind};
pub use subscription::Subscription;
