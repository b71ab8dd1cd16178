//! Reservation records and the reservation status machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{OfferId, ReservationId};

/// Lifecycle status of a reservation.
///
/// Stored as the PostgreSQL enum `reservation_status`. Transitions are
/// one-directional from [`ReservationStatus::Pending`]; see
/// [`ReservationStatus::transition_kind`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Initial state: awaiting the publisher's decision.
    Pending,
    /// Accepted by the publisher. Unlocks rating eligibility.
    Confirmed,
    /// Declined by the publisher. Terminal.
    Cancelled,
}

impl ReservationStatus {
    /// Returns whether this status is terminal (no further transitions).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Classification of a requested status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// The reservation is already in the target state; succeed without
    /// touching the row.
    Noop,
    /// A legal `pending → confirmed` / `pending → cancelled` move.
    Allowed,
    /// Any other move, including `confirmed ↔ cancelled` and anything
    /// back to `pending`.
    Invalid,
}

impl ReservationStatus {
    /// Classifies a transition from `self` into `target`.
    ///
    /// Repeating a transition into the current state is a no-op success
    /// rather than an error; terminal states never move again.
    #[must_use]
    pub fn transition_kind(self, target: Self) -> TransitionKind {
        if self == target {
            TransitionKind::Noop
        } else if self == Self::Pending && target != Self::Pending {
            TransitionKind::Allowed
        } else {
            TransitionKind::Invalid
        }
    }
}

/// A subscriber's reservation against an offer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: ReservationId,
    /// Offer this reservation targets.
    pub offer_id: OfferId,
    /// Authenticated subscriber who created the reservation.
    pub subscriber_id: Uuid,
    /// Contact name supplied with the request (trimmed, 2–100 chars).
    pub subscriber_name: String,
    /// Contact email supplied with the request.
    pub subscriber_email: String,
    /// Optional contact phone.
    pub subscriber_phone: Option<String>,
    /// Optional free-text message to the publisher.
    pub message: Option<String>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last status-change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new reservation row.
///
/// Produced by validation (see [`super::validation`]); the store assigns
/// `id`, `status = pending`, and the timestamps.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Offer this reservation targets.
    pub offer_id: OfferId,
    /// Authenticated subscriber creating the reservation.
    pub subscriber_id: Uuid,
    /// Contact name (already trimmed and validated).
    pub subscriber_name: String,
    /// Contact email (already validated).
    pub subscriber_email: String,
    /// Optional contact phone (already trimmed).
    pub subscriber_phone: Option<String>,
    /// Optional message (already trimmed).
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::ReservationStatus::{Cancelled, Confirmed, Pending};
    use super::TransitionKind::{Allowed, Invalid, Noop};
    use super::*;

    #[test]
    fn pending_moves_to_either_terminal_state() {
        assert_eq!(Pending.transition_kind(Confirmed), Allowed);
        assert_eq!(Pending.transition_kind(Cancelled), Allowed);
    }

    #[test]
    fn repeat_transition_is_a_noop() {
        assert_eq!(Pending.transition_kind(Pending), Noop);
        assert_eq!(Confirmed.transition_kind(Confirmed), Noop);
        assert_eq!(Cancelled.transition_kind(Cancelled), Noop);
    }

    #[test]
    fn terminal_states_never_cross_over() {
        assert_eq!(Confirmed.transition_kind(Cancelled), Invalid);
        assert_eq!(Cancelled.transition_kind(Confirmed), Invalid);
    }

    #[test]
    fn nothing_moves_back_to_pending() {
        assert_eq!(Confirmed.transition_kind(Pending), Invalid);
        assert_eq!(Cancelled.transition_kind(Pending), Invalid);
    }

    #[test]
    fn terminal_flags() {
        assert!(!Pending.is_terminal());
        assert!(Confirmed.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&Confirmed).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"confirmed\"");
    }
}
