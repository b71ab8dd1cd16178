//! Reservation engine: validation, persistence, notification, and the
//! status transition service.

use std::sync::Arc;

use crate::domain::validation::{ReservationInput, validate_reservation};
use crate::domain::{Rating, Reservation, ReservationId, ReservationStatus, TransitionKind};
use crate::error::ApiError;
use crate::identity::AuthenticatedUser;
use crate::notify::{Mailer, NotificationDispatcher};
use crate::store::MarketStore;

/// Orchestrates the reservation lifecycle.
///
/// `create` follows a strict order: validate → resolve offer → resolve
/// recipient → persist → notify. Persistence must succeed before any
/// notification attempt, and a failed notification never rolls the
/// reservation back.
#[derive(Debug)]
pub struct ReservationService<S, M> {
    store: Arc<S>,
    dispatcher: NotificationDispatcher<M>,
}

impl<S: MarketStore, M: Mailer> ReservationService<S, M> {
    /// Creates a new `ReservationService`.
    #[must_use]
    pub fn new(store: Arc<S>, dispatcher: NotificationDispatcher<M>) -> Self {
        Self { store, dispatcher }
    }

    /// Creates a reservation and notifies the offer owner.
    ///
    /// Repeat reservations by the same subscriber against the same offer
    /// are permitted and create independent rows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with every failing field,
    /// [`ApiError::OfferNotFound`] for a missing offer,
    /// [`ApiError::RecipientUnresolvable`] when the owner's contact
    /// cannot be resolved (no orphan reservation is written), or
    /// [`ApiError::Persistence`] when the insert fails.
    pub async fn create(
        &self,
        requester: &AuthenticatedUser,
        input: ReservationInput,
    ) -> Result<Reservation, ApiError> {
        let new = validate_reservation(requester.id, &input).map_err(ApiError::Validation)?;

        let offer = self
            .store
            .get_offer(new.offer_id)
            .await?
            .ok_or(ApiError::OfferNotFound(new.offer_id))?;

        let owner = self
            .store
            .get_owner_contact(offer.created_by)
            .await?
            .ok_or_else(|| {
                tracing::warn!(offer_id = %offer.id, "offer owner has no resolvable contact");
                ApiError::RecipientUnresolvable
            })?;

        let reservation = self.store.insert_reservation(new).await?;
        tracing::info!(
            reservation_id = %reservation.id,
            offer_id = %offer.id,
            "reservation created"
        );

        // Best-effort: a single attempt, absorbed on failure.
        if let Err(error) = self
            .dispatcher
            .notify_owner(&offer, &reservation, &owner)
            .await
        {
            tracing::error!(
                reservation_id = %reservation.id,
                %error,
                "reservation notification failed"
            );
        }

        Ok(reservation)
    }

    /// Moves a reservation into `target`, enforcing ownership and the
    /// status machine. Repeating the current state is an idempotent
    /// success that leaves the row untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`],
    /// [`ApiError::OfferNotFound`], [`ApiError::Forbidden`] when the
    /// caller does not own the offer, or [`ApiError::InvalidTransition`]
    /// for cross-terminal moves.
    pub async fn transition(
        &self,
        requester: &AuthenticatedUser,
        id: ReservationId,
        target: ReservationStatus,
    ) -> Result<Reservation, ApiError> {
        let reservation = self
            .store
            .get_reservation(id)
            .await?
            .ok_or(ApiError::ReservationNotFound(id))?;

        let offer = self
            .store
            .get_offer(reservation.offer_id)
            .await?
            .ok_or(ApiError::OfferNotFound(reservation.offer_id))?;

        if offer.created_by != requester.id {
            return Err(ApiError::Forbidden);
        }

        match reservation.status.transition_kind(target) {
            TransitionKind::Noop => Ok(reservation),
            TransitionKind::Allowed => {
                let updated = self.store.update_reservation_status(id, target).await?;
                tracing::info!(reservation_id = %id, status = %target, "reservation status updated");
                Ok(updated)
            }
            TransitionKind::Invalid => Err(ApiError::InvalidTransition {
                from: reservation.status,
                to: target,
            }),
        }
    }

    /// Lists reservations made against the caller's offers, newest
    /// first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    pub async fn received(
        &self,
        requester: &AuthenticatedUser,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, ApiError> {
        self.store
            .list_reservations_for_publisher(requester.id, status)
            .await
    }

    /// Lists the caller's own reservations with their ratings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on store failure.
    pub async fn mine(
        &self,
        requester: &AuthenticatedUser,
    ) -> Result<Vec<(Reservation, Option<Rating>)>, ApiError> {
        self.store.list_reservations_with_ratings(requester.id).await
    }
}
