//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::identity::HttpIdentityGateway;
use crate::notify::ResendMailer;
use crate::service::{FeedService, RatingService, ReservationService};
use crate::store::postgres::PostgresStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Reservation lifecycle service.
    pub reservations: Arc<ReservationService<PostgresStore, ResendMailer>>,
    /// Rating ledger service.
    pub ratings: Arc<RatingService<PostgresStore>>,
    /// Subscription feed service.
    pub feed: Arc<FeedService<PostgresStore>>,
    /// External identity provider client.
    pub identity: Arc<HttpIdentityGateway>,
}
