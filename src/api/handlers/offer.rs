//! Offer feed handler.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::bearer_token;
use crate::api::dto::OfferDto;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::identity::IdentityGateway;

/// `GET /offers/feed` — Offers matching the caller's subscription.
///
/// # Errors
///
/// Returns [`ApiError::SubscriptionNotFound`] when the caller has no
/// saved subscription.
#[utoipa::path(
    get,
    path = "/api/v1/offers/feed",
    tag = "Offers",
    summary = "Get the subscription feed",
    description = "Returns active offers in the caller's subscribed town and categories, newest first. An empty category set matches every category.",
    responses(
        (status = 200, description = "Matching offers", body = Vec<OfferDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Caller has no subscription", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn offer_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let offers = state.feed.offers_for(&user).await?;
    let data: Vec<OfferDto> = offers.into_iter().map(Into::into).collect();

    Ok(Json(data))
}

/// Offer routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/offers/feed", get(offer_feed))
}
