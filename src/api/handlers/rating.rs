//! Rating handlers: submission and publisher score lookup.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::bearer_token;
use crate::api::dto::{PublisherRatingResponse, RatingDto, SubmitRatingRequest};
use crate::app_state::AppState;
use crate::domain::ReservationId;
use crate::error::{ApiError, ErrorResponse};
use crate::identity::IdentityGateway;

/// `POST /reservations/:id/rating` — Rate a confirmed reservation.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an out-of-range score or
/// [`ApiError::NotEligible`] when the reservation is not the caller's
/// or not confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/rating",
    tag = "Ratings",
    summary = "Rate a confirmed reservation",
    description = "Submits a 1-5 score for one of the caller's confirmed reservations. Resubmitting edits the existing rating in place.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating stored", body = RatingDto),
        (status = 400, description = "Score out of range", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 422, description = "Reservation not eligible for rating", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<SubmitRatingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let rating = state
        .ratings
        .submit(&user, ReservationId::from_uuid(id), req.rating, req.comment)
        .await?;

    Ok((StatusCode::OK, Json(RatingDto::from(rating))))
}

/// `GET /publishers/:id/rating` — A publisher's aggregate score.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/publishers/{id}/rating",
    tag = "Ratings",
    summary = "Get a publisher's aggregate rating",
    description = "Returns the publisher's mean score (one decimal place) and rating count. The average is null for publishers with no ratings.",
    params(
        ("id" = uuid::Uuid, Path, description = "Publisher user UUID"),
    ),
    responses(
        (status = 200, description = "Aggregate rating", body = PublisherRatingResponse),
    )
)]
pub async fn publisher_rating(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.ratings.publisher_average(id).await?;
    Ok(Json(PublisherRatingResponse::new(id, summary)))
}

/// Rating routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations/{id}/rating", post(submit_rating))
        .route("/publishers/{id}/rating", get(publisher_rating))
}
