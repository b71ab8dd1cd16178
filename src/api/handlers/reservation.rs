//! Reservation handlers: create, confirm, cancel, and the two listings.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::bearer_token;
use crate::api::dto::{
    CreateReservationRequest, CreateReservationResponse, ReceivedQuery, ReservationDto,
    ReservationWithRatingDto,
};
use crate::app_state::AppState;
use crate::domain::{ReservationId, ReservationStatus};
use crate::error::{ApiError, ErrorResponse};
use crate::identity::IdentityGateway;

/// `POST /reservations` — Reserve an offer.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] with every failing field,
/// [`ApiError::Unauthenticated`] without a valid token, or
/// [`ApiError::OfferNotFound`] for a missing offer.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    summary = "Reserve an offer",
    description = "Creates a pending reservation against an offer and emails the offer's publisher. Repeat reservations by the same subscriber create independent rows.",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = CreateReservationResponse),
        (status = 400, description = "Invalid request fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Offer not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let reservation = state.reservations.create(&user, req.into_input()).await?;

    let response = CreateReservationResponse {
        success: true,
        reservation_id: reservation.id,
        message: "Reserva creada correctamente".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /reservations/:id/confirm` — Confirm a pending reservation.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] when the caller does not own the
/// offer, or [`ApiError::InvalidTransition`] for cross-terminal moves.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/confirm",
    tag = "Reservations",
    summary = "Confirm a reservation",
    description = "Moves a pending reservation to confirmed. Only the offer's publisher may do this. Repeating the move is an idempotent success.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationDto),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the offer", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed from the current status", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn confirm_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, headers, id, ReservationStatus::Confirmed).await
}

/// `POST /reservations/:id/cancel` — Cancel a pending reservation.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] when the caller does not own the
/// offer, or [`ApiError::InvalidTransition`] for cross-terminal moves.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    summary = "Cancel a reservation",
    description = "Moves a pending reservation to cancelled. Only the offer's publisher may do this. Repeating the move is an idempotent success.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationDto),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the offer", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed from the current status", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, headers, id, ReservationStatus::Cancelled).await
}

async fn transition(
    state: AppState,
    headers: HeaderMap,
    id: uuid::Uuid,
    target: ReservationStatus,
) -> Result<(StatusCode, Json<ReservationDto>), ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let reservation = state
        .reservations
        .transition(&user, ReservationId::from_uuid(id), target)
        .await?;

    Ok((StatusCode::OK, Json(reservation.into())))
}

/// `GET /reservations/received` — Reservations against the caller's
/// offers.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] without a valid token.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/received",
    tag = "Reservations",
    summary = "List received reservations",
    description = "Returns reservations made against the caller's offers, newest first, optionally filtered by status.",
    params(ReceivedQuery),
    responses(
        (status = 200, description = "Received reservations", body = Vec<ReservationDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_received(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReceivedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let reservations = state.reservations.received(&user, query.status).await?;
    let data: Vec<ReservationDto> = reservations.into_iter().map(Into::into).collect();

    Ok(Json(data))
}

/// `GET /reservations/mine` — The caller's own reservations.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] without a valid token.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/mine",
    tag = "Reservations",
    summary = "List my reservations",
    description = "Returns the caller's reservations, newest first, each paired with the rating they submitted for it, if any.",
    responses(
        (status = 200, description = "The caller's reservations", body = Vec<ReservationWithRatingDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_mine(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.authenticate(token).await?;

    let rows = state.reservations.mine(&user).await?;
    let data: Vec<ReservationWithRatingDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(data))
}

/// Reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route("/reservations/received", get(list_received))
        .route("/reservations/mine", get(list_mine))
        .route("/reservations/{id}/confirm", post(confirm_reservation))
        .route("/reservations/{id}/cancel", post(cancel_reservation))
}
