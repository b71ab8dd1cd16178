//! Gateway error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{OfferId, ReservationId, ReservationStatus};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "validation failed",
///     "details": { "subscriberEmail": "must be a valid email address" }
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Per-field failure reasons for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                    |
/// |-----------|-------------------|--------------------------------|
/// | 1000–1199 | Validation/Auth   | 400 / 401 / 403                |
/// | 2000–2199 | Not Found / State | 404 Not Found / 409 Conflict   |
/// | 3000–3999 | Server            | 500 Internal Server Error      |
/// | 4000–4999 | Domain-Specific   | 422 Unprocessable Entity       |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed; all failing fields are listed.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    /// No valid caller identity.
    #[error("authentication required")]
    Unauthenticated,

    /// Caller lacks ownership rights over the target resource.
    #[error("caller does not own this resource")]
    Forbidden,

    /// Offer with the given ID was not found.
    #[error("offer not found: {0}")]
    OfferNotFound(OfferId),

    /// Reservation with the given ID was not found.
    #[error("reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// Caller has no subscription row configured.
    #[error("no subscription configured for this user")]
    SubscriptionNotFound,

    /// Requested status change violates the reservation state machine.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current reservation status.
        from: ReservationStatus,
        /// Requested target status.
        to: ReservationStatus,
    },

    /// Rating attempted on a non-confirmed or foreign reservation.
    #[error("reservation is not eligible for rating")]
    NotEligible,

    /// Offer owner's contact could not be resolved. Surfaced with a
    /// generic message; the internal cause is logged where raised.
    #[error("reservation could not be processed")]
    RecipientUnresolvable,

    /// Persistence layer failure. Retryable by the client.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Unauthenticated => 1101,
            Self::Forbidden => 1102,
            Self::OfferNotFound(_) => 2001,
            Self::ReservationNotFound(_) => 2002,
            Self::SubscriptionNotFound => 2003,
            Self::InvalidTransition { .. } => 2101,
            Self::NotEligible => 4001,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::RecipientUnresolvable => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::OfferNotFound(_) | Self::ReservationNotFound(_) | Self::SubscriptionNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::NotEligible => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Persistence(_) | Self::RecipientUnresolvable | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::Validation(BTreeMap::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::OfferNotFound(OfferId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidTransition {
                from: ReservationStatus::Cancelled,
                to: ReservationStatus::Confirmed,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::NotEligible.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::RecipientUnresolvable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn recipient_unresolvable_message_is_generic() {
        let message = ApiError::RecipientUnresolvable.to_string();
        assert_eq!(message, "reservation could not be processed");
    }

    #[test]
    fn validation_error_serializes_field_details() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "subscriberEmail".to_string(),
            "must be a valid email address".to_string(),
        );
        let err = ApiError::Validation(fields.clone());
        let body = ErrorResponse {
            error: ErrorBody {
                code: err.error_code(),
                message: err.to_string(),
                details: Some(fields),
            },
        };
        let json = serde_json::to_value(&body).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json["error"]["code"], 1001);
        assert_eq!(
            json["error"]["details"]["subscriberEmail"],
            "must be a valid email address"
        );
    }
}
