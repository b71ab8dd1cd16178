//! Identity gateway: resolves bearer credentials into caller identities.
//!
//! Authentication itself (login, token issuance) lives with an external
//! identity provider; the gateway only verifies tokens against it and
//! passes the resolved identity explicitly into each request handler.
//! There is no ambient session state.

pub mod http;

use uuid::Uuid;

use crate::error::ApiError;

pub use http::HttpIdentityGateway;

/// A verified caller identity, request-scoped.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    pub id: Uuid,
    /// Verified email address.
    pub email: String,
    /// Display name, when the provider has one.
    pub name: Option<String>,
}

/// Resolves a bearer token into an [`AuthenticatedUser`].
#[allow(async_fn_in_trait)]
pub trait IdentityGateway: Send + Sync {
    /// Verifies the token with the identity provider.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] when the token is invalid
    /// or expired, [`ApiError::Internal`] when the provider is
    /// unreachable.
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, ApiError>;
}
