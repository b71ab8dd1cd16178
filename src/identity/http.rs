//! HTTP client for the external identity provider.

use serde::Deserialize;
use uuid::Uuid;

use super::{AuthenticatedUser, IdentityGateway};
use crate::error::ApiError;

/// Identity gateway that verifies bearer tokens against the provider's
/// `GET /auth/v1/user` endpoint.
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Provider response for a verified token.
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
}

impl HttpIdentityGateway {
    /// Creates a gateway for the given provider base URL and API key.
    #[must_use]
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

impl IdentityGateway for HttpIdentityGateway {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, ApiError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("identity provider unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Unauthenticated);
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("invalid identity response: {e}")))?;

        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
            name: user.user_metadata.name,
        })
    }
}
