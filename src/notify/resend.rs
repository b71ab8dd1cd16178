//! Resend transactional email client.

use serde_json::json;

use super::{MailError, Mailer, OutboundEmail};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Mailer backed by the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    /// Creates a mailer sending as `Publicitta <noreply@{domain}>`.
    #[must_use]
    pub fn new(api_key: String, sender_domain: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from: format!("Publicitta <noreply@{sender_domain}>"),
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let body = json!({
            "from": self.from,
            "to": [email.to],
            "subject": email.subject,
            "html": email.html,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            Err(MailError::Api { status, body })
        }
    }
}
