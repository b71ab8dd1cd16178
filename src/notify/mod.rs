//! Notification layer: owner emails for new reservations.
//!
//! Isolated failure domain. The dispatcher renders and sends in a single
//! attempt; callers log failures and never let them propagate into the
//! reservation's durability path.

pub mod resend;
pub mod template;

use crate::domain::{Offer, Reservation};
use crate::store::OwnerContact;

pub use resend::ResendMailer;

/// A rendered transactional email ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Delivery failure from the email provider.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The HTTP request to the provider failed.
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the send.
    #[error("email provider error: {status} - {body}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider response body.
        body: String,
    },
}

/// Sends rendered emails through a transactional provider.
#[allow(async_fn_in_trait)]
pub trait Mailer: Send + Sync {
    /// Makes a single delivery attempt; no retries.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the provider rejects or the request
    /// fails.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Formats and sends the owner notification for a new reservation.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher<M> {
    mailer: M,
}

impl<M: Mailer> NotificationDispatcher<M> {
    /// Creates a dispatcher over the given mailer.
    #[must_use]
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }

    /// Returns a reference to the inner mailer.
    #[must_use]
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Renders the notification email and makes one delivery attempt.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] on delivery failure. The caller decides
    /// whether to absorb it; reservation creation always does.
    pub async fn notify_owner(
        &self,
        offer: &Offer,
        reservation: &Reservation,
        owner: &OwnerContact,
    ) -> Result<(), MailError> {
        let email = OutboundEmail {
            to: owner.email.clone(),
            subject: template::reservation_subject(&offer.title),
            html: template::reservation_email(offer, reservation, &owner.name),
        };
        self.mailer.send(&email).await
    }
}
