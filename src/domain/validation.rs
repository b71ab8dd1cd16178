//! Pure validation of reservation requests.
//!
//! Validation is a side-effect-free step that runs before anything
//! touches the store. All failing fields are collected and reported
//! together so a consuming form can highlight every problem at once.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::{NewReservation, OfferId};

/// Maximum length of the contact email.
pub const MAX_EMAIL_LEN: usize = 255;
/// Maximum length of the optional phone field.
pub const MAX_PHONE_LEN: usize = 20;
/// Maximum length of the optional message field.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Raw reservation request fields, exactly as received on the wire.
#[derive(Debug, Clone)]
pub struct ReservationInput {
    /// Target offer id as an unparsed string.
    pub offer_id: String,
    /// Contact name.
    pub subscriber_name: String,
    /// Contact email.
    pub subscriber_email: String,
    /// Optional contact phone.
    pub subscriber_phone: Option<String>,
    /// Optional message to the publisher.
    pub message: Option<String>,
}

/// Map of wire field name to failure reason.
pub type FieldErrors = BTreeMap<String, String>;

/// Validates and sanitizes a reservation request.
///
/// Trims every text field, drops optional fields that are empty after
/// trimming, and parses the offer id. Does not short-circuit: every
/// failing field appears in the returned map.
///
/// # Errors
///
/// Returns the per-field error map when any field is invalid.
pub fn validate_reservation(
    requester: Uuid,
    input: &ReservationInput,
) -> Result<NewReservation, FieldErrors> {
    let mut errors = FieldErrors::new();

    let offer_id = match input.offer_id.trim().parse::<Uuid>() {
        Ok(uuid) => Some(OfferId::from_uuid(uuid)),
        Err(_) => {
            errors.insert(
                "offerId".to_string(),
                "must be a well-formed UUID".to_string(),
            );
            None
        }
    };

    let name = input.subscriber_name.trim();
    let name_len = name.chars().count();
    if !(2..=100).contains(&name_len) {
        errors.insert(
            "subscriberName".to_string(),
            "must be between 2 and 100 characters".to_string(),
        );
    }

    let email = input.subscriber_email.trim();
    if !is_valid_email(email) {
        errors.insert(
            "subscriberEmail".to_string(),
            "must be a valid email address".to_string(),
        );
    }

    let phone = normalize_optional(input.subscriber_phone.as_deref());
    if let Some(ref phone) = phone
        && phone.chars().count() > MAX_PHONE_LEN
    {
        errors.insert(
            "subscriberPhone".to_string(),
            format!("must be at most {MAX_PHONE_LEN} characters"),
        );
    }

    let message = normalize_optional(input.message.as_deref());
    if let Some(ref message) = message
        && message.chars().count() > MAX_MESSAGE_LEN
    {
        errors.insert(
            "message".to_string(),
            format!("must be at most {MAX_MESSAGE_LEN} characters"),
        );
    }

    match (errors.is_empty(), offer_id) {
        (true, Some(offer_id)) => Ok(NewReservation {
            offer_id,
            subscriber_id: requester,
            subscriber_name: name.to_string(),
            subscriber_email: email.to_string(),
            subscriber_phone: phone,
            message,
        }),
        _ => Err(errors),
    }
}

/// Trims an optional field; empty-after-trim collapses to `None`.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Structural email check: one `@`, non-empty local part, and a domain
/// containing a dot, with no whitespace anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn valid_input() -> ReservationInput {
        ReservationInput {
            offer_id: Uuid::new_v4().to_string(),
            subscriber_name: "  Ana  ".to_string(),
            subscriber_email: "ana@example.com".to_string(),
            subscriber_phone: Some("600123123".to_string()),
            message: Some("¿Sigue disponible?".to_string()),
        }
    }

    #[test]
    fn valid_input_is_trimmed_and_accepted() {
        let requester = Uuid::new_v4();
        let result = validate_reservation(requester, &valid_input());
        let Ok(new) = result else {
            panic!("expected valid input to pass");
        };
        assert_eq!(new.subscriber_name, "Ana");
        assert_eq!(new.subscriber_id, requester);
        assert_eq!(new.subscriber_phone.as_deref(), Some("600123123"));
    }

    #[test]
    fn empty_optionals_collapse_to_none() {
        let mut input = valid_input();
        input.subscriber_phone = Some("   ".to_string());
        input.message = None;
        let Ok(new) = validate_reservation(Uuid::new_v4(), &input) else {
            panic!("expected valid input to pass");
        };
        assert_eq!(new.subscriber_phone, None);
        assert_eq!(new.message, None);
    }

    #[test]
    fn all_failing_fields_are_reported_together() {
        let input = ReservationInput {
            offer_id: "not-a-uuid".to_string(),
            subscriber_name: "A".to_string(),
            subscriber_email: "not-an-email".to_string(),
            subscriber_phone: Some("1".repeat(21)),
            message: Some("x".repeat(1001)),
        };
        let Err(errors) = validate_reservation(Uuid::new_v4(), &input) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 5);
        assert!(errors.contains_key("offerId"));
        assert!(errors.contains_key("subscriberName"));
        assert!(errors.contains_key("subscriberEmail"));
        assert!(errors.contains_key("subscriberPhone"));
        assert!(errors.contains_key("message"));
    }

    #[test]
    fn name_boundaries() {
        let mut input = valid_input();
        input.subscriber_name = "ab".to_string();
        assert!(validate_reservation(Uuid::new_v4(), &input).is_ok());
        input.subscriber_name = "a".repeat(100);
        assert!(validate_reservation(Uuid::new_v4(), &input).is_ok());
        input.subscriber_name = "a".repeat(101);
        assert!(validate_reservation(Uuid::new_v4(), &input).is_err());
    }

    #[test]
    fn email_format_checks() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("anaexample.com"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@.example.com"));
        assert!(!is_valid_email("ana @example.com"));
        let long_local = "a".repeat(250);
        assert!(!is_valid_email(&format!("{long_local}@example.com")));
    }
}
