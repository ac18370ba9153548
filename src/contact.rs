//! Boundary contract for the email-sending collaborator.
//!
//! The portfolio's contact form hands a message to an external email service.
//! That transport is out of scope here; this module only defines the seam: the
//! message shape, a [`MessageSender`] trait concrete transports implement,
//! field validation applied before any send attempt, and the fallback notice
//! shown when a send fails. Failures are surfaced once — no retry, no queue.

use crate::domain::error::{Result, VaultError};
use serde::{Deserialize, Serialize};

/// One contact-form message, validated before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Recipient address the portfolio owner configured.
    pub to: String,

    /// Sender's display name from the form.
    pub from_name: String,

    /// Sender's reply address from the form.
    pub from_email: String,

    /// The message text.
    pub body: String,
}

/// Abstraction over email transports.
///
/// Implementations perform one send attempt and report success or failure;
/// callers surface failures directly via [`fallback_notice`].
pub trait MessageSender {
    /// Sends the message.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the message is not queued.
    fn send(&self, message: &ContactMessage) -> Result<()>;
}

/// Validates a contact message's fields.
///
/// All fields must be non-empty after trimming, and the sender address must
/// look like `local@domain.tld`.
///
/// # Errors
///
/// Returns [`VaultError::Contact`] naming the first failing rule.
pub fn validate(message: &ContactMessage) -> Result<()> {
    if message.from_name.trim().is_empty()
        || message.from_email.trim().is_empty()
        || message.body.trim().is_empty()
    {
        return Err(VaultError::Contact("please fill in all fields".to_string()));
    }

    if !looks_like_email(message.from_email.trim()) {
        return Err(VaultError::Contact(
            "please enter a valid email address".to_string(),
        ));
    }

    Ok(())
}

/// Checks the `local@domain.tld` shape: one `@`, a dotted domain, no whitespace.
fn looks_like_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Builds the notice shown when a send fails.
///
/// Offers the direct address as the alternate channel and echoes the message
/// back so the user can resend it by hand.
#[must_use]
pub fn fallback_notice(message: &ContactMessage) -> String {
    format!(
        "Message delivery may be delayed. You can also email directly: {}\n\nYour message: {}",
        message.to, message.body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            to: "owner@example.com".to_string(),
            from_name: "Ada".to_string(),
            from_email: "ada@example.org".to_string(),
            body: "Hello!".to_string(),
        }
    }

    #[test]
    fn valid_message_passes() {
        assert!(validate(&message()).is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut msg = message();
        msg.body = "   ".to_string();
        assert!(matches!(
            validate(&msg).unwrap_err(),
            VaultError::Contact(_)
        ));
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["no-at-sign", "two@@example.com", "a@nodot", "a b@example.com", "a@.tld"] {
            let mut msg = message();
            msg.from_email = bad.to_string();
            assert!(validate(&msg).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn fallback_notice_offers_direct_address_and_echoes_body() {
        let notice = fallback_notice(&message());
        assert!(notice.contains("owner@example.com"));
        assert!(notice.contains("Hello!"));
    }
}
