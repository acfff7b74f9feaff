// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact-form validation and the simulated send.
//!
//! Nothing is transmitted: a valid submission puts the submit button into a
//! "sending" state for [`SEND_DELAY_MS`], then the page thanks the visitor
//! and resets the form. Validation failures are reported before any delay
//! starts.

use alloc::format;
use alloc::string::{String, ToString as _};

/// Simulated network latency for a submission, in milliseconds.
pub const SEND_DELAY_MS: u32 = 2000;

/// Label shown on the submit button while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";

/// Message shown when the simulated send completes.
pub const THANK_YOU: &str = "Thank you! Your message has been sent successfully.";

/// A required contact-form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `firstName`.
    FirstName,
    /// `lastName`.
    LastName,
    /// `email`.
    Email,
    /// `message`.
    Message,
}

impl Field {
    /// Every required field, in form order.
    pub const REQUIRED: [Self; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Message];

    /// The input's `name` attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Why a submission was rejected.
///
/// The `Display` text is the message shown to the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("Please fill in all required fields.")]
    MissingField(Field),
    /// The email address is not of the form `local@domain.tld`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Why [`SubmitFlow::submit`] refused to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The form contents are invalid.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A previous submission is still sending.
    #[error("a submission is already in flight")]
    InFlight,
}

/// Raw form values as read from the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactFields<'a> {
    /// `firstName` value.
    pub first_name: &'a str,
    /// `lastName` value.
    pub last_name: &'a str,
    /// `email` value.
    pub email: &'a str,
    /// `message` value.
    pub message: &'a str,
}

impl<'a> ContactFields<'a> {
    /// Returns the value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &'a str {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }
}

/// A validated submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender's first name.
    pub first_name: String,
    /// Sender's last name.
    pub last_name: String,
    /// Sender's email address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Returns `true` if `email` looks like `local@domain.tld`.
///
/// The address must contain no whitespace and exactly one `@`, with a
/// non-empty local part and a domain holding a `.` that has at least one
/// character on each side.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Checks the form in field order, then the email shape.
pub fn validate(fields: &ContactFields<'_>) -> Result<ContactSubmission, ValidationError> {
    if let Some(missing) = Field::REQUIRED.into_iter().find(|&f| fields.get(f).is_empty()) {
        return Err(ValidationError::MissingField(missing));
    }
    if !is_valid_email(fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(ContactSubmission {
        first_name: fields.first_name.to_string(),
        last_name: fields.last_name.to_string(),
        email: fields.email.to_string(),
        message: fields.message.to_string(),
    })
}

/// An accepted submission waiting on its simulated send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    /// The validated submission.
    pub submission: ContactSubmission,
    /// Delay before [`SubmitFlow::complete`] should be called.
    pub delay_ms: u32,
}

/// The submit button's two states.
#[derive(Clone, Debug, Default)]
pub struct SubmitFlow {
    in_flight: bool,
}

impl SubmitFlow {
    /// Creates an idle flow.
    #[must_use]
    pub const fn new() -> Self {
        Self { in_flight: false }
    }

    /// Returns `true` while a submission is sending.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validates and, on success, enters the sending state.
    ///
    /// The caller disables the button, shows [`SENDING_LABEL`] and schedules
    /// [`complete`](Self::complete) after the returned delay.
    pub fn submit(&mut self, fields: &ContactFields<'_>) -> Result<PendingSend, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }
        let submission = validate(fields)?;
        self.in_flight = true;
        Ok(PendingSend {
            submission,
            delay_ms: SEND_DELAY_MS,
        })
    }

    /// Finishes the simulated send, returning the message to show.
    ///
    /// Returns `None` if nothing was in flight.
    pub fn complete(&mut self) -> Option<&'static str> {
        core::mem::take(&mut self.in_flight).then_some(THANK_YOU)
    }

    /// Leaves the sending state without a thank-you message.
    ///
    /// Used when the send could not be scheduled; the caller restores the
    /// button.
    pub fn abort(&mut self) {
        self.in_flight = false;
    }
}

/// Message shown after a rental request for `equipment`.
#[must_use]
pub fn rental_message(equipment: &str) -> String {
    format!("Rental request for {equipment} has been submitted!")
}

/// Message shown after a specification request for `equipment`.
#[must_use]
pub fn info_message(equipment: &str) -> String {
    format!("Detailed specifications for {equipment} will be sent to your email.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields<'static> {
        ContactFields {
            first_name: "Ada",
            last_name: "Lovelace",
            email: "ada@studio.film",
            message: "Looking to book the sound stage.",
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.studio.film"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn missing_field_is_reported_first() {
        let fields = ContactFields {
            last_name: "",
            email: "not-an-email",
            ..filled()
        };
        assert_eq!(
            validate(&fields),
            Err(ValidationError::MissingField(Field::LastName))
        );
    }

    #[test]
    fn error_text_is_user_facing() {
        use alloc::string::ToString as _;
        assert_eq!(
            ValidationError::MissingField(Field::Email).to_string(),
            "Please fill in all required fields."
        );
        assert_eq!(
            SubmitError::from(ValidationError::InvalidEmail).to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn invalid_submission_never_enters_sending() {
        let mut flow = SubmitFlow::new();
        let fields = ContactFields {
            email: "ada@studio",
            ..filled()
        };
        assert_eq!(
            flow.submit(&fields),
            Err(SubmitError::Invalid(ValidationError::InvalidEmail))
        );
        assert!(!flow.is_in_flight());
        assert_eq!(flow.complete(), None);
    }

    #[test]
    fn valid_submission_round_trip() {
        let mut flow = SubmitFlow::new();
        let pending = flow.submit(&filled()).unwrap();
        assert_eq!(pending.delay_ms, SEND_DELAY_MS);
        assert_eq!(pending.submission.first_name, "Ada");
        assert!(flow.is_in_flight());
        assert_eq!(flow.submit(&filled()), Err(SubmitError::InFlight));
        assert_eq!(flow.complete(), Some(THANK_YOU));
        assert!(!flow.is_in_flight());
    }

    #[test]
    fn aborted_send_accepts_the_next_submission() {
        let mut flow = SubmitFlow::new();
        assert!(flow.submit(&filled()).is_ok(), "first submission is valid");
        flow.abort();
        assert!(!flow.is_in_flight());
        assert_eq!(flow.complete(), None);
        assert!(
            flow.submit(&filled()).is_ok(),
            "an aborted send must not block the form"
        );
    }

    #[test]
    fn equipment_messages_name_the_item() {
        assert_eq!(
            rental_message("ARRI Alexa Mini"),
            "Rental request for ARRI Alexa Mini has been submitted!"
        );
        assert!(
            info_message("Aputure 600d").starts_with("Detailed specifications for Aputure 600d"),
            "unexpected info message"
        );
    }
}
