//! Form definitions backing the storefront and admin pages.
//!
//! Each form derives [`Validate`] with the Vietnamese messages the pages
//! surface next to their inputs, and converts into the matching domain
//! payload once validation passes.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod blog;
pub mod contact;
pub mod order;
pub mod review;
pub mod service;
pub mod user;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("no service selected")]
    MissingService,
}

/// Builds a [`ValidationError`] that carries a user-facing message.
pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Loose address check shared by the contact, order, and user forms: a
/// single `@`, no whitespace, and a dotted domain.
pub(crate) fn email_is_valid(value: &str) -> bool {
    let clean = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@');
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => clean(local) && clean(host) && clean(tld),
        None => false,
    }
}

/// Shape check for optional image URLs: an alphabetic scheme, `://`, and
/// anything after it.
pub(crate) fn url_is_well_formed(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, rest)| {
        !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic()) && !rest.is_empty()
    })
}

/// Flattens [`ValidationErrors`] into one message per field, keeping the
/// first message reported for each.
pub fn message_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        if let Some(first) = field_errors.first() {
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            map.entry(field.to_string()).or_insert(message);
        }
    }
    map
}

/// A form being edited together with its field-level validation messages.
#[derive(Debug, Clone, Default)]
pub struct Draft<F> {
    pub form: F,
    errors: BTreeMap<String, String>,
}

impl<F: Validate> Draft<F> {
    #[must_use]
    pub fn new(form: F) -> Self {
        Self {
            form,
            errors: BTreeMap::new(),
        }
    }

    /// Revalidates the whole form, replacing any previous messages.
    /// Returns `true` when the form is ready to submit.
    pub fn validate(&mut self) -> bool {
        match self.form.validate() {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = message_map(&errors);
                false
            }
        }
    }

    /// Message for one field, if the last validation flagged it.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Drops the message for a field once the user edits it again.
    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
