//! Request validation run before handlers reach the domain.
//!
//! DTOs implement [`Validate`] and collect every violation rather than
//! stopping at the first, so clients see the whole list at once.

use std::sync::OnceLock;

use regex::Regex;

use super::error::ApiError;

/// Convert raw request input into a validated value.
pub trait Validate {
    /// Value produced when every constraint holds.
    type Output;

    /// Check all constraints, returning violations in declaration order.
    fn validate(self) -> Result<Self::Output, Vec<String>>;
}

/// Validate `input`, mapping violations to [`ApiError::Validation`].
///
/// # Examples
/// ```
/// use pfj_backend::inbound::http::users::CreateUserRequest;
/// use pfj_backend::inbound::http::validation::validated;
///
/// let request = CreateUserRequest { name: Some("Ada".into()), email: Some("ada@example.com".into()) };
/// let user = validated(request).expect("valid request");
/// assert_eq!(user.name(), "Ada");
/// ```
pub fn validated<T: Validate>(input: T) -> Result<T::Output, ApiError> {
    input.validate().map_err(ApiError::validation)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Accumulator for field violations.
///
/// Checks return a usable value even on failure; callers discard it because
/// [`Violations::finish`] rejects the input as a whole.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    /// Start with no violations.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, rule: &str) {
        self.0.push(format!("{field} {rule}"));
    }

    /// Require a present, non-blank string.
    pub fn non_empty(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                self.push(field, "must not be empty");
                String::new()
            }
        }
    }

    /// Require a present, well-formed email address.
    pub fn email(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(text) if email_regex().is_match(text.trim()) => text,
            Some(text) if !text.trim().is_empty() => {
                self.push(field, "must be an email");
                text
            }
            _ => {
                self.push(field, "must not be empty");
                self.push(field, "must be an email");
                String::new()
            }
        }
    }

    /// Parse an optional integer that must be at least 1.
    pub fn positive_integer(&mut self, field: &str, raw: Option<&str>, default: u32) -> u32 {
        let Some(raw) = raw else {
            return default;
        };
        let Ok(parsed) = raw.trim().parse::<i64>() else {
            self.push(field, "must be an integer number");
            return default;
        };
        if parsed < 1 {
            self.push(field, "must not be less than 1");
            return default;
        }
        u32::try_from(parsed).unwrap_or_else(|_| {
            self.push(field, &format!("must not be greater than {}", u32::MAX));
            default
        })
    }

    /// Yield `value` when no violation was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Vec<String>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}
