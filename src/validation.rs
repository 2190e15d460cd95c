//! Form-level input checks shared by the auth, profile and contact services.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_SUBJECT_LEN: usize = 5;
pub const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("Invalid regex"));

/// Every way user input can be turned away. All of them are recoverable by
/// correcting the input and retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Terms of service must be accepted")]
    TermsNotAccepted,

    #[error("Email is already taken")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    #[error("Coupon code is required")]
    EmptyCouponCode,

    #[error("Unknown coupon code {0}")]
    UnknownCoupon(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Subject must be at least 5 characters")]
    SubjectTooShort,

    #[error("Message must be at least 10 characters")]
    MessageTooShort,

    #[error("Invalid price range {0}")]
    InvalidPriceBucket(String),

    #[error("Unknown category {0}")]
    UnknownCategory(String),

    #[error("Unknown product status {0}")]
    UnknownStatus(String),

    #[error("Unknown order status {0}")]
    UnknownOrderStatus(String),

    #[error("Search keyword is required")]
    EmptyKeyword,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Whitespace is ignored, so `"0901 234 567"` is accepted.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if PHONE_RE.is_match(&digits) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.trim().chars().count() < MIN_SUBJECT_LEN {
        return Err(ValidationError::SubjectTooShort);
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().chars().count() < MIN_MESSAGE_LEN {
        return Err(ValidationError::MessageTooShort);
    }
    Ok(())
}
