//! Signup validation and email handling.

use thiserror::Error;

use crate::models::account::SignupRequest;

pub const NAME_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 15;

/// Reasons a signup is turned away. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Name must be at most 100 characters.")]
    NameTooLong,

    #[error("Phone number must be at most 15 characters.")]
    PhoneTooLong,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Email is already registered. Proceed to Login.")]
    EmailTaken,

    #[error("Phone number is already registered.")]
    PhoneTaken,
}

/// A signup form that passed the field checks. Uniqueness is checked
/// against the store separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(self) -> Result<ValidSignup, SignupError> {
        let (Some(name), Some(email), Some(phone), Some(password), Some(confirm)) = (
            non_empty(self.name),
            non_empty(self.email),
            non_empty(self.phone),
            non_empty(self.password),
            non_empty(self.confirm_password),
        ) else {
            return Err(SignupError::MissingFields);
        };

        if name.chars().count() > NAME_MAX_LEN {
            return Err(SignupError::NameTooLong);
        }
        if phone.chars().count() > PHONE_MAX_LEN {
            return Err(SignupError::PhoneTooLong);
        }
        if password != confirm {
            return Err(SignupError::PasswordMismatch);
        }

        Ok(ValidSignup {
            name,
            email: normalize_email(&email),
            phone,
            password,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Lower-cases the domain part of an address, leaving the local part alone.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
