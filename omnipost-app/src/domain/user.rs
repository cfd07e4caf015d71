use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;
use super::millis_floor;

const AVATAR_URL_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub handle: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation {
                field: "name",
                message: "must not be empty",
            });
        }
        let handle = normalize_handle(&self.handle)?;
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            name: name.to_string(),
            handle,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Self, DomainError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(DomainError::Validation {
                field: "email",
                message: "must not be empty",
            });
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// Public user profile, also used as the session snapshot and as the
/// author snapshot embedded in posts. Field names follow the persisted
/// camelCase layout; records written before a field existed read with its
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub email: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Inputs are expected to be already normalized via
    /// [`RegisterRequest::validate`].
    pub(crate) fn create(
        name: impl Into<String>,
        handle: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let handle = handle.into();
        Self {
            // id derived from creation time; microseconds keep back-to-back
            // registrations distinct
            id: format!("user_{}", now.timestamp_micros()),
            name: name.into(),
            avatar_url: avatar_url_for(&handle),
            handle,
            email: email.into(),
            bio: None,
            joined_at: millis_floor(now),
        }
    }
}

fn avatar_url_for(handle: &str) -> String {
    format!("{AVATAR_URL_BASE}?seed={handle}")
}

fn normalize_handle(handle: &str) -> Result<String, DomainError> {
    let handle = handle.trim().trim_start_matches('@');
    if handle.is_empty() {
        return Err(DomainError::Validation {
            field: "handle",
            message: "must not be empty",
        });
    }
    Ok(format!("@{handle}"))
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}
