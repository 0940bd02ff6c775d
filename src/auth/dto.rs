use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo_types::UserRecord;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for signup and signin.
///
/// Missing fields deserialize as empty strings so that [`AuthDto::validate`]
/// can report them uniformly.
#[derive(Debug, Deserialize)]
pub struct AuthDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl AuthDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() {
            return Err("email should not be empty".into());
        }
        if !is_valid_email(&self.email) {
            return Err("email must be an email".into());
        }
        if self.password.is_empty() {
            return Err("password should not be empty".into());
        }
        Ok(())
    }
}

/// Public part of the user returned to the client. Has no hash field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<UserRecord> for PublicUser {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
