use serde::Deserialize;

use crate::auth::{dto::is_valid_email, repo_types::UserPatch};

/// Body of `PATCH /users`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl EditUserDto {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err("email must be an email".into());
            }
        }
        Ok(())
    }
}

impl From<EditUserDto> for UserPatch {
    fn from(dto: EditUserDto) -> Self {
        Self {
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}
