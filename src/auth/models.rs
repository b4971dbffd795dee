//! Authentication request and response models

use crate::api::string_or_number;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Login credentials
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Identity fields returned by a successful login
#[derive(Debug, Deserialize)]
pub struct LoginData {
    /// Opaque bearer token
    #[serde(default)]
    pub access: String,

    /// Refresh token, present in the response but unused by this client
    #[serde(default)]
    pub refresh: Option<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,

    pub username: String,
}

/// Registration form, matching the backend serializer's field set
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub school: String,
    pub subject: String,
    /// Path or reference to the supporting audit material
    pub audit_material: String,
}

impl RegisterRequest {
    /// Client-side validation mirroring the backend rules
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::InvalidInput("username cannot be empty".to_string()));
        }
        if self.password.len() < super::MIN_PASSWORD_LENGTH {
            return Err(Error::InvalidInput(format!(
                "password must be at least {} characters",
                super::MIN_PASSWORD_LENGTH
            )));
        }
        if self.password != self.password_confirm {
            return Err(Error::InvalidInput("passwords do not match".to_string()));
        }
        Ok(())
    }
}

/// Registration acknowledgement
#[derive(Debug, Deserialize)]
pub struct RegisterData {
    pub username: String,
}
