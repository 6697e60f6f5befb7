use serde::{Deserialize, Serialize};

use crate::domain::user::User;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: String, password: String) -> Self {
        Self {
            username: username.trim().to_string(),
            password,
        }
    }
}

/// Bearer token issued by `/auth/login-json`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default = "AuthToken::default_token_type")]
    pub token_type: String,
}

impl AuthToken {
    fn default_token_type() -> String {
        "bearer".to_string()
    }
}

/// Token plus the profile fetched right after login.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user: User,
}
