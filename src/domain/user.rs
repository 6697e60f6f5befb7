use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.role == UserRole::Root
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UserRole {
    Root,
    Admin,
    Other(String),
}

impl UserRole {
    pub const ASSIGNABLE: [UserRole; 2] = [UserRole::Admin, UserRole::Root];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Root => "root",
            UserRole::Admin => "admin",
            UserRole::Other(value) => value,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "root" => UserRole::Root,
            "admin" => UserRole::Admin,
            other => UserRole::Other(other.to_string()),
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleVisitor;

        impl Visitor<'_> for RoleVisitor {
            type Value = UserRole;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a user role string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(UserRole::from(value))
            }
        }

        deserializer.deserialize_str(RoleVisitor)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl NewUser {
    #[must_use]
    pub fn new(username: String, email: String, password: String, role: UserRole) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password,
            role,
        }
    }
}

/// Partial update; an unset password keeps the current one.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(UserRole::from("root"), UserRole::Root);
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(
            UserRole::from("viewer"),
            UserRole::Other("viewer".to_string())
        );
        assert_eq!(UserRole::Root.to_string(), "root");
    }

    #[test]
    fn update_without_password_serializes_no_password_key() {
        let update = UpdateUser {
            email: Some("an@phulong.vn".to_string()),
            ..UpdateUser::default()
        };
        let json = serde_json::to_string(&update).expect("serialize");
        assert_eq!(json, "{\"email\":\"an@phulong.vn\"}");
    }
}
