use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::forms::{email_is_valid, invalid};

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(invalid("username_required", "Tên đăng nhập là bắt buộc"));
    }
    if username.chars().count() < 3 {
        return Err(invalid(
            "username_short",
            "Tên đăng nhập phải có ít nhất 3 ký tự",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(invalid(
            "username_charset",
            "Tên đăng nhập chỉ được chứa chữ cái, số và dấu gạch dưới",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(invalid("email_required", "Email là bắt buộc"));
    }
    if !email_is_valid(email) {
        return Err(invalid("email_format", "Email không hợp lệ"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(invalid("password_required", "Mật khẩu là bắt buộc"));
    }
    if password.chars().count() < 6 {
        return Err(invalid("password_short", "Mật khẩu phải có ít nhất 6 ký tự"));
    }
    Ok(())
}

/// Editing keeps the current password when the field is left blank.
fn validate_optional_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Ok(());
    }
    validate_password(password)
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if UserRole::ASSIGNABLE.iter().any(|r| r.as_str() == role) {
        Ok(())
    } else {
        Err(invalid("role", "Vai trò không hợp lệ"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for creating an admin account.
pub struct CreateUserForm {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(custom(function = validate_email))]
    pub email: String,
    #[validate(custom(function = validate_password))]
    pub password: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
}

impl Default for CreateUserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: UserRole::Admin.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for editing an admin account.
pub struct EditUserForm {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(custom(function = validate_email))]
    pub email: String,
    /// Blank keeps the current password.
    #[validate(custom(function = validate_optional_password))]
    pub password: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
    pub is_active: bool,
}

impl From<&User> for EditUserForm {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
        }
    }
}

impl From<&CreateUserForm> for NewUser {
    fn from(form: &CreateUserForm) -> Self {
        NewUser::new(
            form.username.clone(),
            form.email.clone(),
            form.password.clone(),
            UserRole::from(form.role.as_str()),
        )
    }
}

impl From<&EditUserForm> for UpdateUser {
    fn from(form: &EditUserForm) -> Self {
        UpdateUser {
            username: Some(form.username.trim().to_string()),
            email: Some(form.email.trim().to_string()),
            password: (!form.password.is_empty()).then(|| form.password.clone()),
            role: Some(UserRole::from(form.role.as_str())),
            is_active: Some(form.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::message_map;

    fn create_form() -> CreateUserForm {
        CreateUserForm {
            username: "thanh_vo".to_string(),
            email: "thanh@phulong.vn".to_string(),
            password: "motsaumot".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn username_messages_escalate() {
        let mut form = create_form();

        form.username = "ab".to_string();
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("username").map(String::as_str),
            Some("Tên đăng nhập phải có ít nhất 3 ký tự")
        );

        form.username = "thanh vo".to_string();
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("username").map(String::as_str),
            Some("Tên đăng nhập chỉ được chứa chữ cái, số và dấu gạch dưới")
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut form = create_form();
        form.role = "moderator".to_string();
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("role").map(String::as_str),
            Some("Vai trò không hợp lệ")
        );
    }

    #[test]
    fn blank_password_only_allowed_when_editing() {
        let mut create = create_form();
        create.password = String::new();
        let map = message_map(&create.validate().unwrap_err());
        assert_eq!(
            map.get("password").map(String::as_str),
            Some("Mật khẩu là bắt buộc")
        );

        let edit = EditUserForm {
            username: "thanh_vo".to_string(),
            email: "thanh@phulong.vn".to_string(),
            password: String::new(),
            role: "root".to_string(),
            is_active: true,
        };
        assert!(edit.validate().is_ok());
        assert_eq!(UpdateUser::from(&edit).password, None);
    }
}
