use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::contact::NewContact;
use crate::forms::{email_is_valid, invalid};

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("name_required", "Vui lòng nhập họ tên"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(invalid("email_required", "Vui lòng nhập email"));
    }
    if !email_is_valid(email) {
        return Err(invalid("email_format", "Email không hợp lệ"));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(invalid("phone_required", "Vui lòng nhập số điện thoại"));
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.trim().is_empty() {
        return Err(invalid("subject_required", "Vui lòng nhập tiêu đề"));
    }
    Ok(())
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(invalid("message_required", "Vui lòng nhập nội dung"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for the public contact page.
pub struct ContactForm {
    #[validate(custom(function = validate_name))]
    pub name: String,
    #[validate(custom(function = validate_email))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(custom(function = validate_subject))]
    pub subject: String,
    #[validate(custom(function = validate_message))]
    pub message: String,
}

impl From<&ContactForm> for NewContact {
    fn from(form: &ContactForm) -> Self {
        NewContact::new(
            form.name.clone(),
            form.email.clone(),
            form.phone.clone(),
            form.subject.clone(),
            form.message.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::message_map;

    #[test]
    fn every_field_is_required() {
        let map = message_map(&ContactForm::default().validate().unwrap_err());
        assert_eq!(map.get("name").map(String::as_str), Some("Vui lòng nhập họ tên"));
        assert_eq!(map.get("email").map(String::as_str), Some("Vui lòng nhập email"));
        assert_eq!(
            map.get("phone").map(String::as_str),
            Some("Vui lòng nhập số điện thoại")
        );
        assert_eq!(
            map.get("subject").map(String::as_str),
            Some("Vui lòng nhập tiêu đề")
        );
        assert_eq!(
            map.get("message").map(String::as_str),
            Some("Vui lòng nhập nội dung")
        );
    }

    #[test]
    fn bad_address_gets_the_format_message() {
        let form = ContactForm {
            name: "Trần Thị B".to_string(),
            email: "tran.b@".to_string(),
            phone: "0901234567".to_string(),
            subject: "Báo giá in tờ rơi".to_string(),
            message: "Cần báo giá 5000 tờ A5.".to_string(),
        };
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(map.get("email").map(String::as_str), Some("Email không hợp lệ"));
    }

    #[test]
    fn conversion_trims_whitespace() {
        let form = ContactForm {
            name: "  Trần Thị B  ".to_string(),
            email: " tran.b@example.com ".to_string(),
            phone: " 0901234567 ".to_string(),
            subject: " Báo giá ".to_string(),
            message: " Cần báo giá gấp. ".to_string(),
        };
        let payload = NewContact::from(&form);
        assert_eq!(payload.name, "Trần Thị B");
        assert_eq!(payload.email, "tran.b@example.com");
    }
}
