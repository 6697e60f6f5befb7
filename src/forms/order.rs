use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::order::{DesignFile, NewOrder};
use crate::forms::{FormError, email_is_valid, invalid};

fn validate_customer_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < 2 {
        return Err(invalid("customer_name", "Tên phải có ít nhất 2 ký tự"));
    }
    Ok(())
}

fn validate_customer_email(email: &str) -> Result<(), ValidationError> {
    if email_is_valid(email) {
        Ok(())
    } else {
        Err(invalid("customer_email", "Email không hợp lệ"))
    }
}

/// Phones are checked with inner whitespace removed, so "090 123 4567"
/// passes as entered.
fn validate_customer_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let ok = (10..=11).contains(&digits.chars().count())
        && digits.chars().all(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(invalid("customer_phone", "Số điện thoại không hợp lệ"))
    }
}

fn validate_design_file(file: &DesignFile) -> Result<(), ValidationError> {
    if file.bytes.len() > DesignFile::MAX_BYTES {
        return Err(invalid("design_file", "File không được vượt quá 10MB"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for the public order page.
pub struct OrderForm {
    #[validate(custom(function = validate_customer_name))]
    pub customer_name: String,
    #[validate(custom(function = validate_customer_email))]
    pub customer_email: String,
    #[validate(custom(function = validate_customer_phone))]
    pub customer_phone: String,
    #[validate(required(message = "Vui lòng chọn dịch vụ"))]
    pub service_id: Option<i32>,
    #[validate(range(min = 1, message = "Số lượng phải lớn hơn 0"))]
    pub quantity: i32,
    pub size: String,
    pub material: String,
    pub notes: String,
    #[serde(skip)]
    #[validate(custom(function = validate_design_file))]
    pub design_file: Option<DesignFile>,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            service_id: None,
            quantity: 1,
            size: String::new(),
            material: String::new(),
            notes: String::new(),
            design_file: None,
        }
    }
}

impl TryFrom<&OrderForm> for NewOrder {
    type Error = FormError;

    fn try_from(form: &OrderForm) -> Result<Self, Self::Error> {
        let service_id = form.service_id.ok_or(FormError::MissingService)?;
        Ok(NewOrder::new(
            form.customer_name.clone(),
            form.customer_email.clone(),
            form.customer_phone.clone(),
            service_id,
            form.quantity,
            Some(form.size.clone()),
            Some(form.material.clone()),
            Some(form.notes.clone()),
            form.design_file.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::message_map;

    fn filled() -> OrderForm {
        OrderForm {
            customer_name: "Nguyễn Văn A".to_string(),
            customer_email: "a.nguyen@example.com".to_string(),
            customer_phone: "0901 234 567".to_string(),
            service_id: Some(3),
            quantity: 100,
            ..OrderForm::default()
        }
    }

    #[test]
    fn spaced_phone_number_passes() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn short_phone_number_is_rejected() {
        let mut form = filled();
        form.customer_phone = "09012".to_string();
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("customer_phone").map(String::as_str),
            Some("Số điện thoại không hợp lệ")
        );
    }

    #[test]
    fn missing_service_is_reported() {
        let mut form = filled();
        form.service_id = None;
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("service_id").map(String::as_str),
            Some("Vui lòng chọn dịch vụ")
        );
        assert!(matches!(
            NewOrder::try_from(&form),
            Err(FormError::MissingService)
        ));
    }

    #[test]
    fn oversized_design_file_is_rejected() {
        let mut form = filled();
        form.design_file = Some(DesignFile {
            filename: "logo.ai".to_string(),
            bytes: vec![0; DesignFile::MAX_BYTES + 1],
        });
        let map = message_map(&form.validate().unwrap_err());
        assert_eq!(
            map.get("design_file").map(String::as_str),
            Some("File không được vượt quá 10MB")
        );
    }

    #[test]
    fn conversion_drops_blank_optionals() {
        let order = NewOrder::try_from(&filled()).unwrap();
        assert_eq!(order.size, None);
        assert_eq!(order.material, None);
        assert_eq!(order.notes, None);
        assert_eq!(order.quantity, 100);
    }
}
