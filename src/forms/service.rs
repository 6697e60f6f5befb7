use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::service::{NewService, Service, UpdateService};
use crate::forms::{invalid, url_is_well_formed};

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("name_required", "Tên dịch vụ là bắt buộc"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(invalid("description_required", "Mô tả dịch vụ là bắt buộc"));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(invalid("category_required", "Danh mục là bắt buộc"));
    }
    Ok(())
}

/// Empty is fine; services without a cover image are allowed.
fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() || url_is_well_formed(url) {
        Ok(())
    } else {
        Err(invalid("image_url", "URL hình ảnh không hợp lệ"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for creating or editing a printing service.
///
/// The create and edit endpoints ignore the featured flag; it only changes
/// through the dedicated toggle, so the conversions below leave it out.
pub struct ServiceForm {
    #[validate(custom(function = validate_name))]
    pub name: String,
    #[validate(custom(function = validate_description))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Giá dịch vụ không hợp lệ"))]
    pub price: f64,
    #[validate(custom(function = validate_image_url))]
    pub image_url: String,
    #[validate(custom(function = validate_category))]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    pub is_active: bool,
}

impl Default for ServiceForm {
    /// New services start out active, matching the create dialog.
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image_url: String::new(),
            category: String::new(),
            featured: false,
            is_active: true,
        }
    }
}

impl From<&Service> for ServiceForm {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price,
            image_url: service.image_url.clone().unwrap_or_default(),
            category: service.category.clone().unwrap_or_default(),
            featured: service.featured,
            is_active: service.is_active,
        }
    }
}

impl From<&ServiceForm> for NewService {
    fn from(form: &ServiceForm) -> Self {
        NewService::new(
            form.name.clone(),
            form.description.clone(),
            form.price,
            Some(form.image_url.clone()),
            Some(form.category.clone()),
            form.is_active,
        )
    }
}

impl From<&ServiceForm> for UpdateService {
    fn from(form: &ServiceForm) -> Self {
        // Blank image and category fields are sent as empty strings so that
        // saving the edit dialog can clear them on the server.
        UpdateService {
            name: Some(form.name.trim().to_string()),
            description: Some(form.description.clone()),
            price: Some(form.price),
            image_url: Some(form.image_url.trim().to_string()),
            category: Some(form.category.trim().to_string()),
            is_active: Some(form.is_active),
            featured: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ServiceForm {
        ServiceForm {
            name: "In catalogue".to_string(),
            description: "In catalogue số lượng lớn".to_string(),
            price: 250_000.0,
            image_url: String::new(),
            category: "in-offset".to_string(),
            featured: false,
            is_active: true,
        }
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let errors = ServiceForm::default().validate().unwrap_err();
        let map = crate::forms::message_map(&errors);
        assert_eq!(
            map.get("name").map(String::as_str),
            Some("Tên dịch vụ là bắt buộc")
        );
        assert_eq!(
            map.get("description").map(String::as_str),
            Some("Mô tả dịch vụ là bắt buộc")
        );
        assert_eq!(
            map.get("category").map(String::as_str),
            Some("Danh mục là bắt buộc")
        );
        assert!(map.get("price").is_none());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = filled();
        form.price = -1.0;
        let errors = form.validate().unwrap_err();
        let map = crate::forms::message_map(&errors);
        assert_eq!(
            map.get("price").map(String::as_str),
            Some("Giá dịch vụ không hợp lệ")
        );

        form.price = 0.0;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn create_payload_drops_blank_optionals_and_featured() {
        let form = ServiceForm {
            name: "  In catalogue  ".to_string(),
            featured: true,
            ..filled()
        };
        assert!(form.validate().is_ok());

        let payload = NewService::from(&form);
        assert_eq!(payload.name, "In catalogue");
        assert_eq!(payload.image_url, None);
        assert!(!payload.featured);
    }

    #[test]
    fn update_payload_never_touches_featured() {
        let form = ServiceForm {
            featured: true,
            ..filled()
        };
        let update = UpdateService::from(&form);
        assert_eq!(update.featured, None);
        assert_eq!(update.is_active, Some(true));

        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("featured").is_none());
    }
}
