use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::service::NewServiceReview;
use crate::forms::invalid;

fn validate_review_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(invalid("content_required", "Vui lòng nhập nội dung đánh giá"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for reviewing a service on its detail page.
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "Đánh giá phải từ 1 đến 5 sao"))]
    pub rating: u8,
    #[validate(custom(function = validate_review_content))]
    pub content: String,
    pub author_name: String,
    pub is_anonymous: bool,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            rating: 5,
            content: String::new(),
            author_name: String::new(),
            is_anonymous: false,
        }
    }
}

impl From<&ReviewForm> for NewServiceReview {
    fn from(form: &ReviewForm) -> Self {
        NewServiceReview::new(
            Some(form.author_name.clone()),
            form.is_anonymous,
            form.rating,
            form.content.trim().to_string(),
        )
    }
}
