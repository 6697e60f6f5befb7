use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::forms::{invalid, url_is_well_formed};

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(invalid("title_required", "Tiêu đề là bắt buộc"));
    }
    if title.chars().count() < 5 {
        return Err(invalid("title_short", "Tiêu đề phải có ít nhất 5 ký tự"));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(invalid("content_required", "Nội dung là bắt buộc"));
    }
    if content.chars().count() < 50 {
        return Err(invalid("content_short", "Nội dung phải có ít nhất 50 ký tự"));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(invalid("category_required", "Danh mục là bắt buộc"));
    }
    Ok(())
}

/// Empty is fine; posts without a cover image are allowed.
fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() || url_is_well_formed(url) {
        Ok(())
    } else {
        Err(invalid("image_url", "URL hình ảnh không hợp lệ"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for creating or editing a blog post.
pub struct BlogForm {
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[validate(custom(function = validate_content))]
    pub content: String,
    #[validate(custom(function = validate_image_url))]
    pub image_url: String,
    #[validate(custom(function = validate_category))]
    pub category: String,
    pub is_active: bool,
}

impl Default for BlogForm {
    /// New posts start out published, matching the create dialog.
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            category: String::new(),
            is_active: true,
        }
    }
}

impl From<&Blog> for BlogForm {
    /// Prefills the form from an existing post for the edit dialog.
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            content: blog.content.clone(),
            image_url: blog.image_url.clone().unwrap_or_default(),
            category: blog.category.clone().unwrap_or_default(),
            is_active: blog.is_active,
        }
    }
}

impl From<&BlogForm> for NewBlog {
    fn from(form: &BlogForm) -> Self {
        NewBlog::new(
            form.title.clone(),
            form.content.clone(),
            Some(form.image_url.clone()),
            Some(form.category.clone()),
            form.is_active,
        )
    }
}

impl From<&BlogForm> for UpdateBlog {
    fn from(form: &BlogForm) -> Self {
        let new_blog = NewBlog::from(form);
        UpdateBlog {
            title: Some(new_blog.title),
            content: Some(new_blog.content),
            image_url: new_blog.image_url,
            category: new_blog.category,
            is_active: Some(form.is_active),
        }
    }
}
