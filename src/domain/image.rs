use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageAsset {
    pub id: i32,
    pub filename: String,
    #[serde(default)]
    pub file_path: Option<String>,
    pub alt_text: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    pub is_visible: bool,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ImageAsset {
    /// Absolute URL for display; the server stores uploads under an
    /// origin-relative path, older rows only carry a filename.
    #[must_use]
    pub fn full_url(&self, origin: &str) -> String {
        let origin = origin.trim_end_matches('/');
        match &self.file_path {
            Some(path) => format!("{}/{}", origin, path.trim_start_matches('/')),
            None => format!("{}/uploads/{}", origin, self.filename),
        }
    }
}

/// Multipart upload payload for the image library.
#[derive(Clone, Debug, PartialEq)]
pub struct NewImage {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub alt_text: Option<String>,
    pub category: Option<String>,
    pub is_visible: bool,
}

impl NewImage {
    #[must_use]
    pub fn new(
        filename: String,
        bytes: Vec<u8>,
        alt_text: Option<String>,
        category: Option<String>,
        is_visible: bool,
    ) -> Self {
        Self {
            filename: filename.trim().to_string(),
            bytes,
            alt_text: alt_text
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_visible,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn asset(file_path: Option<&str>) -> ImageAsset {
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        ImageAsset {
            id: 7,
            filename: "banner.png".to_string(),
            file_path: file_path.map(str::to_string),
            alt_text: None,
            file_size: Some(20_480),
            mime_type: Some("image/png".to_string()),
            width: Some(1280),
            height: Some(480),
            is_visible: true,
            category: Some("banner".to_string()),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn stored_paths_are_joined_to_the_origin() {
        let image = asset(Some("/static/images/uploads/banner.png"));
        assert_eq!(
            image.full_url("https://phulong.vn/"),
            "https://phulong.vn/static/images/uploads/banner.png"
        );
    }

    #[test]
    fn missing_paths_fall_back_to_the_uploads_folder() {
        let image = asset(None);
        assert_eq!(
            image.full_url("https://phulong.vn"),
            "https://phulong.vn/uploads/banner.png"
        );
    }
}
