use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
}

impl NewService {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        price: f64,
        image_url: Option<String>,
        category: Option<String>,
        is_active: bool,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description,
            price,
            image_url: image_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_active,
            featured: false,
        }
    }
}

/// Partial update payload; `None` fields are left untouched by the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceReview {
    pub id: i32,
    pub rating: u8,
    pub content: String,
    pub author_name: Option<String>,
    pub is_anonymous: bool,
    pub created_at: NaiveDateTime,
}

/// Everything the public detail page shows for one service.
#[derive(Clone, Debug)]
pub struct ServiceDetail {
    pub service: Service,
    pub reviews: Vec<ServiceReview>,
    pub suggested: Vec<Service>,
}

impl ServiceDetail {
    /// Mean review rating, `0.0` while nothing has been reviewed.
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self
            .reviews
            .iter()
            .map(|review| u32::from(review.rating))
            .sum();
        f64::from(sum) / self.reviews.len() as f64
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewServiceReview {
    pub author_name: Option<String>,
    pub is_anonymous: bool,
    pub rating: u8,
    pub content: String,
}

impl NewServiceReview {
    /// Anonymous reviews never carry an author name.
    #[must_use]
    pub fn new(author_name: Option<String>, is_anonymous: bool, rating: u8, content: String) -> Self {
        Self {
            author_name: if is_anonymous {
                None
            } else {
                author_name
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            },
            is_anonymous,
            rating,
            content,
        }
    }
}
