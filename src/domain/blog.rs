use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Blog {
    /// Estimated reading time in minutes at 200 words per minute,
    /// ignoring HTML markup, never below one minute.
    pub fn reading_minutes(&self) -> usize {
        reading_minutes(&self.content)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
}

impl NewBlog {
    /// Trims the short text fields; the post body is kept verbatim.
    #[must_use]
    pub fn new(
        title: String,
        content: String,
        image_url: Option<String>,
        category: Option<String>,
        is_active: bool,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            content,
            image_url: image_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_active,
        }
    }
}

/// Partial update payload; `None` fields are left untouched by the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateBlog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// The blog categories the storefront promotes. Posts may carry any
/// category string; the known ones get curated Vietnamese labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlogTopic {
    Offset,
    Design,
    Marketing,
    Trends,
    Insights,
    Other(String),
}

impl BlogTopic {
    pub const PROMOTED: [BlogTopic; 5] = [
        BlogTopic::Offset,
        BlogTopic::Design,
        BlogTopic::Marketing,
        BlogTopic::Trends,
        BlogTopic::Insights,
    ];

    /// Slug used on the wire and in query parameters.
    pub fn slug(&self) -> &str {
        match self {
            BlogTopic::Offset => "in-offset",
            BlogTopic::Design => "thiet-ke",
            BlogTopic::Marketing => "meo-marketing",
            BlogTopic::Trends => "xu-huong",
            BlogTopic::Insights => "kien-thuc",
            BlogTopic::Other(s) => s,
        }
    }

    /// Vietnamese display label.
    pub fn label(&self) -> &str {
        match self {
            BlogTopic::Offset => "In Offset",
            BlogTopic::Design => "Thiết kế",
            BlogTopic::Marketing => "Mẹo Marketing",
            BlogTopic::Trends => "Xu hướng",
            BlogTopic::Insights => "Kiến thức",
            BlogTopic::Other(s) => s,
        }
    }
}

impl Display for BlogTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl From<&str> for BlogTopic {
    fn from(s: &str) -> Self {
        match s {
            "in-offset" => BlogTopic::Offset,
            "thiet-ke" => BlogTopic::Design,
            "meo-marketing" => BlogTopic::Marketing,
            "xu-huong" => BlogTopic::Trends,
            "kien-thuc" => BlogTopic::Insights,
            _ => BlogTopic::Other(s.to_string()),
        }
    }
}

impl From<String> for BlogTopic {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl Serialize for BlogTopic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for BlogTopic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(D::Error::custom("empty blog topic"));
        }
        Ok(s.into())
    }
}

/// Sort orders offered by the public blog feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlogSort {
    #[default]
    Newest,
    Oldest,
    Title,
    Popular,
    ReadingTime,
}

/// Stable in-place sort of a feed page.
pub fn sort_blogs(blogs: &mut [Blog], sort: BlogSort) {
    match sort {
        BlogSort::Newest => blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        BlogSort::Oldest => blogs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        BlogSort::Title => {
            blogs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        // Without per-post view counters from the server, popularity
        // falls back to recency.
        BlogSort::Popular => blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        BlogSort::ReadingTime => blogs.sort_by_key(|b| b.reading_minutes()),
    }
}

/// Word count of `content` with HTML tags removed, at 200 wpm.
pub fn reading_minutes(content: &str) -> usize {
    let mut stripped = String::with_capacity(content.len());
    let mut in_tag = false;
    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tag boundaries separate words.
                stripped.push(' ');
            }
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    let words = stripped.split_whitespace().count();
    words.div_ceil(200).max(1)
}
