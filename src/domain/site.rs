use serde::{Deserialize, Serialize};

/// Public site settings served by `/config/env`.
///
/// The server publishes SCREAMING_SNAKE keys; missing keys fall back to the
/// values it would have sent anyway so callers can render without guards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SiteEnv {
    #[serde(rename = "API_URL", default = "SiteEnv::default_api_url")]
    pub api_url: String,
    #[serde(rename = "SITE_NAME", default = "SiteEnv::default_site_name")]
    pub site_name: String,
    #[serde(rename = "SITE_DESCRIPTION", default = "SiteEnv::default_site_description")]
    pub site_description: String,
    #[serde(rename = "CONTACT_EMAIL", default)]
    pub contact_email: String,
    #[serde(rename = "CONTACT_PHONE", default = "SiteEnv::default_contact_phone")]
    pub contact_phone: String,
    #[serde(rename = "CONTACT_ADDRESS", default = "SiteEnv::default_contact_address")]
    pub contact_address: String,
    #[serde(rename = "ITEMS_PER_PAGE", default = "SiteEnv::default_items_per_page")]
    pub items_per_page: usize,
    #[serde(rename = "ENABLE_ANALYTICS", default)]
    pub enable_analytics: bool,
}

impl SiteEnv {
    fn default_api_url() -> String {
        "/api".to_string()
    }

    fn default_site_name() -> String {
        "Phú Long In Ấn".to_string()
    }

    fn default_site_description() -> String {
        "Dịch vụ in ấn chất lượng cao".to_string()
    }

    fn default_contact_phone() -> String {
        "0123456789".to_string()
    }

    fn default_contact_address() -> String {
        "123 Đường ABC, Quận XYZ, TP. Hồ Chí Minh".to_string()
    }

    fn default_items_per_page() -> usize {
        10
    }
}

impl Default for SiteEnv {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            site_name: Self::default_site_name(),
            site_description: Self::default_site_description(),
            contact_email: String::new(),
            contact_phone: Self::default_contact_phone(),
            contact_address: Self::default_contact_address(),
            items_per_page: Self::default_items_per_page(),
            enable_analytics: false,
        }
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub new_orders: i64,
    pub services: i64,
    pub customers: i64,
    pub revenue: i64,
}

/// Label/value pairs for a single dashboard chart.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
