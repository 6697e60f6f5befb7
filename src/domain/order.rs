use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::domain::service::Service;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub quantity: i32,
    pub size: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
    pub design_file_url: Option<String>,
    pub total_price: Option<f64>,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub service: Option<Service>,
}

impl Order {
    /// Name of the ordered service, if the join survived deletion.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().map(|service| service.name.as_str())
    }
}

/// Order lifecycle stage as the server stores it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    /// Customer-facing label shown in status badges and selects.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Chờ xử lý",
            OrderStatus::Processing => "Đang xử lý",
            OrderStatus::Completed => "Hoàn thành",
            OrderStatus::Cancelled => "Đã hủy",
            OrderStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => OrderStatus::Pending,
            "processing" => OrderStatus::Processing,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = OrderStatus;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an order status string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(OrderStatus::from(value))
            }
        }

        deserializer.deserialize_str(StatusVisitor)
    }
}

/// Uploaded design attachment carried alongside a public order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DesignFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DesignFile {
    pub const MAX_BYTES: usize = 10 * 1024 * 1024;
}

/// Payload for the public order endpoint; sent as multipart form data.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub quantity: i32,
    pub size: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
    pub design_file: Option<DesignFile>,
}

impl NewOrder {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_name: String,
        customer_email: String,
        customer_phone: String,
        service_id: i32,
        quantity: i32,
        size: Option<String>,
        material: Option<String>,
        notes: Option<String>,
        design_file: Option<DesignFile>,
    ) -> Self {
        Self {
            customer_name: customer_name.trim().to_string(),
            customer_email: customer_email.trim().to_string(),
            customer_phone: customer_phone.trim().to_string(),
            service_id,
            quantity,
            size: size.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            material: material
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            design_file,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Counts computed over the rows currently loaded, not the whole table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total_revenue: f64,
}

impl OrderStats {
    #[must_use]
    pub fn from_rows(rows: &[Order]) -> Self {
        let mut stats = Self {
            total_orders: rows.len(),
            ..Self::default()
        };
        for order in rows {
            stats.total_revenue += order.total_price.unwrap_or(0.0);
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Completed => stats.completed += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
                OrderStatus::Other(_) => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(id: i32, status: OrderStatus) -> Order {
        let stamp = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Order {
            id,
            customer_name: "Trần Văn An".to_string(),
            customer_email: "an@example.com".to_string(),
            customer_phone: "0901234567".to_string(),
            service_id: 1,
            quantity: 100,
            size: None,
            material: None,
            notes: None,
            design_file_url: None,
            total_price: None,
            status,
            created_at: stamp,
            updated_at: stamp,
            service: None,
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in OrderStatus::KNOWN {
            assert_eq!(OrderStatus::from(status.as_str()), status);
        }
        assert_eq!(
            OrderStatus::from("archived"),
            OrderStatus::Other("archived".to_string())
        );
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderStatus::Processing).expect("serialize");
        assert_eq!(json, "\"processing\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn stats_count_only_loaded_rows() {
        let mut paid = order(3, OrderStatus::Completed);
        paid.total_price = Some(250_000.0);
        let rows = vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Pending),
            paid,
            order(4, OrderStatus::Cancelled),
            order(5, OrderStatus::Other("archived".to_string())),
        ];
        let stats = OrderStats::from_rows(&rows);
        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.processing, 0);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total_revenue, 250_000.0);
    }

    #[test]
    fn new_order_trims_and_drops_blank_extras() {
        let new = NewOrder::new(
            " Trần Văn An ".to_string(),
            " an@example.com ".to_string(),
            " 0901234567 ".to_string(),
            3,
            50,
            Some("  ".to_string()),
            None,
            Some(" in gấp ".to_string()),
            None,
        );
        assert_eq!(new.customer_name, "Trần Văn An");
        assert_eq!(new.customer_email, "an@example.com");
        assert_eq!(new.customer_phone, "0901234567");
        assert_eq!(new.size, None);
        assert_eq!(new.notes.as_deref(), Some("in gấp"));
    }
}
