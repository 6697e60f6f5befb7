//! Wire shapes shared by the list endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::pagination::TotalCount;

/// The three list payload shapes the server is known to send.
///
/// Orders come back as `{"items": [...], "total": n}`; blogs, services,
/// users and images arrive as a bare JSON array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Counted { items: Vec<T>, total: usize },
    Tagged { data: Vec<T>, total: Option<usize> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Splits the envelope into rows plus the best total we can claim for the
    /// page that produced it.
    #[must_use]
    pub fn into_parts(self, page: usize, limit: usize) -> (Vec<T>, TotalCount) {
        match self {
            ListEnvelope::Counted { items, total } => (items, TotalCount::Exact(total)),
            ListEnvelope::Tagged { data, total } => {
                let total = total
                    .map(TotalCount::Exact)
                    .unwrap_or_else(|| TotalCount::from_page(page, limit, data.len()));
                (data, total)
            }
            ListEnvelope::Bare(items) => {
                let total = TotalCount::from_page(page, limit, items.len());
                (items, total)
            }
        }
    }
}

/// Error body shape used by the remote API.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the server sent one.
    ///
    /// Validation failures arrive as structured arrays; those are not worth
    /// surfacing verbatim, so only plain string details count.
    #[must_use]
    pub fn detail_string(&self) -> Option<String> {
        match &self.detail {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_envelope_reports_an_exact_total() {
        let envelope: ListEnvelope<i32> =
            serde_json::from_str("{\"items\":[1,2,3],\"total\":40}").expect("deserialize");
        let (rows, total) = envelope.into_parts(1, 12);
        assert_eq!(rows, vec![1, 2, 3]);
        assert_eq!(total, TotalCount::Exact(40));
    }

    #[test]
    fn bare_array_total_is_inferred_from_page_shape() {
        let envelope: ListEnvelope<i32> =
            serde_json::from_str("[1,2,3,4,5,6,7,8,9,10]").expect("deserialize");
        let (rows, total) = envelope.into_parts(2, 10);
        assert_eq!(rows.len(), 10);
        assert_eq!(total, TotalCount::AtLeast(21));
    }

    #[test]
    fn tagged_envelope_without_total_falls_back_to_inference() {
        let envelope: ListEnvelope<i32> =
            serde_json::from_str("{\"data\":[1,2]}").expect("deserialize");
        let (rows, total) = envelope.into_parts(3, 10);
        assert_eq!(rows, vec![1, 2]);
        assert_eq!(total, TotalCount::Exact(22));
    }

    #[test]
    fn only_string_details_are_surfaced() {
        let plain: ErrorBody =
            serde_json::from_str("{\"detail\":\"Không tìm thấy đơn hàng\"}").expect("deserialize");
        assert_eq!(plain.detail_string().as_deref(), Some("Không tìm thấy đơn hàng"));

        let structured: ErrorBody =
            serde_json::from_str("{\"detail\":[{\"loc\":[\"body\",\"title\"]}]}")
                .expect("deserialize");
        assert_eq!(structured.detail_string(), None);

        let empty: ErrorBody = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(empty.detail_string(), None);
    }
}
