use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default = "ContactMessage::default_status")]
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl ContactMessage {
    fn default_status() -> String {
        "new".to_string()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl NewContact {
    #[must_use]
    pub fn new(name: String, email: String, phone: String, subject: String, message: String) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        }
    }
}

/// Acknowledgement returned when a contact request is accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactReceipt {
    pub id: i32,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed_on_construction() {
        let contact = NewContact::new(
            " Lê Thị Hoa ".to_string(),
            "hoa@example.com".to_string(),
            " 0281234567 ".to_string(),
            "  Báo giá  ".to_string(),
            " Cần in 500 catalogue ".to_string(),
        );
        assert_eq!(contact.name, "Lê Thị Hoa");
        assert_eq!(contact.phone, "0281234567");
        assert_eq!(contact.subject, "Báo giá");
        assert_eq!(contact.message, "Cần in 500 catalogue");
    }

    #[test]
    fn stored_messages_default_to_new_status() {
        let json = "{\"id\":1,\"name\":\"Hoa\",\"email\":\"hoa@example.com\",\
                    \"phone\":\"0281234567\",\"subject\":\"Báo giá\",\
                    \"message\":\"Cần in 500 catalogue\",\
                    \"created_at\":\"2024-05-02T09:30:00\"}";
        let message: ContactMessage = serde_json::from_str(json).expect("deserialize");
        assert_eq!(message.status, "new");
    }
}
