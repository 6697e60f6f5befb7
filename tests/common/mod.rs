//! Shared bootstrap for the wiremock integration tests.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phulong_client::config::ClientConfig;
use phulong_client::domain::auth::Credentials;
use phulong_client::repository::Authenticator;
use phulong_client::repository::http::HttpRepository;

pub const TOKEN: &str = "jwt-chu-tiem";

/// A mock API server plus a repository pointed at it through the usual
/// `/api` prefix.
pub struct TestApi {
    pub server: MockServer,
    pub repo: HttpRepository,
}

impl TestApi {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig {
            base_url: server.uri(),
            context_path: "/api".to_string(),
            ..ClientConfig::default()
        };
        let repo = HttpRepository::new(&config).expect("build repository");
        Self { server, repo }
    }
}

/// Mounts the login endpoint and signs the repository in, so later calls
/// carry `Bearer` [`TOKEN`].
pub async fn sign_in(api: &TestApi) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "bearer",
        })))
        .mount(&api.server)
        .await;

    api.repo
        .login(&Credentials::new(
            "chu_tiem".to_string(),
            "matkhau6".to_string(),
        ))
        .await
        .expect("login");
}

pub fn order_json(id: i32) -> Value {
    json!({
        "id": id,
        "customer_name": "Trần Văn Bình",
        "customer_email": "binh.tran@example.com",
        "customer_phone": "0912345678",
        "service_id": 3,
        "quantity": 500,
        "size": "A4",
        "material": "Giấy couche 150gsm",
        "notes": null,
        "design_file_url": null,
        "total_price": 1250000.0,
        "status": "pending",
        "created_at": "2024-05-14T08:30:00",
        "updated_at": "2024-05-14T08:30:00",
        "service": service_json(3),
    })
}

pub fn service_json(id: i32) -> Value {
    json!({
        "id": id,
        "name": "In danh thiếp",
        "description": "In offset danh thiếp 2 mặt, cán màng mờ",
        "price": 2500.0,
        "image_url": "uploads/danh-thiep.jpg",
        "category": "in-offset",
        "is_active": true,
        "featured": false,
        "created_at": "2024-03-02T09:00:00",
        "updated_at": "2024-04-18T14:05:00",
    })
}
