//! Command-line export of the order book into a CSV file.

use std::env;
use std::fs;

use dotenvy::dotenv;

use phulong_client::config::ClientConfig;
use phulong_client::domain::auth::Credentials;
use phulong_client::repository::Authenticator;
use phulong_client::repository::http::HttpRepository;
use phulong_client::services::order::{self, ORDERS_PER_PAGE, OrderListState};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ClientConfig::load("config", &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let (username, password) = match (config.username.clone(), config.password.clone()) {
        (Some(username), Some(password)) => (username, password),
        _ => {
            log::error!("The export needs credentials; set APP_USERNAME and APP_PASSWORD");
            std::process::exit(1);
        }
    };

    let repo = match HttpRepository::new(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error building the HTTP client: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = repo.login(&Credentials::new(username, password)).await {
        log::error!("Login failed: {err}");
        std::process::exit(1);
    }

    let mut state = OrderListState::new(ORDERS_PER_PAGE);
    let (suggested_name, bytes) = match order::export_orders_csv(&repo, &mut state).await {
        Ok(export) => export,
        Err(err) => {
            log::error!("Export failed: {err}");
            std::process::exit(1);
        }
    };

    for notice in state.notices.take() {
        log::info!("{}: {}", notice.title, notice.message);
    }

    let output = env::args().nth(1).unwrap_or(suggested_name);
    match fs::write(&output, &bytes) {
        Ok(()) => log::info!("Wrote {} bytes to {output}", bytes.len()),
        Err(err) => {
            log::error!("Error writing {output}: {err}");
            std::process::exit(1);
        }
    }
}
