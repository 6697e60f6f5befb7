//! Domain aggregates exposed by the client service layer.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod image;
pub mod order;
pub mod service;
pub mod site;
pub mod types;
pub mod user;
