//! DTO modules that bridge the service layer with consuming UIs.

pub mod envelope;
pub mod notice;
