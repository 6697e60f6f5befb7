//! Headless client for the Phú Long printing-services HTTP API.
//!
//! The crate pairs a typed remote-resource client ([`repository`]) with
//! the list-view state machinery a storefront or admin console drives:
//! sequenced fetches, debounced search, filtering, pagination and
//! optimistic mutations ([`list`], [`services`]). Forms validate with
//! the Vietnamese messages the pages surface ([`forms`]); notices queue
//! up as toast payloads ([`dto::notice`]).

pub mod config;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod list;
pub mod pagination;
pub mod repository;
pub mod services;
