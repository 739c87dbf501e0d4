//! Data Transfer Objects for REST request serialization.
//!
//! Responses reuse the domain [`crate::domain::Item`] directly.

pub mod item_dto;

pub use item_dto::*;
