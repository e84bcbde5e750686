//! Domain logic for the Codex wiki backend.
//!
//! This crate has no database or HTTP dependencies so the rules it holds
//! (roles, moderation transitions, validation, the static game catalog) can
//! be shared by the repository layer, the API, and tests.

pub mod article;
pub mod category;
pub mod error;
pub mod gamedata;
pub mod moderation;
pub mod preview;
pub mod roles;
pub mod search;
pub mod types;
