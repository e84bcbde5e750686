pub mod articles;
pub mod auth;
pub mod categories;
pub mod gamedata;
pub mod moderation;
pub mod preview;
