pub mod api;
pub mod exercise;
pub mod user;
