pub mod exercise_store;
pub mod user_store;
