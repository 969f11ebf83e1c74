pub mod core;
pub mod models;
pub mod stores;
pub mod journal;
pub mod metrics;
pub mod validation;
pub mod utils;
pub mod handlers;
