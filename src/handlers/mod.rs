pub mod exercises;
pub mod fallback;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod users;
