use crate::stores::exercise_store::ExerciseStore;
use crate::stores::user_store::UserStore;
use crate::utils::time::current_timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub users_created: AtomicU64,
    pub exercises_logged: AtomicU64,
    pub log_queries: AtomicU64,
    pub failed_requests: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub users_created: u64,
    pub exercises_logged: u64,
    pub log_queries: u64,
    pub failed_requests: u64,
    pub stored_users: usize,
    pub stored_exercises: usize,
    pub uptime_seconds: i64,
    pub requests_per_second: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            users_created: AtomicU64::new(0),
            exercises_logged: AtomicU64::new(0),
            log_queries: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    pub fn increment_users_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_exercises_logged(&self) {
        self.exercises_logged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_log_queries(&self) {
        self.log_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Collects counters plus current store sizes and derived values
    /// like uptime_seconds and requests_per_second.
    pub fn get_snapshot(
        &self,
        user_store: &UserStore,
        exercise_store: &ExerciseStore,
    ) -> MetricsSnapshot {
        let users_created = self.users_created.load(Ordering::Relaxed);
        let exercises_logged = self.exercises_logged.load(Ordering::Relaxed);
        let log_queries = self.log_queries.load(Ordering::Relaxed);
        let failed_requests = self.failed_requests.load(Ordering::Relaxed);

        let uptime_seconds = (current_timestamp() - self.start_time).max(0);

        let total_requests = users_created + exercises_logged + log_queries + failed_requests;
        let requests_per_second = if uptime_seconds > 0 {
            total_requests as f64 / uptime_seconds as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            users_created,
            exercises_logged,
            log_queries,
            failed_requests,
            stored_users: user_store.len(),
            stored_exercises: exercise_store.len(),
            uptime_seconds,
            requests_per_second,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
