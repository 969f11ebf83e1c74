// Application state (AppState)

use crate::core::config::Config;
use crate::journal::journal::Journal;
use crate::metrics::collector::Metrics;
use crate::stores::{exercise_store::ExerciseStore, user_store::UserStore};
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
/// The journal is constructed by the caller and injected here, so tests
/// can point it at a temporary file.
#[derive(Clone)]
pub struct AppState {
    /// User directory
    pub user_store: Arc<UserStore>,

    /// Exercise log store
    pub exercise_store: Arc<ExerciseStore>,

    /// Metrics collector for tracking statistics
    pub metrics: Arc<Metrics>,

    /// Append-only journal for persistence
    pub journal: Arc<Journal>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, journal: Journal) -> Self {
        Self {
            user_store: Arc::new(UserStore::new()),
            exercise_store: Arc::new(ExerciseStore::new()),
            metrics: Arc::new(Metrics::new()),
            journal: Arc::new(journal),
            config: Arc::new(config),
        }
    }
}
