use crate::models::exercise::Exercise;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Date-range and result-cap filter for log queries.
///
/// Both bounds are inclusive and may combine. `limit` is honored
/// literally; callers that want "everything" pass a large cap.
#[derive(Debug, Clone)]
pub struct LogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: usize,
}

impl LogFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// In-memory collection of exercise entries
///
/// Entries are create-only and scoped to a user identifier. The store
/// does not check that the user exists; handlers do that lookup first.
pub struct ExerciseStore {
    exercises: DashMap<String, Arc<Exercise>>,
    next_seq: AtomicU64,
}

impl ExerciseStore {
    pub fn new() -> Self {
        Self {
            exercises: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn add_exercise(
        &self,
        id: String,
        user_id: String,
        description: String,
        duration: i64,
        date: NaiveDate,
    ) -> Arc<Exercise> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let exercise = Arc::new(Exercise::new(
            id.clone(),
            user_id,
            description,
            duration,
            date,
            seq,
        ));
        self.exercises.insert(id, Arc::clone(&exercise));
        exercise
    }

    /// Filtered, ordered query over one user's entries.
    ///
    /// Results are sorted ascending by (date, insertion sequence) before
    /// the cap is applied, so repeated queries are deterministic.
    pub fn query(&self, user_id: &str, filter: &LogFilter) -> Vec<Arc<Exercise>> {
        let mut matches: Vec<Arc<Exercise>> = self
            .exercises
            .iter()
            .filter(|entry| {
                let ex = entry.value();
                ex.user_id == user_id && filter.matches(ex.date)
            })
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        matches.sort_by_key(|ex| (ex.date, ex.seq));
        matches.truncate(filter.limit);
        matches
    }

    pub fn count_for_user(&self, user_id: &str) -> usize {
        self.exercises
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .count()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for ExerciseStore {
    fn default() -> Self {
        Self::new()
    }
}
