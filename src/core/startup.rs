use anyhow::Result;
use tracing::warn;

use crate::core::state::AppState;
use crate::journal::journal::JournalOperation;

// This runs at boot time
pub fn apply_journal_operations(state: &AppState, operations: &[JournalOperation]) -> Result<()> {
    for op in operations {
        match op {
            JournalOperation::AddUser { id, username } => {
                state.user_store.add_user(id.clone(), username.clone());
            }
            JournalOperation::AddExercise {
                id,
                user_id,
                description,
                duration,
                date,
            } => {
                if state.user_store.get(user_id).is_none() {
                    // Entries are kept even without their user; referential
                    // integrity is checked at insert time, not on replay
                    warn!(
                        exercise_id = %id,
                        user_id = %user_id,
                        "Replayed exercise references an unknown user"
                    );
                }
                state.exercise_store.add_exercise(
                    id.clone(),
                    user_id.clone(),
                    description.clone(),
                    *duration,
                    *date,
                );
            }
        }
    }
    Ok(())
}
