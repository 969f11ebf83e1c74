use crate::models::user::User;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory collection of user records
///
/// Users are create-only. Each insert is tagged with a monotonically
/// increasing sequence so listing can reproduce insertion order even
/// though the underlying map iterates in arbitrary order.
pub struct UserStore {
    users: DashMap<String, Arc<User>>,
    next_seq: AtomicU64,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a user under the given identifier.
    ///
    /// Duplicate usernames are permitted; a duplicate identifier replaces
    /// the previous record (identifiers are store-generated, so this only
    /// happens on a journal replay of the same line twice).
    pub fn add_user(&self, id: String, username: String) -> Arc<User> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let user = Arc::new(User::new(id.clone(), username, seq));
        self.users.insert(id, Arc::clone(&user));
        user
    }

    /// Look up a user by identifier
    pub fn get(&self, id: &str) -> Option<Arc<User>> {
        self.users.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// All users in insertion order
    pub fn list(&self) -> Vec<Arc<User>> {
        let mut users: Vec<Arc<User>> = self
            .users
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        users.sort_by_key(|user| user.seq);
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
