#[derive(Clone, Debug)]
pub struct User {
    /// Store-generated opaque identifier (24 hex characters)
    pub id: String,
    /// Display name; duplicates are permitted
    pub username: String,
    /// Insertion sequence assigned by the store, used for listing order
    pub seq: u64,
}

impl User {
    pub fn new(id: String, username: String, seq: u64) -> Self {
        Self { id, username, seq }
    }
}
