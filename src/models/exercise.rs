use chrono::NaiveDate;

#[derive(Clone, Debug)]
pub struct Exercise {
    /// Store-generated opaque identifier (24 hex characters)
    pub id: String,
    /// Identifier of the owning user. Checked at the handler on insert,
    /// not enforced by the store layer.
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
    /// Insertion sequence assigned by the store, tiebreaker for log order
    pub seq: u64,
}

impl Exercise {
    pub fn new(
        id: String,
        user_id: String,
        description: String,
        duration: i64,
        date: NaiveDate,
        seq: u64,
    ) -> Self {
        Self {
            id,
            user_id,
            description,
            duration,
            date,
            seq,
        }
    }
}
