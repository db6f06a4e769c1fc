//! Tagged result of an insert guarded by a uniqueness constraint.

/// Outcome of an insert-if-absent write.
///
/// A uniqueness violation is an expected branch rather than a failure: the
/// adapter returns the record that already holds the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    /// The record was stored.
    Inserted(T),
    /// A record with the same unique key already existed.
    Duplicate(T),
}

impl<T> InsertOutcome<T> {
    /// Whether the insert created a new record.
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }

    /// The stored record, new or pre-existing.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Inserted(value) | Self::Duplicate(value) => value,
        }
    }
}
