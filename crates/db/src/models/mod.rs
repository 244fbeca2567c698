//! Row models and request DTOs, one module per table.

pub mod sprint;
pub mod todo;
pub mod user;

use serde::Serialize;

/// Result of a full-field `UPDATE` restricted to live rows.
///
/// `rows_affected == 0` means the target does not exist or is soft-deleted;
/// handlers turn that into a 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub rows_affected: u64,
    pub message: &'static str,
}

impl UpdateOutcome {
    pub fn new(rows_affected: u64, message: &'static str) -> Self {
        Self {
            rows_affected,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.rows_affected == 0
    }
}
