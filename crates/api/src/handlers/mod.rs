pub mod auth;
pub mod sprint;
pub mod todo;
pub mod user;

use tasktrack_core::error::CoreError;
use tasktrack_core::validation::validate_title;

use crate::error::AppError;

/// Run a core validator and lift its message into a 400.
pub(crate) fn check(result: Result<(), String>) -> Result<(), AppError> {
    result.map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}

pub(crate) fn check_title(title: &str) -> Result<(), AppError> {
    check(validate_title(title))
}
