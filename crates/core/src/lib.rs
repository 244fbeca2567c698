//! Domain types shared by the `tasktrack` crates: id/timestamp aliases, the
//! error taxonomy, and pure input validation.

pub mod error;
pub mod types;
pub mod validation;
