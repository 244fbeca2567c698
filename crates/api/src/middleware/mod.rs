//! Request middleware.
//!
//! - [`auth::require_auth`] -- bearer-token gate for protected routes.
//! - [`auth::AuthUser`] -- extractor for the authenticated identity.

pub mod auth;
