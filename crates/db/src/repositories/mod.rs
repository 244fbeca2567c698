//! Repository layer. Each repository is a unit struct whose methods take the
//! shared [`PgPool`](sqlx::PgPool) explicitly.

pub mod sprint_repo;
pub mod todo_repo;
pub mod user_repo;

pub use sprint_repo::SprintRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;
