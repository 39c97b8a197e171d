//! Repository structs exposing async CRUD over a `PgPool`.

pub mod organization_repo;
pub mod session_repo;
pub mod user_repo;

pub use organization_repo::OrganizationRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
