//! Row structs and input DTOs, one module per table.

pub mod organization;
pub mod session;
pub mod user;
