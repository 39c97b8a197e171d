//! Domain rules for the vendor & purchase-order manager.
//!
//! Everything here is pure: no database, no network. The persistence and
//! notification crates call into these functions on their write/render paths.

pub mod error;
pub mod html;
pub mod money;
pub mod organization;
pub mod session;
pub mod types;
