//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write endpoints that touch the table

pub mod material;
pub mod opportunity;
pub mod override_price;
pub mod user;
