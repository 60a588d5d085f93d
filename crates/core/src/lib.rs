//! Pure domain logic for the pipeline tracking backend.
//!
//! Everything here is synchronous and side-effect free: the fiscal period
//! calendar and volume allocator, opportunity identity/defaulting rules,
//! the override-price approval trigger, and the shared error taxonomy.
//! Persistence and HTTP concerns live in `vector-db` and `vector-api`.

pub mod error;
pub mod fiscal;
pub mod opportunity;
pub mod types;
