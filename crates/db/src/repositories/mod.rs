//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod material_repo;
pub mod opportunity_repo;
pub mod override_price_repo;
pub mod pending_user_repo;
pub mod user_repo;

pub use material_repo::MaterialRepo;
pub use opportunity_repo::OpportunityRepo;
pub use override_price_repo::OverridePriceRepo;
pub use pending_user_repo::{PendingUserRepo, UpsertOutcome};
pub use user_repo::UserRepo;
