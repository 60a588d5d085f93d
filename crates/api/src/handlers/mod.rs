pub mod material;
pub mod opportunity;
pub mod override_price;
pub mod user;
