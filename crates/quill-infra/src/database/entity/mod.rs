//! SeaORM entities and their conversions to domain types.

pub mod post;
pub mod user;
