//! Catalog entities.
//!
//! `Category` and `Product` are SeaORM entity models that double as the domain
//! types; both are built through validating constructors.

pub mod errors;
pub mod db;
pub mod category;
pub mod product;

pub use category::Model as Category;
pub use product::Model as Product;

use chrono::{SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time truncated to microseconds, the precision Postgres keeps.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}
