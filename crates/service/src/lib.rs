//! Service layer for the catalog: categories and products.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Product writes are checked against existing categories via [`category::CategoryLookup`].

pub mod errors;
pub mod ids;
pub mod category;
pub mod product;
#[cfg(test)]
pub mod test_support;

pub use category::{CategoryLookup, CategoryService};
pub use errors::ServiceError;
pub use product::ProductService;
