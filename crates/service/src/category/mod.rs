//! Category module: request types, repository port and adapters, service.

pub mod domain;
pub mod lookup;
pub mod repo;
pub mod repository;
pub mod seed;
pub mod service;

pub use lookup::CategoryLookup;
pub use service::CategoryService;
