//! Product module: request/patch types, repository port and adapters, service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::ProductService;
