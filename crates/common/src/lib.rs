//! Helpers shared by every crate in the workspace: logging setup and
//! pagination normalization.

pub mod pagination;
pub mod utils;
