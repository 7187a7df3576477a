//! HTTP route handlers, one submodule per entity.

pub mod posts;
pub mod users;
