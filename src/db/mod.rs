//! Database module for the blog server
//!
//! This module handles the connection pool, table creation,
//! and data access layer operations.

pub mod models;
pub mod operations;

pub use models::{Post, User};
pub use operations::DbOperations;
