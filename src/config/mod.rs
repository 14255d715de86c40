//! Configuration module for sprite2c
//!
//! Provides types and parsing for `sprite2c.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
