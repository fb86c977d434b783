//! Application-level utilities for the Simoly CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - Form and field lookup by id or prefix
//! - The per-invocation context shared by command handlers

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{
    missing_store_message, resolve_config_path, resolve_field, resolve_form, resolve_store_path,
};
