//! Burrow - Reversible cleanup of developer caches
//!
//! This crate provides functionality for:
//! - Describing cleanup candidates as rules (built-in and user-defined)
//! - Scanning the filesystem concurrently under a safety policy
//! - Moving matches into timestamped trash sessions that can be undone
//! - Keeping a bounded history of past cleanups

pub mod auth;
pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod paths;
pub mod rules;
pub mod safety;
pub mod scanner;
pub mod trash;

// Re-export commonly used types
pub use config::Config;
pub use error::{BurrowError, Result};
