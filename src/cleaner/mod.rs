//! Cleaning and undo.
//!
//! This module provides:
//! - Planning of the paths to move out of the scan results
//! - Reversible cleaning through the trash store
//! - Authentication gating of destructive actions

mod orchestrator;

pub use orchestrator::{CleanOutcome, Cleaner, DRY_RUN_SESSION};
