//! Reversible removal through timestamped trash sessions.
//!
//! Each call to `move_to_trash` creates `<root>/<YYYYMMDD_HHMMSS>/`, renames
//! every path into it and writes a `manifest.json` mapping original to
//! trashed locations. `restore_last` replays the newest manifest and then
//! removes the session.

mod manifest;
mod store;

pub use manifest::{TrashEntry, TrashManifest, MANIFEST_FILE, SESSION_FORMAT};
pub use store::{FailedRestore, RestoreReport, TrashStore};
