//! Undo command implementation.

use anyhow::{bail, Result};

use super::{plural, Context};

/// Restore the most recent trash session.
pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.quiet {
        println!("Restoring last cleanup session...");
    }

    let report = ctx.cleaner().undo()?;

    println!(
        "Restored {} path{} from session {}.",
        report.restored.len(),
        plural(report.restored.len()),
        report.session_id
    );

    if report.is_complete() {
        return Ok(());
    }

    for failure in &report.failed {
        eprintln!(
            "  Could not restore {}: {}",
            failure.original_path.display(),
            failure.error
        );
    }
    if report.session_removed {
        eprintln!("The session was removed; unrestored items are gone from the trash.");
    } else {
        eprintln!("The session was kept; fix the errors above and run 'burrow undo' again.");
    }
    bail!(
        "{} path{} could not be restored",
        report.failed.len(),
        plural(report.failed.len())
    )
}
