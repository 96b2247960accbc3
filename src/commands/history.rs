//! History command implementation.

use anyhow::Result;

use super::{human, print_json, Context};
use crate::cli::ReportArgs;

/// Show past cleanups, newest first.
pub fn run(ctx: &Context, args: ReportArgs) -> Result<()> {
    let entries = ctx.config.history_store(&ctx.home).load()?;

    if args.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No history found. Start cleaning to build history!");
        return Ok(());
    }

    println!("{:<18} {:>12} {:>7}  {}", "DATE", "RECLAIMED", "PATHS", "SESSION");
    println!("{}", "-".repeat(60));
    for entry in &entries {
        println!(
            "{:<18} {:>12} {:>7}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            human(entry.reclaimed_bytes),
            entry.file_count,
            entry.id
        );
    }

    let total: u64 = entries.iter().map(|e| e.reclaimed_bytes).sum();
    println!("{}", "-".repeat(60));
    println!("Total reclaimed: {}", human(total));
    Ok(())
}
