//! Clean command implementation.

use anyhow::Result;

use super::scan::print_results_table;
use super::{human, plural, prompt_line, Context};
use crate::cleaner::CleanOutcome;
use crate::cli::CleanArgs;
use crate::rules::{RiskLevel, RuleResult};
use crate::scanner::ScanResults;

/// Run the clean command.
pub fn run(ctx: &Context, args: CleanArgs) -> Result<()> {
    let options = ctx.scan_options(&args.filter)?;
    let scanned = ctx.scan(options, true)?;

    let (results, held_back) = split_manual(scanned, args.include_manual);
    if held_back > 0 {
        println!(
            "Skipping {} rule{} that need manual review (use --include-manual to clean them).",
            held_back,
            plural(held_back)
        );
    }

    if results.is_empty() {
        println!("No cleanup candidates found. Your system is clean!");
        return Ok(());
    }

    print_results_table(&results, false);
    if args.diff {
        print_diff(&results.results);
    }

    let cleaner = ctx.cleaner();

    if args.dry_run {
        let outcome = cleaner.clean(&results.results, true)?;
        println!(
            "\n[DRY RUN] Would move {} path{} to the trash, reclaiming {}.",
            outcome.file_count,
            plural(outcome.file_count),
            human(outcome.reclaimed_bytes)
        );
        return Ok(());
    }

    if !args.yes && !confirm("\nMove these paths to the trash? [y/N] ")? {
        println!("Cleanup cancelled.");
        return Ok(());
    }

    let outcome = cleaner.clean(&results.results, false)?;
    report(ctx, &outcome);
    Ok(())
}

/// Record a finished clean in the history and print its summary.
pub(crate) fn report(ctx: &Context, outcome: &CleanOutcome) {
    if outcome.is_empty() {
        println!("Nothing to clean.");
        return;
    }
    tracing::info!(session = %outcome.session_id, "Cleanup complete");

    let history = ctx.config.history_store(&ctx.home);
    if let Err(e) = history.save(outcome.to_history_entry()) {
        tracing::warn!(error = %e, "Failed to record cleanup history");
    }

    println!("\nReclaimed {}.", human(outcome.reclaimed_bytes));
    println!("Paths moved to trash: {}", outcome.file_count);
    println!("Trash session: {}", outcome.session_id);
    println!("Run 'burrow undo' to restore them.");
}

/// Drop manual-review results unless `include_manual`; returns how many were dropped.
fn split_manual(mut results: ScanResults, include_manual: bool) -> (ScanResults, usize) {
    if include_manual {
        return (results, 0);
    }
    let before = results.results.len();
    results
        .results
        .retain(|r| r.rule.risk_level != RiskLevel::Manual);
    results.total_size = results.results.iter().map(|r| r.total_size).sum();
    let dropped = before - results.results.len();
    (results, dropped)
}

fn print_diff(results: &[RuleResult]) {
    println!();
    for result in results {
        println!("{}:", result.rule.name);
        for path in &result.found_paths {
            println!("  - {}", path.display());
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(prompt_line(prompt)?.eq_ignore_ascii_case("y"))
}
