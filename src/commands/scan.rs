//! Scan, list and stats commands.

use anyhow::Result;

use super::{clean, human, plural, print_json, prompt_line, Context};
use crate::cli::{FilterArgs, ReportArgs, ScanArgs};
use crate::rules::RuleResult;
use crate::scanner::ScanResults;

/// Run the scan command.
pub fn run(ctx: &Context, args: ScanArgs) -> Result<()> {
    let options = ctx
        .scan_options(&args.filter)?
        .with_large_file_mode(args.large);

    tracing::info!(?options, "Scanning");
    let results = ctx.scan(options, !args.json)?;

    if args.json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No cleanup candidates found. Your system is clean!");
        return Ok(());
    }

    print_results_table(&results, args.explain);
    if args.interactive {
        return clean_selected(ctx, &results);
    }
    println!("\nRun 'burrow clean' to reclaim space.");
    Ok(())
}

/// Ask which results to clean and move them to the trash.
fn clean_selected(ctx: &Context, results: &ScanResults) -> Result<()> {
    let input = prompt_line("\nSelect items to clean (e.g. 1, 3, 5-7 or all; empty to skip): ")?;
    let picked = parse_selection(&input, results.results.len());
    if picked.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let selected: Vec<RuleResult> = picked
        .iter()
        .map(|&i| results.results[i].clone())
        .collect();
    tracing::info!(count = selected.len(), "Cleaning selected results");

    let outcome = ctx.cleaner().clean(&selected, false)?;
    clean::report(ctx, &outcome);
    Ok(())
}

/// Parse a selection like `1, 3, 5-7` or `all` into sorted 0-based indices.
///
/// Numbers are 1-based. Entries outside `1..=count` or that do not parse are ignored.
pub(crate) fn parse_selection(input: &str, count: usize) -> Vec<usize> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return (0..count).collect();
    }

    let mut picked = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (a.trim().parse::<usize>(), b.trim().parse::<usize>()),
            None => (part.parse::<usize>(), part.parse::<usize>()),
        };
        let (Ok(start), Ok(end)) = (start, end) else {
            tracing::debug!(part, "Ignoring unparsable selection");
            continue;
        };
        picked.extend((start.max(1)..=end.min(count)).map(|n| n - 1));
    }
    picked.sort_unstable();
    picked.dedup();
    picked
}

/// Run the list command: every found path grouped by rule.
pub fn run_list(ctx: &Context, args: ReportArgs) -> Result<()> {
    let options = ctx.scan_options(&FilterArgs::default())?;
    let results = ctx.scan(options, !args.json)?;

    if args.json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No cleanup candidates found.");
        return Ok(());
    }

    for result in &results.results {
        println!(
            "\n[{}] {} ({})",
            result.rule.category,
            result.rule.name,
            human(result.total_size)
        );
        for path in &result.found_paths {
            println!("  - {}", path.display());
        }
    }
    Ok(())
}

/// Run the stats command: reclaimable bytes per category.
pub fn run_stats(ctx: &Context, args: ReportArgs) -> Result<()> {
    let options = ctx.scan_options(&FilterArgs::default())?;
    let results = ctx.scan(options, !args.json)?;
    let totals = results.category_totals();

    if args.json {
        return print_json(&totals);
    }

    println!("{:<30} {:>12}", "CATEGORY", "SIZE");
    println!("{}", "-".repeat(43));
    for (category, size) in &totals {
        println!("{:<30} {:>12}", category, human(*size));
    }
    println!("{}", "-".repeat(43));
    println!("{:<30} {:>12}", "TOTAL RECLAIMABLE", human(results.total_size));
    Ok(())
}

pub(crate) fn print_results_table(results: &ScanResults, explain: bool) {
    println!(
        "{:<4} {:<20} {:<8} {:>12}  {}",
        "ID", "CATEGORY", "RISK", "SIZE", "RULE"
    );
    println!("{}", "-".repeat(75));

    for (i, result) in results.results.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<8} {:>12}  {}",
            i + 1,
            truncate(&result.rule.category, 20),
            result.rule.risk_level.to_string(),
            human(result.total_size),
            result.rule.name
        );
        if explain && !result.rule.explanation.is_empty() {
            println!("     {}", result.rule.explanation);
        }
    }

    println!("{}", "-".repeat(75));
    println!(
        "Total reclaimable: {} in {} path{}",
        human(results.total_size),
        results.path_count(),
        plural(results.path_count())
    );
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
