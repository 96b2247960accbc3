use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Burrow - Reversible cleanup of developer caches
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Identify cleanup candidates
    Scan(ScanArgs),

    /// List every detected path grouped by rule
    List(ReportArgs),

    /// Show reclaimable space per category
    Stats(ReportArgs),

    /// Move cleanup candidates to the trash
    Clean(CleanArgs),

    /// Restore the last cleanup from the trash
    Undo,

    /// List the cleanup rules
    Rules(RulesArgs),

    /// Show past cleanups
    History(ReportArgs),

    /// Check that burrow can run on this machine
    Doctor(ReportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Filters shared by `scan` and `clean`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only evaluate rules in this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Only report paths not modified for this long (e.g. 30d, 24h)
    #[arg(long, value_name = "AGE")]
    pub older_than: Option<String>,

    /// Minimum reclaimable size per rule (e.g. 500MB, 1GB)
    #[arg(long, value_name = "SIZE")]
    pub min_size: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Look for large files in common user directories instead
    #[arg(long)]
    pub large: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Explain why each rule matched
    #[arg(long)]
    pub explain: bool,

    /// Pick results to clean by number after the scan
    #[arg(short, long, conflicts_with = "json")]
    pub interactive: bool,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show what would be cleaned without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// List every path that would be moved
    #[arg(long)]
    pub diff: bool,

    /// Also clean rules marked as manual review
    #[arg(long)]
    pub include_manual: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Show the details of one rule
    #[arg(long, value_name = "NAME")]
    pub explain: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
