//! Subcommand implementations.

pub mod clean;
pub mod doctor;
pub mod history;
pub mod rules;
pub mod scan;
pub mod undo;

use anyhow::{anyhow, Context as _, Result};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::platform_authenticator;
use crate::cleaner::Cleaner;
use crate::cli::FilterArgs;
use crate::config::Config;
use crate::paths;
use crate::rules::RuleCatalog;
use crate::safety::SafetyPolicy;
use crate::scanner::{parse_age, parse_size, ScanOptions, ScanResults, Scanner};

/// State shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub home: PathBuf,
    pub quiet: bool,
}

impl Context {
    pub fn new(config: Config, quiet: bool) -> Result<Self> {
        Ok(Self {
            config,
            home: paths::home_dir()?,
            quiet,
        })
    }

    /// Built-in rules plus the user's custom rules.
    pub fn catalog(&self) -> Result<RuleCatalog> {
        let custom = self.config.custom_rules_file(&self.home);
        Ok(RuleCatalog::load(custom.as_deref())?)
    }

    /// Configured scan options narrowed by command-line filters.
    pub fn scan_options(&self, filter: &FilterArgs) -> Result<ScanOptions> {
        let mut options = self.config.scan_options();

        if let Some(category) = &filter.category {
            options = options.with_category(category.clone());
        }
        if let Some(age) = &filter.older_than {
            let age = parse_age(age)
                .ok_or_else(|| anyhow!("invalid age '{age}' (examples: 30d, 24h, 90m)"))?;
            options = options.with_min_age(age);
        }
        if let Some(size) = &filter.min_size {
            let bytes = parse_size(size)
                .ok_or_else(|| anyhow!("invalid size '{size}' (examples: 500MB, 1GB)"))?;
            options = options.with_size_threshold(bytes);
        }
        Ok(options)
    }

    /// Run a scan behind a spinner.
    pub fn scan(&self, options: ScanOptions, show_progress: bool) -> Result<ScanResults> {
        let catalog = self.catalog()?;
        let scanner = Scanner::with_policy(catalog, options, SafetyPolicy::new(&self.home));

        let spinner = if show_progress && !self.quiet {
            Some(spinner("Scanning for cleanup candidates..."))
        } else {
            None
        };

        let results = scanner.scan().context("Scan failed");
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let mut results = results?;
        results.sort_by_size();
        Ok(results)
    }

    pub fn cleaner(&self) -> Cleaner {
        let cleaner = Cleaner::new(self.config.trash_store(&self.home));
        if self.config.auth.enabled {
            cleaner.with_authenticator(platform_authenticator())
        } else {
            cleaner
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn human(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `prompt` and read one line from stdin, trimmed.
pub(crate) fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
