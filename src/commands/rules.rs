//! Rules command implementation.

use anyhow::{anyhow, Result};

use super::{print_json, Context};
use crate::cli::RulesArgs;
use crate::rules::CleanupRule;

/// List the rule catalog, or explain a single rule.
pub fn run(ctx: &Context, args: RulesArgs) -> Result<()> {
    let catalog = ctx.catalog()?;

    if let Some(name) = &args.explain {
        let rule = catalog
            .get(name)
            .ok_or_else(|| anyhow!("rule not found: {name}"))?;
        if args.json {
            return print_json(rule);
        }
        print_rule_details(rule);
        return Ok(());
    }

    if args.json {
        return print_json(catalog.rules());
    }

    println!("{:<28} {:<20} {:<8} {}", "NAME", "CATEGORY", "RISK", "DESCRIPTION");
    println!("{}", "-".repeat(90));
    for rule in catalog.rules() {
        println!(
            "{:<28} {:<20} {:<8} {}",
            rule.name,
            rule.category,
            rule.risk_level.to_string(),
            rule.description
        );
    }
    println!("\n{} rules in {} categories", catalog.len(), catalog.categories().len());
    Ok(())
}

fn print_rule_details(rule: &CleanupRule) {
    println!("Rule:        {}", rule.name);
    println!("Category:    {}", rule.category);
    println!("Risk:        {}", rule.risk_level);
    println!("Version:     {} (since {})", rule.rule_version, rule.introduced_in);
    println!("Description: {}", rule.description);
    println!("Explanation: {}", rule.explanation);
    println!("Paths:");
    for path in &rule.paths {
        println!("  {path}");
    }
}
