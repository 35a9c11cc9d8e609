//! Info command - Show version and configuration
//!
//! Usage:
//! ```bash
//! veracity info
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use veracity_adversarial::DebateConfig;
use veracity_llm::VeracityConfig;

const PROVIDERS: [&str; 4] = ["gemini", "openai", "ollama", "mock"];

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs;

/// Run the info command
pub fn run(_args: InfoArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let config = VeracityConfig::from_env().context("Invalid configuration")?;
    let debate = DebateConfig::from(&config);

    println!("{}", "Veracity - Adversarial Headline Verification".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    println!("{}", "Version Information:".bold());
    println!("  {} {}", "CLI Version:".dimmed(), version.green());
    println!();

    println!("{}", "Providers:".bold());
    let available = config.llm.available_providers();
    for name in PROVIDERS {
        let marker = if available.contains(&name) {
            "✓".green()
        } else {
            "✗".red()
        };
        let default = if name == config.llm.default_provider {
            " (default)".cyan()
        } else {
            "".normal()
        };
        println!("  {} {}{}", marker, name, default);
    }
    println!();

    println!("{}", "Defaults:".bold());
    println!("  {} {}", "Rounds:".dimmed(), debate.rounds);
    println!("  {} {}", "Agent model:".dimmed(), debate.agent_model.as_str().green());
    println!("  {} {}", "Judge model:".dimmed(), debate.judge_model.as_str().green());
    println!(
        "  {} agent {} / retry {} / judge {} / control {}",
        "Temperatures:".dimmed(),
        debate.agent_temperature,
        debate.retry_temperature,
        debate.judge_temperature,
        debate.control_temperature
    );
    println!("  {} {}", "Debug:".dimmed(), config.debug);
    println!();

    println!("{}", "Configuration:".bold());
    println!(
        "  {} Set GEMINI_API_KEY or OPENAI_API_KEY (a .env file is read too)",
        "ℹ".blue()
    );
    println!();

    Ok(())
}
