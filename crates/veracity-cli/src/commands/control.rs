//! Control command - Single-pass verdict without a debate
//!
//! Usage:
//! ```bash
//! veracity control "OpenAI launches GPT-5" -e "R1|OpenAI announced GPT-5 today."
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{fail, paint_label, print_evidence, EvidenceArgs, ProviderArgs};

/// Arguments for the control command
#[derive(Args)]
pub struct ControlArgs {
    /// Headline to classify
    headline: String,

    #[command(flatten)]
    evidence: EvidenceArgs,

    #[command(flatten)]
    provider: ProviderArgs,
}

/// Run the control command
pub async fn run(args: ControlArgs) -> Result<()> {
    let service = args.provider.service_or_exit(None);
    let evidence = args.evidence.collect(&args.headline).await?;

    let verdict = match service.control(&args.headline, &evidence).await {
        Ok(verdict) => verdict,
        Err(e) => fail(args.provider.json, &e),
    };

    if args.provider.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    println!("{}", "Veracity Control".bold().cyan());
    println!("{}", "═".repeat(40).cyan());
    println!("  {} {}", "Headline:".dimmed(), args.headline);
    println!();
    println!(
        "{} {} ({}%)",
        "Verdict:".bold(),
        paint_label(verdict.label),
        verdict.confidence
    );
    println!("  {}", verdict.rationale);
    println!();
    print_evidence(&evidence);

    Ok(())
}
