//! Check command - Debate a headline and compare against the control
//!
//! Usage:
//! ```bash
//! veracity check "OpenAI launches GPT-5" -e "R1|OpenAI announced GPT-5 today."
//! veracity check "Rain expected in Mumbai" --evidence-file news.json --rounds 3
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use veracity_adversarial::VerificationReport;

use super::{fail, paint_label, print_evidence, EvidenceArgs, ProviderArgs};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Headline to verify
    headline: String,

    /// Verifier/Challenger pairs [env: VERACITY_ROUNDS]
    #[arg(long, short = 'r')]
    rounds: Option<u32>,

    /// Print the full debate transcript
    #[arg(long, short = 't')]
    transcript: bool,

    #[command(flatten)]
    evidence: EvidenceArgs,

    #[command(flatten)]
    provider: ProviderArgs,
}

/// Run the check command
pub async fn run(args: CheckArgs) -> Result<()> {
    let service = args.provider.service_or_exit(args.rounds);
    let evidence = args.evidence.collect(&args.headline).await?;

    if !args.provider.json {
        println!("{}", "Veracity Check".bold().cyan());
        println!("{}", "═".repeat(40).cyan());
        println!("  {} {}", "Headline:".dimmed(), args.headline);
        println!("  {} {}", "Evidence items:".dimmed(), evidence.len());
        println!("  {} {}", "Rounds:".dimmed(), service.config().rounds);
        println!();
    }

    let report = match service.verify(&args.headline, evidence).await {
        Ok(report) => report,
        Err(e) => fail(args.provider.json, &e),
    };

    if args.provider.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, args.transcript);
    Ok(())
}

fn print_report(report: &VerificationReport, show_transcript: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Method").fg(Color::Cyan),
            Cell::new("Label").fg(Color::Cyan),
            Cell::new("Confidence").fg(Color::Cyan),
            Cell::new("Evidence used").fg(Color::Cyan),
        ]);

    for verdict in [&report.debate, &report.control] {
        let cited = verdict
            .evidence_used
            .as_ref()
            .map(|ids| ids.join(", "))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(verdict.method.as_str()).fg(Color::Green),
            Cell::new(verdict.label.as_str().to_uppercase()),
            Cell::new(format!("{}%", verdict.confidence)),
            Cell::new(cited).fg(Color::Yellow),
        ]);
    }

    println!("{table}");
    println!();
    println!("{} {}", "Debate verdict:".bold(), paint_label(report.debate.label));
    println!("  {}", report.debate.rationale);
    println!();
    println!("{} {}", "Control verdict:".bold(), paint_label(report.control.label));
    println!("  {}", report.control.rationale);
    println!();

    if report.agrees() {
        println!("{} Debate and control agree", "✓".green().bold());
    } else {
        println!("{} Debate and control disagree", "⚠".yellow().bold());
    }
    println!();

    print_evidence(&report.evidence);

    if show_transcript {
        println!();
        println!("{}", "Transcript:".bold());
        println!("{}", report.transcript);
    }

    println!();
    println!("  {} {}", "Completed:".dimmed(), report.completed_at.to_rfc3339());
}
