//! Veracity CLI - Adversarial verification of headlines
//!
//! # Usage
//!
//! ```bash
//! # Debate a headline and compare with the control verdict
//! veracity check "OpenAI launches GPT-5" -e "R1|OpenAI announced GPT-5 today."
//!
//! # Control verdict only, as JSON
//! veracity control "OpenAI launches GPT-5" --evidence-file evidence.json --json
//!
//! # Show version and configuration
//! veracity info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{check, control, info};

/// Veracity - adversarial headline verification
///
/// Two role-locked agents debate a headline over the supplied evidence,
/// a judge weighs the transcript, and a single-pass control gives a baseline.
#[derive(Parser)]
#[command(
    name = "veracity",
    version,
    about = "Veracity CLI - Adversarial Headline Verification",
    long_about = "Veracity stages a debate between a Verifier and a Challenger,\n\
                  then compares the judged verdict against a control verdict.\n\n\
                  API keys are read from the environment or a .env file."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Debate a headline, judge it and compare with the control
    #[command(name = "check")]
    Check(check::CheckArgs),

    /// Control verdict only
    #[command(name = "control")]
    Control(control::ControlArgs),

    /// Show version and configuration
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Check(args) => check::run(args).await,
        Commands::Control(args) => control::run(args).await,
        Commands::Info(args) => info::run(args),
    }
}

/// Setup logging based on verbosity level; VERACITY_DEBUG raises the floor
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let debug = std::env::var("VERACITY_DEBUG").is_ok_and(|v| matches!(v.as_str(), "1" | "true"));
    let filter = match verbosity {
        0 if debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::try_parse_from([
            "veracity",
            "check",
            "OpenAI launches GPT-5",
            "-e",
            "R1|announced",
            "--evidence",
            "R2|confirmed",
            "--rounds",
            "3",
            "--provider",
            "mock",
            "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["veracity", "info", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
