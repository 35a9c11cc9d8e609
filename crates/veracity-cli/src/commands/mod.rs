//! Subcommands and the argument groups they share

pub mod check;
pub mod control;
pub mod info;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use veracity_adversarial::{DebateConfig, VerificationService};
use veracity_core::{
    parse_user_evidence, EvidenceItem, EvidenceSet, EvidenceSource, FileEvidence, Label,
};
use veracity_llm::{LlmProvider, VeracityConfig};

/// Where evidence comes from
#[derive(Args, Debug, Clone, Default)]
pub struct EvidenceArgs {
    /// Evidence item as `ID|TEXT`; without `|` it is numbered U1, U2, ...
    #[arg(long = "evidence", short = 'e', value_name = "ID|TEXT")]
    pub evidence: Vec<String>,

    /// JSON array of records/strings, or one `ID|TEXT` per line
    #[arg(long, value_name = "FILE")]
    pub evidence_file: Option<PathBuf>,

    /// Items taken from the evidence file (re-keyed R1..Rn)
    #[arg(long, default_value_t = 6, value_name = "K")]
    pub max_sources: usize,
}

impl EvidenceArgs {
    /// Manual items first, then the file's items numbered after the highest
    /// manual `R<n>`
    pub async fn collect(&self, headline: &str) -> Result<EvidenceSet> {
        let manual = parse_user_evidence(&self.evidence.join("\n"));

        let Some(path) = &self.evidence_file else {
            return Ok(manual);
        };
        let gathered = FileEvidence::new(path)
            .gather(headline, self.max_sources)
            .await
            .with_context(|| format!("Failed to read evidence file: {}", path.display()))?;

        let offset = manual.iter().filter_map(|e| r_number(&e.id)).max().unwrap_or(0);
        let renumbered = gathered.iter().enumerate().map(|(i, e)| EvidenceItem {
            id: format!("R{}", offset + i + 1),
            ..e.clone()
        });
        Ok(manual.iter().cloned().chain(renumbered).collect())
    }
}

/// `n` for ids of the form `R<n>`
fn r_number(id: &str) -> Option<usize> {
    id.strip_prefix('R')?.parse().ok()
}

/// Backend selection, overriding the environment
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// gemini, openai, ollama or mock [env: VERACITY_DEFAULT_PROVIDER]
    #[arg(long, short = 'p')]
    pub provider: Option<String>,

    /// Model used by the debating agents [env: VERACITY_AGENT_MODEL]
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Model used by the judge and the control [env: VERACITY_JUDGE_MODEL]
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Print machine-readable JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

impl ProviderArgs {
    /// Build the service from environment plus flags, reporting a bad
    /// configuration through [`fail`]
    pub fn service_or_exit(&self, rounds: Option<u32>) -> VerificationService<dyn LlmProvider> {
        let built = VeracityConfig::from_env()
            .context("Invalid configuration")
            .and_then(|config| self.service(config, rounds));
        match built {
            Ok(service) => service,
            Err(e) => fail(self.json, &format!("{:#}", e)),
        }
    }

    /// Apply the flags to `config` and build the service
    pub fn service(
        &self,
        mut config: VeracityConfig,
        rounds: Option<u32>,
    ) -> Result<VerificationService<dyn LlmProvider>> {
        if let Some(model) = &self.model {
            config.llm.agent_model = model.clone();
        }
        if let Some(model) = &self.judge_model {
            config.llm.judge_model = model.clone();
        }
        if let Some(rounds) = rounds {
            config.rounds = rounds;
        }

        let name = self
            .provider
            .clone()
            .unwrap_or_else(|| config.llm.default_provider.clone());
        let llm: Arc<dyn LlmProvider> = config
            .llm
            .provider(&name)
            .with_context(|| format!("LLM client not initialized ({})", name))?;

        tracing::debug!(provider = %name, rounds = config.rounds, "Service configured");
        Ok(VerificationService::new(llm, DebateConfig::from(&config)))
    }
}

/// Label colored by outcome
pub fn paint_label(label: Label) -> colored::ColoredString {
    let text = label.as_str().to_uppercase();
    let text = text.as_str();
    match label {
        Label::True => text.green().bold(),
        Label::False => text.red().bold(),
        Label::Mixed => text.yellow().bold(),
        Label::Unverified => text.dimmed().bold(),
    }
}

/// Report a failed request the way a verdict would be reported, then exit.
///
/// No label is guessed: the output carries `ERROR` markers only.
pub fn fail(json: bool, error: &dyn std::fmt::Display) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": error.to_string() }));
    } else {
        eprintln!("{} {}", "ERROR".red().bold(), error);
    }
    std::process::exit(1);
}

/// Evidence block with sources, bodies cut at 200 characters
pub fn print_evidence(evidence: &EvidenceSet) {
    println!("{}", "Evidence:".bold());
    if evidence.is_empty() {
        println!("  {}", "No evidence sources provided.".dimmed());
        return;
    }
    for item in evidence {
        let mut text: String = item.text.chars().take(200).collect();
        if item.text.chars().count() > 200 {
            text.push_str("...");
        }
        println!("  {} {}", format!("{}:", item.id).as_str().cyan(), text);
        if let Some(source) = &item.source {
            println!("     {} {}", "Source:".dimmed(), source);
        }
    }
}
