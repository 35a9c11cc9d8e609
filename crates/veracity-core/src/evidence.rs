//! Evidence records and their canonical, citation-ordered form
//!
//! Evidence reaches the debate in two shapes: structured records (from a
//! research collaborator or a JSON file) and `id|text` lines typed by a user.
//! Both are folded into [`EvidenceItem`] exactly once, at ingestion, so the
//! rest of the pipeline never looks at optional fields again.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendered in place of a citation block when there is no evidence at all
pub const NO_EVIDENCE: &str = "No evidence provided.";

/// Per-item text bound applied by evidence sources
pub const DEFAULT_MAX_CHARS: usize = 320;

/// Errors raised by evidence sources
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("Failed to read evidence from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed evidence JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One citable piece of evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Citation identifier (`R<n>` or caller-supplied)
    pub id: String,
    /// Evidence body
    pub text: String,
    /// Where it came from (URL, publication)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Publication date, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EvidenceItem {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            source: None,
            date: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

/// A loosely structured record as produced by research collaborators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Evidence as it arrives, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEvidence {
    /// Structured record; body taken from `text`, then `summary`, then `title`
    Record(EvidenceRecord),
    /// `"id|text"`; without a separator the id is empty
    Line(String),
}

impl RawEvidence {
    /// Resolve into a canonical item. `position` is 1-based and only used to
    /// name records that carry no id of their own.
    pub fn resolve(self, position: usize) -> EvidenceItem {
        match self {
            RawEvidence::Record(record) => {
                let id = non_empty(record.id).unwrap_or_else(|| format!("R{}", position));
                let text = non_empty(record.text)
                    .or_else(|| non_empty(record.summary))
                    .or(record.title)
                    .unwrap_or_default();
                EvidenceItem {
                    id,
                    text,
                    source: record.source,
                    date: record.date,
                }
            }
            RawEvidence::Line(line) => match line.split_once('|') {
                Some((id, text)) => EvidenceItem::new(id, text),
                None => EvidenceItem::new("", &line),
            },
        }
    }
}

impl From<&str> for RawEvidence {
    fn from(line: &str) -> Self {
        RawEvidence::Line(line.to_string())
    }
}

impl From<String> for RawEvidence {
    fn from(line: String) -> Self {
        RawEvidence::Line(line)
    }
}

impl From<EvidenceRecord> for RawEvidence {
    fn from(record: EvidenceRecord) -> Self {
        RawEvidence::Record(record)
    }
}

/// Lenient conversion from arbitrary JSON. Objects become records with
/// non-string fields stringified; strings become lines; any other scalar is
/// kept as its JSON text.
impl From<serde_json::Value> for RawEvidence {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Object(map) => RawEvidence::Record(EvidenceRecord {
                id: map.get("id").and_then(field_text),
                text: map.get("text").and_then(field_text),
                summary: map.get("summary").and_then(field_text),
                title: map.get("title").and_then(field_text),
                source: map.get("source").and_then(field_text),
                date: map.get("date").and_then(field_text),
            }),
            Value::String(line) => RawEvidence::Line(line),
            Value::Null => RawEvidence::Line(String::new()),
            other => RawEvidence::Line(other.to_string()),
        }
    }
}

/// `null` is absent; a nested object prefers its `name`
fn field_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) => Some(name.clone()),
            _ => Some(value.to_string()),
        },
        other => Some(other.to_string()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Ordered evidence; insertion order is citation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet {
    items: Vec<EvidenceItem>,
}

impl EvidenceSet {
    pub fn new(items: Vec<EvidenceItem>) -> Self {
        Self { items }
    }

    /// Normalize heterogeneous input, preserving order
    pub fn normalize<I, R>(raw: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RawEvidence>,
    {
        raw.into_iter()
            .enumerate()
            .map(|(i, r)| r.into().resolve(i + 1))
            .collect()
    }

    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvidenceItem> {
        self.items.iter()
    }

    /// The first `n` items (or all of them, if fewer)
    pub fn top(&self, n: usize) -> &[EvidenceItem] {
        &self.items[..self.items.len().min(n)]
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.id.as_str()).collect()
    }

    /// Citation block: one `<id>: <text>` line per item
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return NO_EVIDENCE.to_string();
        }
        self.items
            .iter()
            .map(|e| format!("{}: {}", e.id, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bulleted block of the first `limit` items, as shown to debating agents
    pub fn render_bullets(&self, limit: usize) -> String {
        self.top(limit)
            .iter()
            .map(|e| format!("- {}: {}", e.id, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<EvidenceItem> for EvidenceSet {
    fn from_iter<T: IntoIterator<Item = EvidenceItem>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EvidenceSet {
    type Item = &'a EvidenceItem;
    type IntoIter = std::slice::Iter<'a, EvidenceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Parse free-form user input, one item per line.
///
/// `id|text` lines keep their (trimmed) id; any other non-blank line is
/// numbered `U<n>`, counting the items parsed so far.
pub fn parse_user_evidence(input: &str) -> EvidenceSet {
    let mut items: Vec<EvidenceItem> = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let item = match line.split_once('|') {
            Some((id, text)) => EvidenceItem::new(id.trim(), text.trim()),
            None => EvidenceItem::new(&format!("U{}", items.len() + 1), line),
        };
        items.push(item);
    }
    EvidenceSet::new(items)
}

/// Collapse whitespace runs and bound the length (in characters)
pub fn clean_text(text: &str, max_chars: usize) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

/// Producer of evidence for a topic.
///
/// Implementations return at most `k` items keyed `R1..Rn` in order, with
/// bounded text, and a single placeholder item when nothing was found.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    async fn gather(&self, topic: &str, k: usize) -> Result<EvidenceSet, EvidenceError>;
}

fn placeholder() -> EvidenceItem {
    EvidenceItem::new("R1", "No relevant articles retrieved.").with_source("none")
}

/// Re-key to `R1..Rn`, clean text, cap at `k`, substitute the placeholder
fn finalize(set: EvidenceSet, k: usize, max_chars: usize) -> EvidenceSet {
    let items: EvidenceSet = set
        .items
        .into_iter()
        .filter(|e| !e.text.trim().is_empty())
        .take(k)
        .enumerate()
        .map(|(i, e)| EvidenceItem {
            id: format!("R{}", i + 1),
            text: clean_text(&e.text, max_chars),
            ..e
        })
        .collect();

    if items.is_empty() {
        EvidenceSet::new(vec![placeholder()])
    } else {
        items
    }
}

/// In-memory evidence, e.g. pasted by a user or fixed for a benchmark run
#[derive(Debug, Clone, Default)]
pub struct StaticEvidence {
    records: Vec<RawEvidence>,
    max_chars: usize,
}

impl StaticEvidence {
    pub fn new<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RawEvidence>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl EvidenceSource for StaticEvidence {
    async fn gather(&self, topic: &str, k: usize) -> Result<EvidenceSet, EvidenceError> {
        let set = EvidenceSet::normalize(self.records.clone());
        tracing::debug!(topic, available = set.len(), k, "Gathering static evidence");
        Ok(finalize(set, k, self.max_chars))
    }
}

/// Evidence read from disk: a JSON array of records/strings, or one
/// `id|text` line per row.
#[derive(Debug, Clone)]
pub struct FileEvidence {
    path: PathBuf,
    max_chars: usize,
}

impl FileEvidence {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Read and normalize the file without re-keying
    pub async fn load(&self) -> Result<EvidenceSet, EvidenceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| EvidenceError::Io {
                path: self.path.clone(),
                source,
            })?;

        if content.trim_start().starts_with('[') {
            // Element-wise so one odd record cannot sink the whole file
            let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;
            Ok(EvidenceSet::normalize(values))
        } else {
            Ok(parse_user_evidence(&content))
        }
    }
}

#[async_trait]
impl EvidenceSource for FileEvidence {
    async fn gather(&self, topic: &str, k: usize) -> Result<EvidenceSet, EvidenceError> {
        let set = self.load().await?;
        tracing::debug!(topic, path = %self.path.display(), available = set.len(), k, "Gathering file evidence");
        Ok(finalize(set, k, self.max_chars))
    }
}
