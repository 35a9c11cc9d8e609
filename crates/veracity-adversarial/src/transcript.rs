//! Role-tagged debate transcript

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

/// The two locked sides of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Argues the headline is accurate
    Verifier,
    /// Argues the headline is inaccurate or misleading
    Challenger,
}

impl Role {
    /// Marker written before each of this role's turns in the rendered text
    pub fn marker(&self) -> &'static str {
        match self {
            Role::Verifier => "[A]",
            Role::Challenger => "[B]",
        }
    }

    pub fn opponent(&self) -> Role {
        match self {
            Role::Verifier => Role::Challenger,
            Role::Challenger => Role::Verifier,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Verifier => f.write_str("Verifier"),
            Role::Challenger => f.write_str("Challenger"),
        }
    }
}

/// One argumentative turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Append-only record of a debate.
///
/// Turns must alternate starting with the Verifier; `push` rejects anything
/// else, so a transcript handed to the judge always starts with the Verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TranscriptRecord")]
pub struct Transcript {
    turns: Vec<Turn>,
}

/// Wire form of a transcript; only reaches [`Transcript`] through `push`
#[derive(Deserialize)]
struct TranscriptRecord {
    turns: Vec<Turn>,
}

impl TryFrom<TranscriptRecord> for Transcript {
    type Error = VerifyError;

    fn try_from(record: TranscriptRecord) -> Result<Self, Self::Error> {
        let mut transcript = Transcript::new();
        for turn in record.turns {
            transcript.push(turn)?;
        }
        Ok(transcript)
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whose turn it is
    pub fn next_role(&self) -> Role {
        match self.turns.last() {
            Some(turn) => turn.role.opponent(),
            None => Role::Verifier,
        }
    }

    /// Append a turn; the role must be [`Transcript::next_role`]
    pub fn push(&mut self, turn: Turn) -> Result<(), VerifyError> {
        let expected = self.next_role();
        if turn.role != expected {
            return Err(VerifyError::OutOfTurn {
                role: turn.role,
                expected,
            });
        }
        self.turns.push(turn);
        Ok(())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Every Verifier turn has its Challenger reply
    pub fn is_complete(&self) -> bool {
        self.turns.len() % 2 == 0
    }

    /// Most recent turn by `role`
    pub fn last_by(&self, role: Role) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == role)
    }

    /// Single text blob with role markers, e.g. `[A]\n...\n\n[B]\n...`
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}\n{}", t.role.marker(), t.content.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternation_enforced() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.next_role(), Role::Verifier);

        let err = transcript
            .push(Turn::new(Role::Challenger, "too early"))
            .unwrap_err();
        assert!(matches!(
            err,
            VerifyError::OutOfTurn {
                role: Role::Challenger,
                expected: Role::Verifier
            }
        ));

        transcript.push(Turn::new(Role::Verifier, "pro")).unwrap();
        assert!(!transcript.is_complete());
        transcript.push(Turn::new(Role::Challenger, "con")).unwrap();
        assert!(transcript.is_complete());
        assert!(transcript.push(Turn::new(Role::Challenger, "again")).is_err());
    }

    #[test]
    fn test_last_by_role() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new(Role::Verifier, "v1")).unwrap();
        transcript.push(Turn::new(Role::Challenger, "c1")).unwrap();
        transcript.push(Turn::new(Role::Verifier, "v2")).unwrap();

        assert_eq!(transcript.last_by(Role::Verifier).unwrap().content, "v2");
        assert_eq!(transcript.last_by(Role::Challenger).unwrap().content, "c1");
        assert!(Transcript::new().last_by(Role::Verifier).is_none());
    }

    #[test]
    fn test_render_markers() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new(Role::Verifier, " R1 confirms ")).unwrap();
        transcript.push(Turn::new(Role::Challenger, "R1 is thin")).unwrap();
        assert_eq!(transcript.render(), "[A]\nR1 confirms\n\n[B]\nR1 is thin");
        assert_eq!(Transcript::new().render(), "");
    }

    #[test]
    fn test_deserialize_replays_alternation() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new(Role::Verifier, "R1 confirms")).unwrap();
        transcript.push(Turn::new(Role::Challenger, "R1 is thin")).unwrap();

        let json = serde_json::to_string(&transcript).unwrap();
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transcript);

        let challenger_first =
            r#"{"turns": [{"role": "challenger", "content": "R1 is thin"}]}"#;
        let err = serde_json::from_str::<Transcript>(challenger_first).unwrap_err();
        assert!(err.to_string().contains("Verifier's turn"), "{}", err);

        let doubled = r#"{"turns": [
            {"role": "verifier", "content": "a"},
            {"role": "verifier", "content": "b"}
        ]}"#;
        assert!(serde_json::from_str::<Transcript>(doubled).is_err());
    }
}
