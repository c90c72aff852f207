//! Static copy for every scene of the journey.
//!
//! The engine only indexes into these tables; it never inspects the text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("content needs at least {required} bloom lines (got {found})")]
    TooFewLines { required: usize, found: usize },
    #[error("content JSON parsing error: {0}")]
    Json(String),
}

/// Copy shown on the intro scene.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntroText {
    pub title: String,
    pub subtitle: String,
    pub instruction: String,
    pub cta: String,
}

/// The two messages of the loading sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadingCopy {
    pub initial: String,
    pub personal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateCopy {
    pub question: String,
    pub hint: String,
    #[serde(default)]
    pub placeholder: String,
    pub error: String,
    pub welcome: String,
    pub submit: String,
}

/// Footer hints under the bloom line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomCopy {
    pub continue_hint: String,
    pub waiting_hint: String,
    #[serde(default = "BloomCopy::default_progress_label")]
    pub progress_label: String,
}

impl BloomCopy {
    fn default_progress_label() -> String {
        "Blooming".to_string()
    }
}

impl Default for BloomCopy {
    fn default() -> Self {
        Self {
            continue_hint: String::new(),
            waiting_hint: String::new(),
            progress_label: Self::default_progress_label(),
        }
    }
}

/// The closing letter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Letter {
    pub title: String,
    pub body: Vec<String>,
    pub signature: String,
    pub footer: String,
    #[serde(default)]
    pub replay: String,
    #[serde(default)]
    pub closing: String,
}

impl Letter {
    /// Signature split on line breaks, in display order.
    pub fn signature_lines(&self) -> impl Iterator<Item = &str> {
        self.signature.lines()
    }
}

/// Every text table the presentation needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    pub intro: IntroText,
    pub loading: LoadingCopy,
    pub gate: GateCopy,
    #[serde(default)]
    pub bloom: BloomCopy,
    pub lines: Vec<String>,
    pub letter: Letter,
}

impl Content {
    /// Parse content from JSON and check it covers `total_stages` bloom lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or too few lines are present.
    pub fn from_json(json: &str, total_stages: u8) -> Result<Self, ContentError> {
        let content: Self =
            serde_json::from_str(json).map_err(|err| ContentError::Json(err.to_string()))?;
        content.validate(total_stages)?;
        Ok(content)
    }

    /// # Errors
    ///
    /// Returns [`ContentError::TooFewLines`] when a stage has no line to show.
    pub fn validate(&self, total_stages: u8) -> Result<(), ContentError> {
        let required = usize::from(total_stages);
        if self.lines.len() < required {
            return Err(ContentError::TooFewLines {
                required,
                found: self.lines.len(),
            });
        }
        Ok(())
    }

    /// Line for a bloom step; steps start at 1, the intro (0) has none.
    #[must_use]
    pub fn line_for_step(&self, step: u8) -> Option<&str> {
        let idx = usize::from(step).checked_sub(1)?;
        self.lines.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Content {
        Content {
            lines: (1..=7).map(|n| format!("line {n}")).collect(),
            letter: Letter {
                signature: "With love,\nMe".into(),
                ..Letter::default()
            },
            ..Content::default()
        }
    }

    #[test]
    fn line_lookup_is_one_based() {
        let content = sample();
        assert_eq!(content.line_for_step(0), None);
        assert_eq!(content.line_for_step(1), Some("line 1"));
        assert_eq!(content.line_for_step(7), Some("line 7"));
        assert_eq!(content.line_for_step(8), None);
    }

    #[test]
    fn validation_requires_a_line_per_stage() {
        let mut content = sample();
        assert_eq!(content.validate(7), Ok(()));
        content.lines.truncate(5);
        assert_eq!(
            content.validate(7),
            Err(ContentError::TooFewLines {
                required: 7,
                found: 5
            })
        );
    }

    #[test]
    fn signature_splits_on_newlines() {
        let content = sample();
        let lines: Vec<_> = content.letter.signature_lines().collect();
        assert_eq!(lines, vec!["With love,", "Me"]);
    }
}
