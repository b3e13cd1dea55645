//! Audit data types
//!
//! `AuditResult` mirrors the JSON array the analyze prompt asks for:
//! `[{"section": <name>, "details": <payload>}, ...]`. Section names are part
//! of the contract with the model and round-trip exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Metric names requested from the model, in prompt order
pub const METRIC_NAMES: [&str; 6] = [
    "Security",
    "Performance",
    "Other Key Areas",
    "Gas Efficiency",
    "Code Quality",
    "Documentation",
];

/// Highest score the model may assign to a metric
pub const MAX_SCORE: u8 = 10;

/// Fixed section keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    AuditReport,
    MetricScores,
    Suggestions,
}

impl SectionName {
    pub const ALL: [SectionName; 3] = [
        SectionName::AuditReport,
        SectionName::MetricScores,
        SectionName::Suggestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::AuditReport => "Audit Report",
            SectionName::MetricScores => "Metric Scores",
            SectionName::Suggestions => "Suggestions for Improvement",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownSection(s.to_string()))
    }
}

/// One `{metric, score}` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: String,
    pub score: u8,
}

/// One section of the audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "details")]
pub enum AuditSection {
    #[serde(rename = "Audit Report", deserialize_with = "text_details")]
    AuditReport(String),

    #[serde(rename = "Metric Scores")]
    MetricScores(Vec<MetricScore>),

    #[serde(rename = "Suggestions for Improvement", deserialize_with = "text_details")]
    Suggestions(String),
}

impl AuditSection {
    pub fn name(&self) -> SectionName {
        match self {
            AuditSection::AuditReport(_) => SectionName::AuditReport,
            AuditSection::MetricScores(_) => SectionName::MetricScores,
            AuditSection::Suggestions(_) => SectionName::Suggestions,
        }
    }
}

/// Accepts a string, a list of strings / `{text}` objects, or a single
/// `{text}` object, and joins list items with a blank line.
fn text_details<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    fn item_text(item: &Value) -> Option<&str> {
        match item {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("text").and_then(Value::as_str),
            _ => None,
        }
    }

    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(item_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
        Value::Object(_) => item_text(&value)
            .map(str::to_string)
            .ok_or_else(|| serde::de::Error::custom("details object has no 'text' field")),
        other => Err(serde::de::Error::custom(format!(
            "unsupported details value: {}",
            other
        ))),
    }
}

/// Structural problems in an otherwise well-formed JSON reply
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Missing section: {0}")]
    MissingSection(SectionName),

    #[error("Duplicate section: {0}")]
    DuplicateSection(SectionName),

    #[error("Score for '{metric}' out of range: {score} (expected 0-{max})", max = MAX_SCORE)]
    ScoreOutOfRange { metric: String, score: u8 },
}

/// The three-section audit payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AuditSection>", into = "Vec<AuditSection>")]
pub struct AuditResult {
    sections: Vec<AuditSection>,
}

impl TryFrom<Vec<AuditSection>> for AuditResult {
    type Error = ShapeError;

    fn try_from(sections: Vec<AuditSection>) -> Result<Self, Self::Error> {
        for name in SectionName::ALL {
            match sections.iter().filter(|s| s.name() == name).count() {
                0 => return Err(ShapeError::MissingSection(name)),
                1 => {}
                _ => return Err(ShapeError::DuplicateSection(name)),
            }
        }

        for section in &sections {
            if let AuditSection::MetricScores(scores) = section {
                if let Some(bad) = scores.iter().find(|m| m.score > MAX_SCORE) {
                    return Err(ShapeError::ScoreOutOfRange {
                        metric: bad.metric.clone(),
                        score: bad.score,
                    });
                }
            }
        }

        Ok(Self { sections })
    }
}

impl From<AuditResult> for Vec<AuditSection> {
    fn from(result: AuditResult) -> Self {
        result.sections
    }
}

impl AuditResult {
    /// Sections in the order the model returned them
    pub fn sections(&self) -> &[AuditSection] {
        &self.sections
    }

    pub fn section(&self, name: SectionName) -> Option<&AuditSection> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn report(&self) -> &str {
        self.sections
            .iter()
            .find_map(|s| match s {
                AuditSection::AuditReport(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn metric_scores(&self) -> &[MetricScore] {
        self.sections
            .iter()
            .find_map(|s| match s {
                AuditSection::MetricScores(scores) => Some(scores.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn suggestions(&self) -> &str {
        self.sections
            .iter()
            .find_map(|s| match s {
                AuditSection::Suggestions(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn score_for(&self, metric: &str) -> Option<u8> {
        self.metric_scores()
            .iter()
            .find(|m| m.metric.eq_ignore_ascii_case(metric))
            .map(|m| m.score)
    }
}

/// The model's rewritten contract source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedContract(String);

impl FixedContract {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FixedContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
