use serde::{Deserialize, Deserializer, Serialize};
use std::num::ParseFloatError;

/// One raw input row: a single term's score for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(rename = "matricula")]
    pub student_id: String,
    #[serde(rename = "nome")]
    pub student_name: String,
    #[serde(rename = "materia")]
    pub subject: String,
    #[serde(rename = "nota", deserialize_with = "deserialize_score")]
    pub score: f32,
    #[serde(rename = "trimestre")]
    pub term: String,
}

impl GradeRecord {
    pub fn new(student_id: &str, student_name: &str, subject: &str, score: f32, term: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            subject: subject.to_string(),
            score,
            term: term.to_string(),
        }
    }
}

/// Reads a `nota` cell: surrounding spaces are ignored, an empty cell is a
/// zero and a decimal comma is accepted (`7,5`).
pub fn parse_score(raw: &str) -> std::result::Result<f32, ParseFloatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.replace(',', ".").parse::<f32>()
}

fn deserialize_score<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_score(&raw).map_err(|e| serde::de::Error::custom(format!("invalid nota '{}': {}", raw, e)))
}

/// Accumulated scores of one (student, subject) pair across all terms.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectEntry {
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
    pub accumulated_score: f32,
    /// Number of input rows that contributed to `accumulated_score`.
    pub observed_terms: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DenialRecord {
    pub student_id: String,
    pub student_name: String,
    pub reasons: Vec<String>,
}

impl DenialRecord {
    /// Reason text as written to the denied report: every reason, in order, without separator.
    pub fn motivo(&self) -> String {
        self.reasons.concat()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalRecord {
    #[serde(rename = "matricula")]
    pub student_id: String,
    #[serde(rename = "nome")]
    pub student_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub approved: Vec<ApprovalRecord>,
    pub denied: Vec<DenialRecord>,
}
