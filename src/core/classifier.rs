use crate::domain::model::{ApprovalRecord, Classification, DenialRecord, SubjectEntry};
use std::collections::HashMap;

/// Terms in an academic year. Averages always divide by this, even when a
/// pair has fewer rows: a missing term counts as a zero.
pub const TERM_COUNT: f32 = 4.0;

/// Lowest passing average. A student exactly on the line passes.
pub const PASSING_GRADE: f32 = 5.0;

impl SubjectEntry {
    pub fn average(&self) -> f32 {
        self.accumulated_score / TERM_COUNT
    }

    pub fn is_failing(&self) -> bool {
        self.average() < PASSING_GRADE
    }
}

pub fn denial_reason(average: f32, subject: &str) -> String {
    format!(
        "Aluno reprovado por nota {} na matéria {}. ",
        format_score(average),
        subject
    )
}

/// Shortest decimal that reads back as the same `f32`, switching to
/// exponent notation (`1e-05`, `1e+06`) when the decimal exponent is below
/// -4 or at least 6.
pub fn format_score(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return format!("{}", value);
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return format!("{}", value),
    };

    if (-4..6).contains(&exponent) {
        format!("{}", value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Splits subject entries into approved and denied students.
///
/// Every failing entry adds a reason to its student's single denial record,
/// in entry order. A student with no failing entry is approved once per
/// entry, so a student passing three subjects appears three times.
pub fn classify(entries: &[SubjectEntry]) -> Classification {
    let mut denied: Vec<DenialRecord> = Vec::new();
    let mut denied_index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if entry.observed_terms != TERM_COUNT as usize {
            tracing::debug!(
                "{} ({}) has {} rows for {}; averaging over {} terms",
                entry.student_name,
                entry.student_id,
                entry.observed_terms,
                entry.subject,
                TERM_COUNT
            );
        }

        if !entry.is_failing() {
            continue;
        }

        let reason = denial_reason(entry.average(), &entry.subject);
        match denied_index.get(entry.student_id.as_str()) {
            Some(&position) => denied[position].reasons.push(reason),
            None => {
                denied_index.insert(entry.student_id.as_str(), denied.len());
                denied.push(DenialRecord {
                    student_id: entry.student_id.clone(),
                    student_name: entry.student_name.clone(),
                    reasons: vec![reason],
                });
            }
        }
    }

    let approved: Vec<ApprovalRecord> = entries
        .iter()
        .filter(|entry| !denied_index.contains_key(entry.student_id.as_str()))
        .map(|entry| ApprovalRecord {
            student_id: entry.student_id.clone(),
            student_name: entry.student_name.clone(),
        })
        .collect();

    tracing::debug!(
        "Classified {} entries: {} approval rows, {} denied students",
        entries.len(),
        approved.len(),
        denied.len()
    );

    Classification { approved, denied }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, subject: &str, total: f32, terms: usize) -> SubjectEntry {
        SubjectEntry {
            student_id: id.to_string(),
            student_name: name.to_string(),
            subject: subject.to_string(),
            accumulated_score: total,
            observed_terms: terms,
        }
    }

    #[test]
    fn test_average_always_divides_by_four() {
        assert_eq!(entry("001", "Ana", "Math", 30.0, 4).average(), 7.5);
        assert_eq!(entry("001", "Ana", "Math", 30.0, 3).average(), 7.5);
        assert_eq!(entry("001", "Ana", "Math", 8.0, 1).average(), 2.0);
    }

    #[test]
    fn test_exact_passing_grade_is_approved() {
        let result = classify(&[entry("001", "Ana", "Math", 20.0, 4)]);

        assert!(result.denied.is_empty());
        assert_eq!(
            result.approved,
            vec![ApprovalRecord {
                student_id: "001".to_string(),
                student_name: "Ana".to_string(),
            }]
        );
    }

    #[test]
    fn test_just_below_passing_grade_is_denied() {
        let result = classify(&[entry("001", "Ana", "Math", 19.96, 4)]);

        assert!(result.approved.is_empty());
        assert_eq!(result.denied.len(), 1);
    }

    #[test]
    fn test_failing_subjects_accumulate_into_one_denial() {
        let entries = vec![
            entry("002", "Bob", "Physics", 3.0, 4),
            entry("002", "Bob", "Math", 30.0, 4),
            entry("002", "Bob", "Chemistry", 8.0, 4),
        ];

        let result = classify(&entries);

        assert!(result.approved.is_empty());
        assert_eq!(result.denied.len(), 1);
        assert_eq!(
            result.denied[0].reasons,
            vec![
                "Aluno reprovado por nota 0.75 na matéria Physics. ".to_string(),
                "Aluno reprovado por nota 2 na matéria Chemistry. ".to_string(),
            ]
        );
        assert_eq!(
            result.denied[0].motivo(),
            "Aluno reprovado por nota 0.75 na matéria Physics. Aluno reprovado por nota 2 na matéria Chemistry. "
        );
    }

    #[test]
    fn test_approval_is_emitted_per_passing_entry() {
        let entries = vec![
            entry("001", "Ana", "Math", 30.0, 4),
            entry("001", "Ana", "History", 28.0, 4),
            entry("003", "Caio", "Math", 36.0, 4),
        ];

        let result = classify(&entries);

        let ids: Vec<&str> = result
            .approved
            .iter()
            .map(|a| a.student_id.as_str())
            .collect();
        assert_eq!(ids, vec!["001", "001", "003"]);
    }

    #[test]
    fn test_one_failing_subject_blocks_every_approval() {
        let entries = vec![
            entry("001", "Ana", "Math", 30.0, 4),
            entry("001", "Ana", "History", 4.0, 4),
            entry("002", "Bob", "Math", 30.0, 4),
        ];

        let result = classify(&entries);

        assert_eq!(result.denied.len(), 1);
        assert_eq!(result.denied[0].student_id, "001");
        assert_eq!(result.approved.len(), 1);
        assert_eq!(result.approved[0].student_id, "002");
    }

    #[test]
    fn test_denials_keep_first_failure_order() {
        let entries = vec![
            entry("003", "Caio", "Art", 0.0, 4),
            entry("001", "Ana", "Math", 0.0, 4),
            entry("003", "Caio", "Music", 0.0, 4),
        ];

        let result = classify(&entries);

        assert_eq!(result.denied.len(), 2);
        assert_eq!(result.denied[0].student_id, "003");
        assert_eq!(result.denied[0].reasons.len(), 2);
        assert_eq!(result.denied[1].student_id, "001");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.5), "7.5");
        assert_eq!(format_score(0.75), "0.75");
        assert_eq!(format_score(4.0), "4");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(4.9), "4.9");
        assert_eq!(format_score(0.0001), "0.0001");
        assert_eq!(format_score(0.00001), "1e-05");
        assert_eq!(format_score(999999.0), "999999");
        assert_eq!(format_score(1e6), "1e+06");
        assert_eq!(format_score(-1e7), "-1e+07");
        assert_eq!(format_score(1.5e6), "1.5e+06");
        assert_eq!(format_score(-2.5), "-2.5");
    }

    #[test]
    fn test_large_negative_average_uses_exponent_form() {
        let result = classify(&[entry("001", "Ana", "M", -4e7, 4)]);

        assert_eq!(
            result.denied[0].motivo(),
            "Aluno reprovado por nota -1e+07 na matéria M. "
        );
    }

    #[test]
    fn test_empty_entries() {
        assert_eq!(classify(&[]), Classification::default());
    }
}
