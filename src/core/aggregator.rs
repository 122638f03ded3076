use crate::domain::model::{GradeRecord, SubjectEntry};
use std::collections::HashMap;

/// Merges grade rows into one entry per `(student_id, subject)` pair.
///
/// Entries come out in the order their pair is first seen in `records`. The
/// identity fields of an entry (student name and subject label) are those of
/// the pair's last row, so a later source can correct an earlier one's
/// spelling. Scores of every row for the pair are summed.
pub fn aggregate(records: &[GradeRecord]) -> Vec<SubjectEntry> {
    let mut entries: Vec<SubjectEntry> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for record in records {
        let key = (record.student_id.as_str(), record.subject.as_str());
        let position = *index.entry(key).or_insert_with(|| {
            entries.push(SubjectEntry {
                student_id: record.student_id.clone(),
                student_name: record.student_name.clone(),
                subject: record.subject.clone(),
                accumulated_score: 0.0,
                observed_terms: 0,
            });
            entries.len() - 1
        });

        let entry = &mut entries[position];
        entry.student_name.clone_from(&record.student_name);
        entry.subject.clone_from(&record.subject);
        entry.accumulated_score += record.score;
        entry.observed_terms += 1;
    }

    tracing::debug!(
        "Aggregated {} records into {} subject entries",
        records.len(),
        entries.len()
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_student_subject_pair() {
        let records = vec![
            GradeRecord::new("001", "Ana", "Math", 8.0, "T1"),
            GradeRecord::new("001", "Ana", "History", 6.0, "T1"),
            GradeRecord::new("002", "Bob", "Math", 3.0, "T1"),
            GradeRecord::new("001", "Ana", "Math", 9.0, "T2"),
            GradeRecord::new("002", "Bob", "Math", 4.0, "T2"),
        ];

        let entries = aggregate(&records);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].student_id, "001");
        assert_eq!(entries[0].subject, "Math");
        assert_eq!(entries[0].accumulated_score, 17.0);
        assert_eq!(entries[0].observed_terms, 2);
        assert_eq!(entries[1].subject, "History");
        assert_eq!(entries[1].accumulated_score, 6.0);
        assert_eq!(entries[2].student_id, "002");
        assert_eq!(entries[2].accumulated_score, 7.0);
    }

    #[test]
    fn test_entries_follow_first_seen_order() {
        let records = vec![
            GradeRecord::new("003", "Caio", "Art", 5.0, "T1"),
            GradeRecord::new("001", "Ana", "Math", 5.0, "T1"),
            GradeRecord::new("002", "Bob", "Math", 5.0, "T1"),
            GradeRecord::new("003", "Caio", "Art", 5.0, "T2"),
            GradeRecord::new("001", "Ana", "Math", 5.0, "T2"),
        ];

        let ids: Vec<String> = aggregate(&records)
            .into_iter()
            .map(|e| e.student_id)
            .collect();

        assert_eq!(ids, vec!["003", "001", "002"]);
    }

    #[test]
    fn test_identity_comes_from_last_occurrence() {
        let records = vec![
            GradeRecord::new("001", "Anna", "Math", 8.0, "T1"),
            GradeRecord::new("001", "Ana Paula", "Math", 9.0, "T2"),
            GradeRecord::new("001", "Ana", "Math", 7.0, "T3"),
        ];

        let entries = aggregate(&records);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_name, "Ana");
        assert_eq!(entries[0].accumulated_score, 24.0);
    }

    #[test]
    fn test_subject_match_is_exact() {
        let records = vec![
            GradeRecord::new("001", "Ana", "Math", 8.0, "T1"),
            GradeRecord::new("001", "Ana", "math", 2.0, "T1"),
            GradeRecord::new("001", "Ana", "Math ", 1.0, "T1"),
        ];

        assert_eq!(aggregate(&records).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}
