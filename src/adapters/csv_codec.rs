//! CSV encoding of the grade inputs and the two reports.
//!
//! Inputs are mapped by header name (`matricula,nome,materia,nota,trimestre`),
//! so column order is free and extra columns are ignored. Reports always carry
//! a header row, even when they have no data rows.

use crate::domain::model::{ApprovalRecord, DenialRecord, GradeRecord};
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::Serialize;

pub const APPROVED_HEADERS: [&str; 2] = ["matricula", "nome"];
pub const DENIED_HEADERS: [&str; 3] = ["matricula", "nome", "motivo"];

#[derive(Serialize)]
struct DeniedRow<'a> {
    matricula: &'a str,
    nome: &'a str,
    motivo: String,
}

/// Parses one source. Any row that does not deserialise aborts the whole source.
pub fn parse_grades(source_name: &str, data: &[u8]) -> Result<Vec<GradeRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);

    reader
        .deserialize::<GradeRecord>()
        .map(|row| {
            row.map_err(|source| EtlError::MalformedRowError {
                path: source_name.to_string(),
                source,
            })
        })
        .collect()
}

fn report_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

pub fn write_approved(records: &[ApprovalRecord]) -> Result<Vec<u8>> {
    let mut writer = report_writer();
    writer.write_record(APPROVED_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    finish(writer)
}

pub fn write_denied(records: &[DenialRecord]) -> Result<Vec<u8>> {
    let mut writer = report_writer();
    writer.write_record(DENIED_HEADERS)?;
    for record in records {
        writer.serialize(DeniedRow {
            matricula: &record.student_id,
            nome: &record.student_name,
            motivo: record.motivo(),
        })?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grades_by_header_name() {
        let data = "trimestre,nota,materia,nome,matricula,sala\nT1,8.5,Math,Ana,001,A\nT2,7,Math,Ana,001,A\n";

        let records = parse_grades("t.csv", data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], GradeRecord::new("001", "Ana", "Math", 8.5, "T1"));
        assert_eq!(records[1].score, 7.0);
    }

    #[test]
    fn test_parse_grades_keeps_row_order() {
        let data = "matricula,nome,materia,nota,trimestre\n002,Bob,Art,1,T1\n001,Ana,Math,9,T1\n";

        let records = parse_grades("t.csv", data.as_bytes()).unwrap();

        assert_eq!(records[0].student_id, "002");
        assert_eq!(records[1].student_id, "001");
    }

    #[test]
    fn test_parse_grades_rejects_non_numeric_score() {
        let data = "matricula,nome,materia,nota,trimestre\n001,Ana,Math,eight,T1\n";

        let err = parse_grades("in/t1.csv", data.as_bytes()).unwrap_err();

        match err {
            EtlError::MalformedRowError { path, .. } => assert_eq!(path, "in/t1.csv"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_grades_lenient_scores() {
        let data = "matricula,nome,materia,nota,trimestre\n001,Ana,Math, 8 ,T1\n001,Ana,Math,,T2\n001,Ana,Math,\"7,5\",T3\n";

        let records = parse_grades("t.csv", data.as_bytes()).unwrap();

        let scores: Vec<f32> = records.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![8.0, 0.0, 7.5]);
    }

    #[test]
    fn test_parse_grades_rejects_missing_column() {
        let data = "matricula,nome,materia,trimestre\n001,Ana,Math,T1\n";

        assert!(matches!(
            parse_grades("t.csv", data.as_bytes()),
            Err(EtlError::MalformedRowError { .. })
        ));
    }

    #[test]
    fn test_parse_grades_empty_source() {
        assert!(parse_grades("empty.csv", b"").unwrap().is_empty());
        assert!(parse_grades("header.csv", b"matricula,nome,materia,nota,trimestre\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_write_approved() {
        let records = vec![ApprovalRecord {
            student_id: "001".to_string(),
            student_name: "Ana".to_string(),
        }];

        let output = String::from_utf8(write_approved(&records).unwrap()).unwrap();

        assert_eq!(output, "matricula,nome\n001,Ana\n");
    }

    #[test]
    fn test_write_denied_joins_reasons() {
        let records = vec![DenialRecord {
            student_id: "002".to_string(),
            student_name: "Bob".to_string(),
            reasons: vec!["first. ".to_string(), "second. ".to_string()],
        }];

        let output = String::from_utf8(write_denied(&records).unwrap()).unwrap();

        assert_eq!(output, "matricula,nome,motivo\n002,Bob,first. second. \n");
    }

    #[test]
    fn test_empty_reports_still_have_headers() {
        assert_eq!(write_approved(&[]).unwrap(), b"matricula,nome\n");
        assert_eq!(write_denied(&[]).unwrap(), b"matricula,nome,motivo\n");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let records = vec![ApprovalRecord {
            student_id: "001".to_string(),
            student_name: "Silva, Ana".to_string(),
        }];

        let output = String::from_utf8(write_approved(&records).unwrap()).unwrap();

        assert_eq!(output, "matricula,nome\n001,\"Silva, Ana\"\n");
    }
}
