// src/utils/csv.rs

//! CSV import/export of the question bank.
//!
//! Row layout:
//! `question,option1,option2,option3,option4,correctAnswerIndex,category,difficulty,explanation,hint`
//!
//! Fields may be wrapped in double quotes to contain commas or line breaks;
//! `""` inside a quoted field is a literal quote. Quoted fields keep their
//! surrounding spaces. The header row is optional.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::question::{Question, is_valid_answer_index, new_question_id};

pub const CSV_HEADER: &str =
    "question,option1,option2,option3,option4,correctAnswerIndex,category,difficulty,explanation,hint";

pub const TEMPLATE_FILE_NAME: &str = "gyandeep_import.csv";

const TEMPLATE_EXAMPLE_ROW: &str =
    "\"Who is the PM of Nepal?\",\"A\",\"B\",\"C\",\"D\",0,gk,Easy,\"Explanation...\",\"Hint...\"";

/// Rows with fewer fields than this are skipped.
pub const MIN_FIELDS: usize = 6;

const DEFAULT_CATEGORY: &str = "gk";

// One field plus its trailing separator, anchored at the start of the rest of the line.
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*("(?:[^"]|"")*"|[^,]*?)\s*(,|$)"#).expect("field pattern is valid")
});

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("file is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Splits one record into fields. Unquoted fields are trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut rest = line;

    while let Some(caps) = FIELD.captures(rest) {
        let (Some(whole), Some(raw), Some(sep)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        fields.push(unquote(raw.as_str()));
        if sep.as_str().is_empty() {
            break;
        }
        rest = &rest[whole.end()..];
    }

    fields
}

fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    match raw
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => raw.to_string(),
    }
}

/// Parses uploaded file bytes. Fails only when the whole file is unreadable.
pub fn import(bytes: &[u8]) -> Result<Vec<Question>, CsvError> {
    let text = String::from_utf8(bytes.to_vec())?;
    Ok(parse(&text))
}

/// Parses CSV text into questions, skipping rows that cannot form one.
pub fn parse(text: &str) -> Vec<Question> {
    let lines = records(text);

    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let start = usize::from(first.to_lowercase().contains("question"));

    lines[start..]
        .iter()
        .filter_map(|line| {
            let row = parse_row(line);
            if row.is_none() {
                tracing::debug!("Skipping malformed CSV row: {}", line);
            }
            row
        })
        .collect()
}

/// Splits text into records on line breaks outside quoted fields.
fn records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                records.push(text[start..i].trim_end_matches('\r'));
                start = i + 1;
            }
            _ => {}
        }
    }
    records.push(text[start..].trim_end_matches('\r'));

    records.retain(|r| !r.trim().is_empty());
    records
}

fn parse_row(line: &str) -> Option<Question> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

    let correct_answer = field(5)
        .parse::<i64>()
        .ok()
        .filter(|i| is_valid_answer_index(*i))
        .unwrap_or(0) as u8;

    let category = match field(6) {
        "" => DEFAULT_CATEGORY.to_string(),
        c => c.to_lowercase(),
    };

    let hint = Some(field(9).to_string()).filter(|h| !h.is_empty());

    Some(Question {
        id: new_question_id(),
        category,
        sub_category: None,
        question: field(0).to_string(),
        options: [0, 1, 2, 3].map(|i| field(i + 1).to_string()),
        correct_answer,
        explanation: field(8).to_string(),
        hint,
        difficulty: field(7).parse().unwrap_or_default(),
        reference: None,
    })
}

/// The downloadable import template: header plus one example row.
pub fn template() -> String {
    format!("{}\n{}\n", CSV_HEADER, TEMPLATE_EXAMPLE_ROW)
}

/// Writes questions in the import format, header first.
pub fn export(questions: &[Question]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + questions.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for q in questions {
        let row = [
            quoted(&q.question),
            quoted(&q.options[0]),
            quoted(&q.options[1]),
            quoted(&q.options[2]),
            quoted(&q.options[3]),
            q.correct_answer.to_string(),
            plain(&q.category),
            q.difficulty.to_string(),
            quoted(&q.explanation),
            quoted(q.hint.as_deref().unwrap_or("")),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn plain(value: &str) -> String {
    if value.contains(|c: char| c == ',' || c == '"') {
        quoted(value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    #[test]
    fn template_round_trips_to_one_question() {
        let questions = parse(&template());
        assert_eq!(questions.len(), 1);

        let q = &questions[0];
        assert_eq!(q.question, "Who is the PM of Nepal?");
        assert_eq!(q.options, ["A", "B", "C", "D"].map(String::from));
        assert_eq!(q.correct_answer, 0);
        assert_eq!(q.category, "gk");
        assert_eq!(q.difficulty, Difficulty::Easy);
        assert_eq!(q.explanation, "Explanation...");
        assert_eq!(q.hint.as_deref(), Some("Hint..."));
    }

    #[test]
    fn export_then_import_keeps_field_values() {
        let original = parse(&template()).remove(0);
        let mut tricky = original.clone();
        tricky.question = "Which, of these, is \"true\"?".to_string();
        tricky.hint = None;
        tricky.correct_answer = 3;
        tricky.difficulty = Difficulty::Hard;

        let reimported = parse(&export(&[original.clone(), tricky.clone()]));
        assert_eq!(reimported.len(), 2);

        for (before, after) in [original, tricky].iter().zip(&reimported) {
            assert_ne!(before.id, after.id);
            assert_eq!(before.question, after.question);
            assert_eq!(before.options, after.options);
            assert_eq!(before.correct_answer, after.correct_answer);
            assert_eq!(before.category, after.category);
            assert_eq!(before.difficulty, after.difficulty);
            assert_eq!(before.explanation, after.explanation);
            assert_eq!(before.hint, after.hint);
        }
    }

    #[test]
    fn line_breaks_and_padding_survive_export() {
        let mut q = parse(&template()).remove(0);
        q.question = "  Padded question  ".to_string();
        q.options[2] = "two\r\nlines".to_string();
        q.explanation = "Line one\nLine two".to_string();

        let reimported = parse(&export(&[q.clone()]));
        assert_eq!(reimported.len(), 1);

        let after = &reimported[0];
        assert_eq!(after.question, q.question);
        assert_eq!(after.options, q.options);
        assert_eq!(after.explanation, "Line one\nLine two");
        assert_eq!(after.hint.as_deref(), Some("Hint..."));
    }

    #[test]
    fn unquoted_fields_are_trimmed() {
        let q = parse("  Q  , a ,b,c,d, 2 ,gk").remove(0);
        assert_eq!(q.question, "Q");
        assert_eq!(q.options[0], "a");
        assert_eq!(q.correct_answer, 2);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let fields = split_fields(r#""Kathmandu, Nepal", B ,"C",D"#);
        assert_eq!(fields, vec!["Kathmandu, Nepal", "B", "C", "D"]);
    }

    #[test]
    fn empty_fields_keep_their_position() {
        let fields = split_fields("q,a,b,c,d,1,,,,");
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[5], "1");
        assert_eq!(fields[9], "");
    }

    #[test]
    fn short_rows_are_skipped() {
        let text = "Q1,a,b,c,d,2,iq,Hard,exp,hint\nbroken,row,only\n\nQ2,a,b,c,d,1\n";
        let questions = parse(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[0].category, "iq");
        assert_eq!(questions[1].question, "Q2");
        assert_eq!(questions[1].category, "gk");
        assert_eq!(questions[1].difficulty, Difficulty::Medium);
        assert_eq!(questions[1].hint, None);
    }

    #[test]
    fn header_is_detected_only_when_present() {
        let with_header = format!("{}\r\nQ,a,b,c,d,0\r\n", CSV_HEADER);
        assert_eq!(parse(&with_header).len(), 1);

        let without_header = "Capital?,a,b,c,d,0\nRiver?,a,b,c,d,1\n";
        assert_eq!(parse(without_header).len(), 2);
    }

    #[test]
    fn bad_answer_index_falls_back_to_zero() {
        let questions = parse("Q,a,b,c,d,x\nR,a,b,c,d,9\n");
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.correct_answer == 0));
    }

    #[test]
    fn category_is_lowercased_and_difficulty_lenient() {
        let q = parse("Q,a,b,c,d,1,Banking,easy").remove(0);
        assert_eq!(q.category, "banking");
        assert_eq!(q.difficulty, Difficulty::Easy);
    }

    #[test]
    fn each_row_gets_a_unique_id() {
        let questions = parse("A,a,b,c,d,0\nB,a,b,c,d,0\nC,a,b,c,d,0\n");
        let mut ids: Vec<_> = questions.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn invalid_utf8_aborts_the_import() {
        assert!(import(&[0xff, 0xfe, b',']).is_err());
        assert_eq!(import(b"").unwrap().len(), 0);
    }

    #[test]
    fn devanagari_rows_parse() {
        let q = parse("\"नेपालको राजधानी?\",काठमाडौं,पोखरा,विराटनगर,ललितपुर,0,gk,Easy").remove(0);
        assert_eq!(q.question, "नेपालको राजधानी?");
        assert_eq!(q.options[0], "काठमाडौं");
    }
}
