//! CSV encoding and decoding of [`Table`]s.

use super::table::{Column, Table, TableRow};
use crate::error::{Error, Result};
use crate::model::ContentType;
use std::collections::HashMap;

/// Quote a field if it contains a comma, quote or line break.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Encode a table: header row, then one line per row.
pub fn to_csv(table: &Table) -> String {
    let mut out = String::new();

    let header: Vec<&str> = table.columns().iter().map(Column::name).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in table.rows() {
        let fields: Vec<String> = table
            .columns()
            .iter()
            .map(|c| csv_escape(&row.value(*c)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Decode CSV text produced by [`to_csv`] (or any RFC 4180-style writer).
///
/// Columns outside the canonical set are ignored and missing ones read as
/// empty. `text_length` is recomputed from the excerpt.
pub fn from_csv(input: &str) -> Result<Table> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = parse_records(input)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| Error::Csv("missing header row".to_string()))?;
    let positions: HashMap<Column, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(i, name)| Column::from_name(name).map(|c| (c, i)))
        .collect();

    let mut rows = Vec::new();
    for (line, record) in records.enumerate() {
        let cell = |column: Column| -> String {
            positions
                .get(&column)
                .and_then(|&i| record.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let issue = cell(Column::IssueNumber);
        let issue_number = match issue.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().map_err(|_| {
                Error::Csv(format!("row {}: invalid issue number {:?}", line + 1, raw))
            })?),
        };

        let text_excerpt = cell(Column::TextExcerpt);
        rows.push(TableRow {
            date: cell(Column::Date),
            issue_number,
            headline: cell(Column::Headline),
            section: cell(Column::Section),
            content_type: ContentType::from_label(&cell(Column::Type)),
            author: cell(Column::Author),
            text_length: text_excerpt.chars().count(),
            text_excerpt,
        });
    }

    let mut columns: Vec<Column> = positions.into_keys().collect();
    columns.sort();
    Ok(Table::new(rows).with_columns(columns.iter().map(Column::name)))
}

/// Split CSV text into records of fields, honouring quoted fields.
fn parse_records(input: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Csv("unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    // blank line
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    records.push(record);
}
