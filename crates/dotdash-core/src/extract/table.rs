//! Delimited table (CSV) extraction.

use csv::{ReaderBuilder, StringRecord};
use tracing::{trace, warn};

use crate::error::ExtractError;
use crate::models::config::CsvConfig;

/// Flatten a delimited table into lines of space-separated fields.
///
/// When `skip_header` is set the first record is discarded even if it holds
/// data; files without a header lose their first row. Lines are broken at
/// `\n`, `\r\n`, a bare `\r` and the other Unicode line boundaries. A quoted
/// field left open at a line break continues on the next line, with the
/// break itself dropped.
pub fn extract_table(data: &[u8], options: &CsvConfig) -> Result<String, ExtractError> {
    let text = std::str::from_utf8(data)?;
    let skip = usize::from(options.skip_header);

    let rows: Vec<String> = records(text, options.delimiter)
        .into_iter()
        .skip(skip)
        .map(|(line_number, record)| parse_row(&record, options.delimiter, line_number))
        .collect();

    trace!("Flattened {} table rows", rows.len());
    Ok(rows.join("\n"))
}

/// Group lines into records, tagged with the line each record starts on.
fn records(text: &str, delimiter: char) -> Vec<(usize, String)> {
    let mut records: Vec<(usize, String)> = Vec::new();
    let mut open = false;

    for (index, line) in split_lines(text).into_iter().enumerate() {
        match records.last_mut() {
            Some((_, record)) if open => record.push_str(line),
            _ => records.push((index + 1, line.to_string())),
        }
        if let Some((_, record)) = records.last() {
            open = quote_open(record, delimiter);
        }
    }
    records
}

/// Split on the Unicode line boundaries: `\n`, `\r\n`, `\r`, VT, FF, FS, GS,
/// RS, NEL, LS and PS. A trailing break does not produce an empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let end = match c {
            '\r' => match chars.peek() {
                Some(&(j, '\n')) => {
                    chars.next();
                    j + 1
                }
                _ => i + 1,
            },
            '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => i + c.len_utf8(),
            _ => continue,
        };
        lines.push(&text[start..i]);
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Whether `record` ends inside a quoted field.
///
/// Quotes only open a field at its start; `""` inside a quoted field is an
/// escaped quote.
fn quote_open(record: &str, delimiter: char) -> bool {
    let mut in_quotes = false;
    let mut field_start = true;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
        } else if c == delimiter {
            field_start = true;
            continue;
        } else if c == '"' && field_start {
            in_quotes = true;
        }
        field_start = false;
    }
    in_quotes
}

/// Parse one line as a delimited row and join its fields with a space.
fn parse_row(line: &str, delimiter: char, line_number: usize) -> String {
    if !delimiter.is_ascii() {
        return split_row(line, delimiter);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().collect::<Vec<_>>().join(" "),
        Ok(false) => String::new(),
        Err(e) => {
            warn!("Malformed row on line {}: {}, splitting on delimiter", line_number, e);
            split_row(line, delimiter)
        }
    }
}

fn split_row(line: &str, delimiter: char) -> String {
    line.split(delimiter).collect::<Vec<_>>().join(" ")
}
