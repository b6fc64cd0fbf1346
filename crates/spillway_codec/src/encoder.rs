//! Record encoding.

use crate::error::{CodecError, CodecResult};
use serde::Serialize;

/// Separator between records in a segment body.
pub const RECORD_SEPARATOR: char = '\n';

/// Encodes a single item as one newline-free JSON record.
///
/// Compact JSON escapes control characters inside strings, so a well-formed
/// encoding never contains a raw line break. The check is kept anyway since a
/// custom `Serialize` impl can emit raw values.
pub fn encode_record<T: Serialize + ?Sized>(item: &T) -> CodecResult<String> {
    let record =
        serde_json::to_string(item).map_err(|e| CodecError::encoding_failed(e.to_string()))?;

    if record.contains(RECORD_SEPARATOR) {
        return Err(CodecError::EmbeddedNewline);
    }

    Ok(record)
}

/// Joins already-encoded records into a segment body.
///
/// Records are separated by a single line break with no trailing separator,
/// so a one-record body is exactly that record.
pub fn join_records<S: AsRef<str>>(records: &[S]) -> String {
    let capacity = records.iter().map(|r| r.as_ref().len() + 1).sum();
    let mut body = String::with_capacity(capacity);

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            body.push(RECORD_SEPARATOR);
        }
        body.push_str(record.as_ref());
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        item: u32,
    }

    fn encode_rows(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| encode_record(r).unwrap()).collect()
    }

    #[test]
    fn single_record_has_no_separator() {
        let body = join_records(&encode_rows(&[Row { item: 1 }]));
        assert_eq!(body, r#"{"item":1}"#);
    }

    #[test]
    fn records_joined_without_trailing_newline() {
        let body = join_records(&encode_rows(&[Row { item: 1 }, Row { item: 2 }]));
        assert_eq!(body, "{\"item\":1}\n{\"item\":2}");
    }

    #[test]
    fn strings_with_newlines_stay_on_one_line() {
        let record = encode_record("line one\nline two").unwrap();
        assert!(!record.contains('\n'));
        assert_eq!(record, r#""line one\nline two""#);
    }

    #[test]
    fn join_accepts_borrowed_records() {
        assert_eq!(join_records(&["7", "8", "9"]), "7\n8\n9");
    }

    #[test]
    fn empty_segment_body() {
        assert_eq!(join_records::<String>(&[]), "");
    }
}
