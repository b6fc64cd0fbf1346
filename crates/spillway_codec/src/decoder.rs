//! Record decoding.

use crate::encoder::RECORD_SEPARATOR;
use crate::error::{CodecError, CodecResult};
use serde::de::DeserializeOwned;

/// Decodes one record produced by [`crate::encode_record`].
///
/// `index` is only used to annotate the error.
pub fn decode_record<T: DeserializeOwned>(record: &str, index: usize) -> CodecResult<T> {
    serde_json::from_str(record).map_err(|e| CodecError::decoding_failed(index, e.to_string()))
}

/// Splits a segment body into its raw records.
///
/// An empty body has no records. A trailing separator (left by a foreign
/// writer) does not produce an empty record.
pub fn split_records(body: &str) -> Vec<String> {
    if body.is_empty() {
        return Vec::new();
    }

    let body = body.strip_suffix(RECORD_SEPARATOR).unwrap_or(body);
    body.split(RECORD_SEPARATOR).map(str::to_owned).collect()
}

/// Decodes every record of a segment body, in order.
pub fn decode_segment<T: DeserializeOwned>(body: &str) -> CodecResult<Vec<T>> {
    split_records(body)
        .iter()
        .enumerate()
        .map(|(i, record)| decode_record(record, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        item: u32,
    }

    #[test]
    fn split_empty_body() {
        assert!(split_records("").is_empty());
    }

    #[test]
    fn split_ignores_trailing_separator() {
        assert_eq!(split_records("1\n2\n"), vec!["1", "2"]);
    }

    #[test]
    fn decode_segment_in_order() {
        let rows: Vec<Row> = decode_segment("{\"item\":1}\n{\"item\":2}").unwrap();
        assert_eq!(rows, vec![Row { item: 1 }, Row { item: 2 }]);
    }

    #[test]
    fn decode_error_reports_index() {
        let result: CodecResult<Vec<Row>> = decode_segment("{\"item\":1}\nnot json");
        match result {
            Err(CodecError::DecodingFailed { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected decoding failure, got {other:?}"),
        }
    }
}
