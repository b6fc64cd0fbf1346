//! # Spillway Codec
//!
//! Line-delimited record codec for Spillway segment files.
//!
//! Every item is stored as one compact JSON record. A segment body is its
//! records joined by `\n`, without a trailing line break:
//!
//! ```text
//! {"item":1}
//! {"item":2}
//! {"item":3}
//! ```
//!
//! ## Usage
//!
//! ```
//! use spillway_codec::{decode_segment, encode_record, join_records};
//!
//! let records: Vec<String> = [1u32, 2, 3].iter().map(|n| encode_record(n).unwrap()).collect();
//! let body = join_records(&records);
//! assert_eq!(body, "1\n2\n3");
//!
//! let items: Vec<u32> = decode_segment(&body).unwrap();
//! assert_eq!(items, vec![1, 2, 3]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;

pub use decoder::{decode_record, decode_segment, split_records};
pub use encoder::{encode_record, join_records, RECORD_SEPARATOR};
pub use error::{CodecError, CodecResult};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Event {
        id: u64,
        label: String,
        tags: Vec<String>,
    }

    #[test]
    fn nested_structure_survives() {
        let event = Event {
            id: 9,
            label: "multi\nline \"quoted\"".into(),
            tags: vec!["a".into(), String::new()],
        };
        let record = encode_record(&event).unwrap();
        let decoded: Event = decode_record(&record, 0).unwrap();
        assert_eq!(decoded, event);
    }

    proptest! {
        #[test]
        fn arbitrary_strings_keep_record_count(items in proptest::collection::vec(".*", 1..20)) {
            let records: Vec<String> = items.iter().map(|s| encode_record(s).unwrap()).collect();
            let body = join_records(&records);
            prop_assert_eq!(split_records(&body).len(), items.len());
            let decoded: Vec<String> = decode_segment(&body).unwrap();
            prop_assert_eq!(decoded, items);
        }
    }
}
