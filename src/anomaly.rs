//! Data-quality anomalies observed while building the lineage.
//!
//! Anomalies are data, not errors. The pipeline keeps going when it meets
//! one and returns the full list alongside its product, so nothing the
//! source register contains disappears without a trace.

use serde::Serialize;
use std::fmt;

/// A non-fatal defect in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A raw record was unusable and dropped before reaching the graph.
    RecordDropped {
        /// Source sequence number, when one could still be read.
        number: Option<u32>,
        reason: String,
    },
    /// A record listed a person as their own supervisor; that edge was
    /// dropped, the rest of the record kept.
    SelfSupervision { record: u32, name: String },
    /// A non-empty date could not be parsed or repaired; the record was
    /// kept without a date.
    UnparsedDate { record: u32, raw: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::RecordDropped { number: Some(n), reason } => {
                write!(f, "record {n} dropped: {reason}")
            }
            Anomaly::RecordDropped { number: None, reason } => {
                write!(f, "record dropped: {reason}")
            }
            Anomaly::SelfSupervision { record, name } => {
                write!(f, "record {record}: {name} listed as their own supervisor")
            }
            Anomaly::UnparsedDate { record, raw } => {
                write!(f, "record {record}: date {raw:?} left unparsed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let dropped = Anomaly::RecordDropped {
            number: Some(7),
            reason: "no usable student name".to_string(),
        };
        assert_eq!(dropped.to_string(), "record 7 dropped: no usable student name");

        let cycle = Anomaly::SelfSupervision {
            record: 12,
            name: "Arne Jensen".to_string(),
        };
        assert_eq!(
            cycle.to_string(),
            "record 12: Arne Jensen listed as their own supervisor"
        );

        let date = Anomaly::UnparsedDate {
            record: 3,
            raw: "99-99-9999".to_string(),
        };
        assert_eq!(date.to_string(), "record 3: date \"99-99-9999\" left unparsed");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let anomaly = Anomaly::UnparsedDate {
            record: 3,
            raw: "banana".to_string(),
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["kind"], "unparsed_date");
        assert_eq!(json["record"], 3);
        assert_eq!(json["raw"], "banana");
    }
}
