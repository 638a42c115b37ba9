//! Record ingestion and normalization.
//!
//! The register arrives as a flat JSON array of rows with free-text name,
//! supervisor and date cells. This module turns those rows into [`Record`]s
//! with canonical names and parsed dates, collecting an [`Anomaly`] for
//! everything it has to drop or leave unparsed along the way.

pub mod date;
pub mod name;

pub use date::{DateParser, YearRange};
pub use name::{AliasFileError, AliasTable, SupervisorSplitter};

use crate::anomaly::Anomaly;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors for records that cannot enter the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// No usable student name survived normalization.
    #[error("record {number}: no usable student name")]
    MalformedRecord { number: u32 },
}

pub type RecordResult<T> = Result<T, RecordError>;

/// One row of the source register, as fetched.
///
/// `number` tolerates both JSON integers and digit strings; the register's
/// export has contained both over the years. Fields the pipeline does not
/// use (pre-split dates, page anchors) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Source sequence number.
    #[serde(deserialize_with = "lenient_number")]
    pub number: u32,
    /// Student name, free text.
    pub name: String,
    /// Supervisor cell, possibly several names in one string.
    #[serde(default)]
    pub supervisors: String,
    /// Defense date cell, `DD-MM-YYYY` when well-formed.
    #[serde(default)]
    pub date_raw: String,
    /// Dissertation title.
    #[serde(default)]
    pub title: String,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Int(u64),
        Text(String),
    }
    match Lenient::deserialize(deserializer)? {
        Lenient::Int(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        Lenient::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A normalized register entry. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Source sequence number.
    pub id: u32,
    /// Canonical student name.
    pub student: String,
    /// Canonical supervisor names in source order, duplicates removed.
    pub supervisors: Vec<String>,
    /// Defense date, when one parses into the configured window.
    pub date: Option<NaiveDate>,
    /// The date cell exactly as fetched.
    pub raw_date: String,
    /// Dissertation title.
    pub title: String,
}

impl Record {
    /// Defense year, when the date is known.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

/// Turns raw register rows into normalized records.
///
/// Holds the document-level configuration: the alias table and the
/// plausible-year window. Pure in the sense that the same input always
/// produces the same record.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: AliasTable,
    dates: DateParser,
    splitter: SupervisorSplitter,
}

impl Normalizer {
    pub fn new(aliases: AliasTable, years: YearRange) -> Self {
        Normalizer {
            aliases,
            dates: DateParser::new(years),
            splitter: SupervisorSplitter::new(),
        }
    }

    /// Normalize one raw record.
    ///
    /// Fails only when no student name survives cleanup; every other defect
    /// degrades the record instead of dropping it.
    pub fn normalize(&self, raw: &RawRecord) -> RecordResult<Record> {
        let student = self.aliases.canonicalize(&raw.name);
        if student.is_empty() {
            return Err(RecordError::MalformedRecord { number: raw.number });
        }

        let mut supervisors: Vec<String> = Vec::new();
        for part in self.splitter.split(&raw.supervisors) {
            let canonical = self.aliases.canonicalize(part);
            if !canonical.is_empty() && !supervisors.contains(&canonical) {
                supervisors.push(canonical);
            }
        }

        Ok(Record {
            id: raw.number,
            student,
            supervisors,
            date: self.dates.parse(&raw.date_raw),
            raw_date: raw.date_raw.clone(),
            title: raw.title.trim().to_string(),
        })
    }

    /// Normalize a batch, isolating per-record defects.
    ///
    /// Dropped records and unrepaired dates come back as anomalies; an
    /// empty date cell is normal (older entries have none) and reports
    /// nothing.
    pub fn normalize_all(&self, raws: &[RawRecord]) -> (Vec<Record>, Vec<Anomaly>) {
        let mut records = Vec::with_capacity(raws.len());
        let mut anomalies = Vec::new();
        for raw in raws {
            match self.normalize(raw) {
                Ok(record) => {
                    if record.date.is_none() && !record.raw_date.trim().is_empty() {
                        warn!(record = record.id, raw = %record.raw_date, "date left unparsed");
                        anomalies.push(Anomaly::UnparsedDate {
                            record: record.id,
                            raw: record.raw_date.clone(),
                        });
                    }
                    records.push(record);
                }
                Err(err) => {
                    warn!(number = raw.number, %err, "record dropped");
                    anomalies.push(Anomaly::RecordDropped {
                        number: Some(raw.number),
                        reason: err.to_string(),
                    });
                }
            }
        }
        (records, anomalies)
    }
}

impl Default for Normalizer {
    /// Built-in alias table, default year window.
    fn default() -> Self {
        Normalizer::new(AliasTable::builtin(), YearRange::default())
    }
}
