//! Date parsing and year repair.
//!
//! Register dates are `DD-MM-YYYY`. The year segment carries a known defect
//! family from manual entry: a dropped digit ("215" for 2015), a dropped
//! century ("98" for 1998) and a doubled keystroke ("20015" for 2015). A
//! repair is accepted only when the plausible-year window admits exactly one
//! reading; anything ambiguous stays unparsed rather than guessed.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

/// Inclusive window of years a record date may fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        YearRange { min, max }
    }

    /// Window from `min` through the next calendar year. The register lists
    /// defenses scheduled a few months ahead, so the current year alone is
    /// too tight.
    pub fn through_next_year(min: i32) -> Self {
        YearRange {
            min,
            max: Utc::now().year() + 1,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    /// The register's first dissertation year through next year.
    fn default() -> Self {
        YearRange::through_next_year(1975)
    }
}

/// Parses register dates against a [`YearRange`].
///
/// The segment pattern is compiled once per parser, so build one and reuse
/// it across a batch.
#[derive(Debug, Clone)]
pub struct DateParser {
    range: YearRange,
    segmented: Regex,
}

impl DateParser {
    pub fn new(range: YearRange) -> Self {
        DateParser {
            range,
            // year fragment of any length, so broken years can still be
            // pulled apart for repair; ASCII digits only, repair_year
            // slices the fragment by byte
            segmented: Regex::new(r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{1,6})$")
                .expect("date pattern"),
        }
    }

    /// Parse a raw date cell, repairing defective year fragments when the
    /// window admits exactly one reading. `None` means no in-window
    /// calendar date could be established.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        // %Y accepts 1-3 digit years too, so a defective fragment can
        // parse as an ancient date; anything out of window falls through
        // to repair
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d-%m-%Y") {
            if self.range.contains(date.year()) {
                return Some(date);
            }
        }
        let caps = self.segmented.captures(trimmed)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = self.repair_year(&caps[3])?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn repair_year(&self, fragment: &str) -> Option<i32> {
        match fragment.len() {
            4 => fragment.parse().ok().filter(|&y| self.range.contains(y)),
            2 => self.unique_candidate(self.century_candidates(fragment)),
            3 => self.unique_candidate(insertion_candidates(fragment)),
            5 => self.unique_candidate(collapse_candidates(fragment)),
            _ => None,
        }
    }

    /// The single in-window candidate, or `None` when there is none or the
    /// window admits more than one distinct reading.
    fn unique_candidate(&self, candidates: Vec<i32>) -> Option<i32> {
        let mut found = None;
        for year in candidates {
            if !self.range.contains(year) {
                continue;
            }
            match found {
                None => found = Some(year),
                Some(existing) if existing == year => {}
                Some(_) => return None,
            }
        }
        found
    }

    /// Two-digit fragment: the century was dropped. Every century the
    /// window spans is a candidate.
    fn century_candidates(&self, fragment: &str) -> Vec<i32> {
        let Ok(tail) = fragment.parse::<i32>() else {
            return Vec::new();
        };
        ((self.range.min / 100)..=(self.range.max / 100))
            .map(|century| century * 100 + tail)
            .collect()
    }
}

/// Three-digit fragment: one digit was dropped. Every single-digit
/// insertion at every position is a candidate.
fn insertion_candidates(fragment: &str) -> Vec<i32> {
    let mut out = Vec::new();
    for pos in 0..=fragment.len() {
        for digit in '0'..='9' {
            let mut candidate = String::with_capacity(fragment.len() + 1);
            candidate.push_str(&fragment[..pos]);
            candidate.push(digit);
            candidate.push_str(&fragment[pos..]);
            if let Ok(year) = candidate.parse::<i32>() {
                out.push(year);
            }
        }
    }
    out
}

/// Five-digit fragment: a doubled keystroke. Dropping one of each adjacent
/// equal pair gives the candidates.
fn collapse_candidates(fragment: &str) -> Vec<i32> {
    let bytes = fragment.as_bytes();
    let mut out = Vec::new();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == bytes[i + 1] {
            let mut candidate = String::with_capacity(fragment.len() - 1);
            candidate.push_str(&fragment[..i]);
            candidate.push_str(&fragment[i + 1..]);
            if let Ok(year) = candidate.parse::<i32>() {
                out.push(year);
            }
        }
    }
    out
}
