//! Canonical person names.
//!
//! Node identity in the lineage graph is the canonical name string, so
//! every spelling of a person has to collapse to one form before it is
//! used as a key. Whitespace is normalized for everyone; known variant
//! spellings go through the alias table, matched case- and
//! diacritic-insensitively. Unknown names pass through with their original
//! spelling intact.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors when loading an alias table from disk.
#[derive(Error, Debug)]
pub enum AliasFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("alias file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Collapse whitespace runs and trim. The only change applied to names the
/// alias table does not know.
pub fn tidy(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key form: lowercased, Danish vowels transliterated to their
/// digraphs (å → aa, æ → ae, ø → oe), other common Latin marks stripped.
/// Only alias matching sees this form; stored names keep their spelling.
fn fold(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        match ch {
            'å' => out.push_str("aa"),
            'æ' => out.push_str("ae"),
            'ø' => out.push_str("oe"),
            'á' | 'à' | 'â' | 'ä' | 'ã' => out.push('a'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ñ' => out.push('n'),
            'ç' => out.push('c'),
            'ß' => out.push_str("ss"),
            _ => out.push(ch),
        }
    }
    out
}

/// Known spelling variants mapped to one canonical form.
///
/// Lookup happens on the folded form of a whitespace-normalized name, so
/// "ivan  damgaard" and "Ivan Damgård" both reach "Ivan Bjerre Damgård".
/// Every canonical spelling also maps to itself, which keeps
/// [`canonicalize`](AliasTable::canonicalize) idempotent with any table.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    canonical: FxHashMap<String, String>,
}

impl AliasTable {
    /// Empty table: canonicalization reduces to whitespace cleanup.
    pub fn new() -> Self {
        AliasTable::default()
    }

    /// Table from `(variant, canonical)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = AliasTable::new();
        for (variant, canonical) in pairs {
            table.insert(variant.as_ref(), canonical.as_ref());
        }
        table
    }

    /// The register's known variants.
    pub fn builtin() -> Self {
        AliasTable::from_pairs([
            ("Ole Lehrmann", "Ole Lehrmann Madsen"),
            ("Clemens Klokmose", "Clemens Nylandsted Klokmose"),
            ("Christian N. S. Pedersen", "Christian N. Storm Pedersen"),
            ("Christian Nørgaard Storm Pedersen", "Christian N. Storm Pedersen"),
            ("Christian Storm Pedersen", "Christian N. Storm Pedersen"),
            ("Jesper Buus", "Jesper Buus Nielsen"),
            ("Ivan Damgaard", "Ivan Bjerre Damgård"),
            ("Ivan Damgård", "Ivan Bjerre Damgård"),
            ("Gerth S. Brodal", "Gerth Stølting Brodal"),
            ("Peter Mosses", "Peter D. Mosses"),
            ("Michael Schwartzbach", "Michael I. Schwartzbach"),
            ("Marianne Graves", "Marianne Graves Petersen"),
            ("Jakob Bardram", "Jakob Eyvind Bardram"),
        ])
    }

    /// Load a `{"variant": "canonical"}` JSON object.
    pub fn load(path: &Path) -> Result<Self, AliasFileError> {
        let text = fs::read_to_string(path)?;
        let pairs: BTreeMap<String, String> = serde_json::from_str(&text)?;
        Ok(AliasTable::from_pairs(pairs))
    }

    /// Register one variant. The canonical spelling is registered for
    /// itself at the same time.
    pub fn insert(&mut self, variant: &str, canonical: &str) {
        let canonical = tidy(canonical);
        self.canonical.insert(fold(&canonical), canonical.clone());
        self.canonical.insert(fold(&tidy(variant)), canonical);
    }

    /// Canonical form of one person name: whitespace-normalized, then
    /// resolved through the table. Unknown names come back tidied but
    /// otherwise untouched.
    pub fn canonicalize(&self, name: &str) -> String {
        let tidied = tidy(name);
        match self.canonical.get(&fold(&tidied)) {
            Some(canonical) => canonical.clone(),
            None => tidied,
        }
    }

    /// Number of folded keys in the table.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// Splits a supervisor cell into individual names.
///
/// The register joins co-supervisors with commas, "and", "&" or the Danish
/// "og". The word forms only delimit when surrounded by whitespace, so
/// names containing them as substrings survive.
#[derive(Debug, Clone)]
pub struct SupervisorSplitter {
    pattern: Regex,
}

impl SupervisorSplitter {
    pub fn new() -> Self {
        SupervisorSplitter {
            pattern: Regex::new(r",\s*|\s+and\s+|\s+&\s+|\s+og\s+").expect("delimiter pattern"),
        }
    }

    /// Split a cell and drop empty parts. No name normalization happens
    /// here; callers canonicalize each part themselves.
    pub fn split<'a>(&self, cell: &'a str) -> Vec<&'a str> {
        self.pattern
            .split(cell)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl Default for SupervisorSplitter {
    fn default() -> Self {
        SupervisorSplitter::new()
    }
}
