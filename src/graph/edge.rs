//! Supervision edges.

/// One supervision relationship, hanging off a supervisor's adjacency
/// list: they supervised `student` on record `record`.
///
/// Parallel records between the same two people produce one `Supervision`
/// each. Traversal collapses them; provenance keeps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supervision {
    /// Canonical student name, the edge target.
    pub student: String,
    /// Source record id the edge came from.
    pub record: u32,
    /// Student's defense year on that record, when known.
    pub year: Option<i32>,
}

impl Supervision {
    pub fn new(student: impl Into<String>, record: u32, year: Option<i32>) -> Self {
        Supervision {
            student: student.into(),
            record,
            year,
        }
    }
}
