//! FROM/JOIN target discovery.
//!
//! Four independent patterns each propose candidate spans; a containment
//! reduction then keeps the most specific span at every location, so
//! `FROM dbo.Users` yields one reference and not one for `dbo.Users` plus one
//! for a shorter fragment of it.

use crate::sql::identifier::{ANY_IDENT, BRACKETED_IDENT, PLAIN_IDENT, strip_brackets};
use itertools::Itertools;
use regex::{Captures, Regex};
use serde::Serialize;
use std::{cmp::Reverse, sync::LazyLock};

/// A FROM/JOIN target inside one statement. Offsets are relative to the
/// statement text and cover the reference as written, brackets included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub schema: Option<String>,
    pub table: String,
    pub start_index: usize,
    pub length: usize,
    pub is_temp: bool,
}

impl TableReference {
    pub fn end_index(&self) -> usize {
        self.start_index + self.length
    }

    pub fn contains(&self, other: &TableReference) -> bool {
        self.start_index <= other.start_index && other.end_index() <= self.end_index()
    }
}

/// Which pattern proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ReferencePattern {
    #[display("[schema].table")]
    BracketedQualified,
    #[display("schema.table")]
    PlainQualified,
    #[display("[table]")]
    BracketedTable,
    #[display("table")]
    PlainTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub pattern: ReferencePattern,
    pub reference: TableReference,
}

static BRACKETED_QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:FROM|JOIN)\s+({BRACKETED_IDENT})\.({ANY_IDENT})"))
        .expect("bracketed qualified pattern")
});

static PLAIN_QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:FROM|JOIN)\s+({PLAIN_IDENT})\.({ANY_IDENT})"))
        .expect("plain qualified pattern")
});

static BRACKETED_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:FROM|JOIN)\s+({BRACKETED_IDENT})"))
        .expect("bracketed table pattern")
});

static PLAIN_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:FROM|JOIN)\s+({PLAIN_IDENT})")).expect("plain table pattern")
});

/// Every FROM/JOIN target of `statement`, de-duplicated, in source order.
pub fn find_table_references(statement: &str) -> Vec<TableReference> {
    dedupe_candidates(collect_candidates(statement))
}

/// Raw proposals of all four patterns, overlaps included.
pub fn collect_candidates(statement: &str) -> Vec<Candidate> {
    let qualified = [
        (ReferencePattern::BracketedQualified, &*BRACKETED_QUALIFIED),
        (ReferencePattern::PlainQualified, &*PLAIN_QUALIFIED),
    ];
    let single = [
        (ReferencePattern::BracketedTable, &*BRACKETED_TABLE),
        (ReferencePattern::PlainTable, &*PLAIN_TABLE),
    ];

    let qualified = qualified.into_iter().flat_map(|(pattern, regex)| {
        regex
            .captures_iter(statement)
            .filter_map(move |caps| candidate(statement, pattern, &caps, Some(1), 2))
    });
    let single = single.into_iter().flat_map(|(pattern, regex)| {
        regex
            .captures_iter(statement)
            .filter_map(move |caps| candidate(statement, pattern, &caps, None, 1))
    });
    qualified.chain(single).collect()
}

/// Keep the widest span at each location: sort by start, longest first, and
/// drop anything inside a span already kept.
pub fn dedupe_candidates(candidates: Vec<Candidate>) -> Vec<TableReference> {
    let mut kept: Vec<TableReference> = Vec::new();
    for candidate in candidates
        .into_iter()
        .sorted_by_key(|c| (c.reference.start_index, Reverse(c.reference.length)))
    {
        if !kept.iter().any(|k| k.contains(&candidate.reference)) {
            kept.push(candidate.reference);
        }
    }
    kept
}

fn candidate(
    statement: &str,
    pattern: ReferencePattern,
    caps: &Captures,
    schema_group: Option<usize>,
    table_group: usize,
) -> Option<Candidate> {
    let table = caps.get(table_group)?;
    let rest = &statement[table.end()..];

    // `schema.table` seen from the single-part patterns; the qualified ones own it.
    if schema_group.is_none() && rest.starts_with('.') {
        return None;
    }
    // `name(...)` is a table-valued function call.
    if rest.trim_start().starts_with('(') {
        return None;
    }

    let schema = schema_group.and_then(|g| caps.get(g));
    let start = schema.map_or(table.start(), |s| s.start());
    let name = strip_brackets(table.as_str());
    Some(Candidate {
        pattern,
        reference: TableReference {
            schema: schema.map(|s| strip_brackets(s.as_str()).to_string()),
            table: name.to_string(),
            start_index: start,
            length: table.end() - start,
            is_temp: name.starts_with('#'),
        },
    })
}
