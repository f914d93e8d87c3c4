//! Dotted-segment ordering for tag comparison keys
//!
//! A key is split into its label and build suffix the same way tags are
//! (`1.2.3-4` -> `1.2.3` + `4`). The label is split on `.` into segments, and
//! each segment, like the build, into alternating numeric and alphabetic
//! parts (`rc6` -> `rc`, `6`). Runs of `_`, `+` and `-` only delimit parts.
//!
//! All label segments are compared before the build, so `1.2.3-9` <
//! `1.2.3.1-1`.
//!
//! Part ordering:
//! - numbers compare by value, whatever their digit width (`4` < `14`)
//! - recognized qualifiers: `alpha` < `beta` < `milestone` < `rc` < `snapshot`
//!   < `""`/`ga`/`final`/`release` < `sp`
//! - unrecognized text ranks above every qualifier, case-insensitively
//! - numbers rank above any text
//!
//! A missing part or segment compares like a release qualifier, so
//! `1.2.3` < `1.2.3.1` and `1.2.3` < `1.2.3-4`, but `1.2.3-rc` < `1.2.3`.

use std::cmp::Ordering;

use crate::tag::decompose::split_build;

const PART_DELIMITERS: [char; 3] = ['_', '+', '-'];

/// A normalized comparison key with its segments parsed up front
#[derive(Debug, Clone)]
pub struct VersionKey {
    text: String,
    segments: Vec<Vec<Part>>,
    build: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    /// Digits with leading zeros removed
    Number(String),
    Qualifier(Qualifier),
    /// Lowercased
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl VersionKey {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let (label, _, build) = split_build(&text);
        let segments = label.split('.').map(parse_segment).collect();
        let build = parse_segment(build);
        Self {
            text,
            segments,
            build,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Compare label segments, treating missing segments as empty, then
    /// the builds.
    pub fn compare(&self, other: &VersionKey) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                compare_parts(
                    self.segments.get(i).map_or(&[][..], Vec::as_slice),
                    other.segments.get(i).map_or(&[][..], Vec::as_slice),
                )
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| compare_parts(&self.build, &other.build))
    }
}

fn parse_segment(segment: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut rest = segment;

    while let Some(first) = rest.chars().next() {
        let numeric = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;

        if numeric {
            parts.push(Part::Number(run.trim_start_matches('0').to_string()));
            continue;
        }
        // "one-issue" stays a single part; only the edges are delimiters
        let word = run.trim_matches(PART_DELIMITERS);
        if !word.is_empty() {
            parts.push(classify_word(word));
        }
    }

    parts
}

fn classify_word(word: &str) -> Part {
    let word = word.to_lowercase();
    let qualifier = match word.as_str() {
        "alpha" | "a" => Qualifier::Alpha,
        "beta" | "b" => Qualifier::Beta,
        "milestone" | "m" => Qualifier::Milestone,
        "rc" | "cr" => Qualifier::Rc,
        "snapshot" => Qualifier::Snapshot,
        "ga" | "final" | "release" => Qualifier::Release,
        "sp" => Qualifier::Sp,
        _ => return Part::Text(word),
    };
    Part::Qualifier(qualifier)
}

fn compare_parts(a: &[Part], b: &[Part]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| match (a.get(i), b.get(i)) {
            (Some(a), Some(b)) => compare_part(a, b),
            (Some(a), None) => compare_to_missing(a),
            (None, Some(b)) => compare_to_missing(b).reverse(),
            (None, None) => Ordering::Equal,
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_to_missing(part: &Part) -> Ordering {
    match part {
        Part::Number(_) | Part::Text(_) => Ordering::Greater,
        Part::Qualifier(q) => q.cmp(&Qualifier::Release),
    }
}

fn compare_part(a: &Part, b: &Part) -> Ordering {
    match (a, b) {
        (Part::Number(a), Part::Number(b)) => compare_digits(a, b),
        (Part::Number(_), _) => Ordering::Greater,
        (_, Part::Number(_)) => Ordering::Less,
        (Part::Qualifier(a), Part::Qualifier(b)) => a.cmp(b),
        (Part::Qualifier(_), Part::Text(_)) => Ordering::Less,
        (Part::Text(_), Part::Qualifier(_)) => Ordering::Greater,
        (Part::Text(a), Part::Text(b)) => a.cmp(b),
    }
}

/// Numeric comparison on digit strings without leading zeros, so it never
/// overflows.
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
