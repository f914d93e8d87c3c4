//! Decomposition of repository paths into tags
//!
//! Paths look like `v2/<artifactId>/manifests/<rawTag>`. The raw tag is split
//! into a version-or-branch label and an optional build suffix:
//!
//! - `1.2.3-4`        -> `1.2.3` + `-` + `4`
//! - `v3.1.2.3_4`     -> `v3.1.2.3` + `_` + `4`
//! - `sprint_11-13`   -> `sprint_11` + `-` + `13` (last separator wins)
//! - `ISSUE-1234-fix` -> `ISSUE-1234` + `-` + `fix`
//! - `1.2.3`          -> `1.2.3`, no build

use std::cmp::Ordering;
use std::fmt;

use crate::tag::classify::{TagKind, classify, version_marker_len};
use crate::tag::compare::VersionKey;

/// Characters that may introduce a build suffix
pub const BUILD_SEPARATORS: [char; 3] = ['_', '+', '-'];

/// Leading path segments longer than this are not stripped from the raw tag
const MAX_SEGMENT_CHARS: usize = 199;

/// Appended to the build of `rc`-prefixed releases so they rank as candidates
const RC_MARKER: &str = "rc";

/// One repository path's label, decomposed once and never mutated
#[derive(Debug, Clone)]
pub struct Tag {
    artifact_id: String,
    raw_tag: String,
    version_or_branch: String,
    build: String,
    separator: Option<char>,
    kind: TagKind,
    key: VersionKey,
}

impl Tag {
    /// Decompose a repository path. Never fails; odd input just produces an
    /// odd tag, which almost always classifies as a branch.
    pub fn parse(path: &str) -> Self {
        let raw_tag = raw_tag(path);
        let (version_or_branch, mut separator, build) = split_build(raw_tag);
        let mut build = build.to_string();
        let marker_len = version_marker_len(version_or_branch);

        if marker_len == Some(RC_MARKER.len()) {
            build.push_str(RC_MARKER);
            separator = separator.or(Some('-'));
        }

        let mut key = version_or_branch[marker_len.unwrap_or(0)..].to_string();
        if let Some(sep) = separator {
            key.push(sep);
            key.push_str(&build);
        }

        Self {
            artifact_id: artifact_id(path).to_string(),
            raw_tag: raw_tag.to_string(),
            version_or_branch: version_or_branch.to_string(),
            build,
            separator,
            kind: classify(version_or_branch),
            key: VersionKey::parse(key),
        }
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The final path segment, as published
    pub fn raw_tag(&self) -> &str {
        &self.raw_tag
    }

    /// The raw tag without its build suffix; the deduplication key
    pub fn version_or_branch(&self) -> &str {
        &self.version_or_branch
    }

    /// The build suffix, or `""`. For `rc`-prefixed releases this carries a
    /// trailing `rc` marker that is not part of the raw tag.
    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    /// Normalized ordering key: label without `v`/`rc` marker, plus
    /// separator and build
    pub fn comparison_key(&self) -> &str {
        self.key.as_str()
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn is_release(&self) -> bool {
        self.kind == TagKind::Release
    }

    /// Rank this tag against another. Anything ranks above `None`.
    pub fn compare(&self, other: Option<&Tag>) -> Ordering {
        match other {
            Some(other) => self.key.compare(&other.key),
            None => Ordering::Greater,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.artifact_id, self.raw_tag)
    }
}

/// Second path segment: drop `<first>/`, then everything from the next `/`.
fn artifact_id(path: &str) -> &str {
    let rest = match path.find('/') {
        Some(idx) if idx > 0 => &path[idx + 1..],
        _ => path,
    };
    match rest.find('/') {
        Some(idx) => &rest[..idx],
        None => rest,
    }
}

/// Strip every leading `<segment>/` whose segment is at most
/// `MAX_SEGMENT_CHARS` characters long.
fn raw_tag(path: &str) -> &str {
    let mut rest = path;
    while let Some((idx, _)) = rest
        .char_indices()
        .take(MAX_SEGMENT_CHARS + 1)
        .find(|&(_, c)| c == '/')
    {
        rest = &rest[idx + 1..];
    }
    rest
}

/// Split `<label><sep><alnum+>` at the last separator. The label must be
/// non-empty and the build purely ASCII alphanumeric.
pub(crate) fn split_build(raw_tag: &str) -> (&str, Option<char>, &str) {
    if let Some(idx) = raw_tag.rfind(BUILD_SEPARATORS) {
        let build = &raw_tag[idx + 1..];
        if idx > 0 && !build.is_empty() && build.chars().all(|c| c.is_ascii_alphanumeric()) {
            let separator = raw_tag[idx..].chars().next();
            return (&raw_tag[..idx], separator, build);
        }
    }
    (raw_tag, None, "")
}
