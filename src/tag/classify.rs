//! Release/branch classification
//!
//! A label is a release when it starts with two dot-separated digit runs,
//! optionally preceded by a `v` or `rc` marker:
//! - `1.2.3`, `v2.0.1`, `rc1.4` are releases
//! - `sprint-11`, `ISSUE-1234-bug-description`, `42` are branches

/// Whether a tag names a release or a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Release,
    Branch,
}

/// Classify a version-or-branch label.
///
/// Purely syntactic; the build suffix is never consulted.
pub fn classify(version_or_branch: &str) -> TagKind {
    if version_marker_len(version_or_branch).is_some() {
        TagKind::Release
    } else {
        TagKind::Branch
    }
}

/// Returns the length of the leading `v`/`rc` marker (0 when there is none)
/// if the rest of the label starts with `digits '.' digit`.
///
/// Returns `None` when the label is not shaped like a dotted version.
pub(crate) fn version_marker_len(label: &str) -> Option<usize> {
    let marker = if label.starts_with('v') {
        1
    } else if label.starts_with("rc") {
        2
    } else {
        0
    };

    starts_with_dotted_number(&label[marker..]).then_some(marker)
}

fn starts_with_dotted_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let major = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if major == 0 || bytes.get(major) != Some(&b'.') {
        return false;
    }
    bytes.get(major + 1).is_some_and(|b| b.is_ascii_digit())
}
