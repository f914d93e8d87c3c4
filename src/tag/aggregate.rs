//! Deduplication and ordering of decomposed tags
//!
//! Output order:
//! 1. the highest release seen (omitted when there is none)
//! 2. branches, ascending
//! 3. releases, ascending
//!
//! Each bucket keeps one tag per version-or-branch label: the highest build.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::tag::decompose::Tag;
use crate::tag::types::TagOption;

/// Accumulates tags for a single aggregation pass
#[derive(Debug, Default)]
pub struct TagAggregator {
    branches: BTreeMap<String, Tag>,
    releases: BTreeMap<String, Tag>,
    latest_release: Option<Tag>,
}

impl TagAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_path(&mut self, path: &str) {
        self.push(Tag::parse(path));
    }

    pub fn push(&mut self, tag: Tag) {
        if tag.is_release() {
            // Tracked across all labels, not per bucket key
            if tag.compare(self.latest_release.as_ref()).is_gt() {
                self.latest_release = Some(tag.clone());
            }
            keep_highest(&mut self.releases, tag);
        } else {
            keep_highest(&mut self.branches, tag);
        }
    }

    /// The highest release pushed so far
    pub fn latest_release(&self) -> Option<&Tag> {
        self.latest_release.as_ref()
    }

    pub fn finish(self) -> Vec<Tag> {
        debug!(
            "Aggregated {} branches and {} releases, latest release: {:?}",
            self.branches.len(),
            self.releases.len(),
            self.latest_release.as_ref().map(Tag::raw_tag)
        );

        let mut ordered = Vec::with_capacity(1 + self.branches.len() + self.releases.len());
        ordered.extend(self.latest_release);
        ordered.extend(sorted(self.branches));
        ordered.extend(sorted(self.releases));
        ordered
    }
}

/// Keys are label strings; the comparator only picks which tag survives.
fn keep_highest(bucket: &mut BTreeMap<String, Tag>, tag: Tag) {
    match bucket.entry(tag.version_or_branch().to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(tag);
        }
        Entry::Occupied(mut entry) => {
            if tag.compare(Some(entry.get())).is_gt() {
                entry.insert(tag);
            }
        }
    }
}

/// Stable sort over label order, so equal-ranking labels stay deterministic.
fn sorted(bucket: BTreeMap<String, Tag>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = bucket.into_values().collect();
    tags.sort_by(|a, b| a.compare(Some(b)));
    tags
}

/// Decompose, deduplicate and order a list of repository paths.
pub fn aggregate<I, S>(paths: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = TagAggregator::new();
    for path in paths {
        aggregator.push_path(path.as_ref());
    }
    aggregator.finish()
}

/// Same as [`aggregate`], rendered as `artifactId:rawTag` options.
pub fn aggregate_options<I, S>(paths: I) -> Vec<TagOption>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate(paths).iter().map(TagOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paths(tags: &[&str]) -> Vec<String> {
        tags.iter()
            .map(|tag| format!("v2/COMP_NAME/manifests/{}", tag))
            .collect()
    }

    fn names(tags: &[&str]) -> Vec<String> {
        aggregate_options(paths(tags))
            .into_iter()
            .map(|option| option.name)
            .collect()
    }

    #[rstest]
    #[case(&["sprint-11_4"], &["COMP_NAME:sprint-11_4"])]
    #[case(
        &["sprint-11_4", "branch-foo_3"],
        &["COMP_NAME:branch-foo_3", "COMP_NAME:sprint-11_4"]
    )]
    #[case(
        &["sprint-11_3", "sprint-11_4", "branch-foo_3", "branch-foo_2", "sprint-11_2", "branch-foo_1"],
        &["COMP_NAME:branch-foo_3", "COMP_NAME:sprint-11_4"]
    )]
    #[case(
        &["sprint-11_3", "sprint-11_4", "v3.1.2.3_4", "v3.1.2.2_1", "v3.1.2.3_3", "v3.1.2.2_2"],
        &["COMP_NAME:v3.1.2.3_4", "COMP_NAME:sprint-11_4", "COMP_NAME:v3.1.2.2_2", "COMP_NAME:v3.1.2.3_4"]
    )]
    #[case(
        &["sprint-11_3", "sprint-11_4", "v1.2.3_4", "v1.2.2_1", "v1.2.3_3", "v1.2.2_2"],
        &["COMP_NAME:v1.2.3_4", "COMP_NAME:sprint-11_4", "COMP_NAME:v1.2.2_2", "COMP_NAME:v1.2.3_4"]
    )]
    #[case(
        &["sprint_11-3", "sprint_11-4", "14.2.3-4", "2.2.2-1", "14.2.3-3", "2.2.2-2"],
        &["COMP_NAME:14.2.3-4", "COMP_NAME:sprint_11-4", "COMP_NAME:2.2.2-2", "COMP_NAME:14.2.3-4"]
    )]
    #[case(
        &["sprint_11-13", "sprint_11-4", "1.2.3-4", "1.2.2-21", "1.2.3-11", "1.2.2-2"],
        &["COMP_NAME:1.2.3-11", "COMP_NAME:sprint_11-13", "COMP_NAME:1.2.2-21", "COMP_NAME:1.2.3-11"]
    )]
    #[case(
        &["v3.1.2_5", "v3.1.2.1_1"],
        &["COMP_NAME:v3.1.2.1_1", "COMP_NAME:v3.1.2_5", "COMP_NAME:v3.1.2.1_1"]
    )]
    #[case(
        &["1.2.3.1", "1.2.3-4", "1.2.3-9"],
        &["COMP_NAME:1.2.3.1", "COMP_NAME:1.2.3-9", "COMP_NAME:1.2.3.1"]
    )]
    #[case(
        &["rc2.0.0", "1.9.0", "2.0.0"],
        &["COMP_NAME:2.0.0", "COMP_NAME:1.9.0", "COMP_NAME:rc2.0.0", "COMP_NAME:2.0.0"]
    )]
    fn aggregate_orders_latest_then_branches_then_releases(
        #[case] tags: &[&str],
        #[case] expected: &[&str],
    ) {
        assert_eq!(names(tags), expected);
    }

    #[test]
    fn aggregate_sorts_issue_branches_numerically() {
        let result = names(&[
            "sprint_11-13",
            "sprint_11-4",
            "1.2.3-4",
            "1.2.2-21",
            "1.2.3-11",
            "ISSUE-234-one-issue-2",
            "ISSUE-234-one-issue-12",
            "ISSUE-1000-another-issue-27",
            "ISSUE-1000-another-issue-13",
            "1.2.2-2",
        ]);

        assert_eq!(
            result,
            vec![
                "COMP_NAME:1.2.3-11",
                "COMP_NAME:ISSUE-234-one-issue-12",
                "COMP_NAME:ISSUE-1000-another-issue-27",
                "COMP_NAME:sprint_11-13",
                "COMP_NAME:1.2.2-21",
                "COMP_NAME:1.2.3-11",
            ]
        );
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert!(aggregate(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn aggregate_without_releases_has_no_latest_entry() {
        assert_eq!(
            names(&["develop", "main_7"]),
            vec!["COMP_NAME:develop", "COMP_NAME:main_7"]
        );
    }

    #[test]
    fn aggregate_is_idempotent() {
        let input = paths(&["sprint-11_3", "v1.2.3_4", "1.2.3_5", "v1.2.2_1", "develop"]);

        let first = aggregate_options(&input);
        let second = aggregate_options(&input);

        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_keeps_distinct_labels_that_rank_equal() {
        // `v1.2.3` and `1.2.3` are different keys even though they compare equal
        let result = names(&["v1.2.3", "1.2.3"]);

        assert_eq!(
            result,
            vec!["COMP_NAME:v1.2.3", "COMP_NAME:1.2.3", "COMP_NAME:v1.2.3"]
        );
    }

    #[test]
    fn push_keeps_first_of_equal_builds() {
        let mut aggregator = TagAggregator::new();
        aggregator.push_path("v2/app/manifests/develop_4");
        aggregator.push_path("v2/other/manifests/develop_04");

        let result = aggregator.finish();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to_string(), "app:develop_4");
    }

    #[test]
    fn latest_release_tracks_maximum_across_labels() {
        let mut aggregator = TagAggregator::new();
        for tag in ["1.2.2_9", "1.2.3_1", "1.2.2_10", "sprint-1_99"] {
            aggregator.push_path(&format!("v2/app/manifests/{}", tag));
        }

        assert_eq!(
            aggregator.latest_release().map(Tag::raw_tag),
            Some("1.2.3_1")
        );
    }
}
