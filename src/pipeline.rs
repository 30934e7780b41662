//! Visible project list: filter, then stable sort.
//!
//! A pure function of the full list and the three control values (query,
//! tag, sort mode). Filtering keeps a project when the tag is empty or one of
//! its tags, and the trimmed lowercase query is empty or a substring of
//! [`Project::haystack`].

use crate::{
    model::Project,
    utils::{collate::locale_cmp, date::sort_timestamp},
};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Label of the synthetic tag option standing for "no tag filter".
pub const ALL_TAGS_LABEL: &str = "All tags";

/// Sort order of the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first; missing or unparseable dates last.
    #[default]
    Recent,
    /// By title, ascending.
    Alpha,
    /// Highest rating first; missing rating counts as zero.
    Stars,
}

impl SortMode {
    /// `"alpha"` and `"stars"` select those modes; any other value is recency.
    pub fn parse(value: &str) -> Self {
        match value {
            "alpha" => Self::Alpha,
            "stars" => Self::Stars,
            _ => Self::Recent,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Alpha => "alpha",
            Self::Stars => "stars",
        }
    }

    fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            Self::Alpha => locale_cmp(&a.title, &b.title),
            Self::Stars => rating(b).total_cmp(&rating(a)),
            Self::Recent => {
                sort_timestamp(b.date.as_deref()).cmp(&sort_timestamp(a.date.as_deref()))
            }
        }
    }
}

fn rating(project: &Project) -> f64 {
    project.stars.filter(|stars| stars.is_finite()).unwrap_or(0.0)
}

/// Projects passing the query and tag filter, in `sort` order.
pub fn visible_projects<'a>(
    all: &'a [Project],
    query: &str,
    tag: &str,
    sort: SortMode,
) -> Vec<&'a Project> {
    visible_indices(all, query, tag, sort)
        .into_iter()
        .map(|index| &all[index])
        .collect()
}

/// Like [`visible_projects`], as indices into `all`.
pub fn visible_indices(all: &[Project], query: &str, tag: &str, sort: SortMode) -> Vec<usize> {
    let query = query.trim().to_lowercase();

    let mut visible: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, p)| tag.is_empty() || p.has_tag(tag))
        .filter(|(_, p)| query.is_empty() || p.haystack().contains(&query))
        .map(|(index, _)| index)
        .collect();

    // `sort_by` is stable: equal keys keep input order
    visible.sort_by(|&a, &b| sort.compare(&all[a], &all[b]));
    visible
}

/// Every tag across all projects, deduplicated, in collation order.
pub fn tag_universe(all: &[Project]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut tags: Vec<&str> = all
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .filter(|tag| seen.insert(*tag))
        .collect();
    tags.sort_by(|a, b| locale_cmp(a, b));
    tags
}
