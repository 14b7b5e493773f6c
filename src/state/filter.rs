//! Project catalog filter
//!
//! Combines free-text search, required tags and the letter filter into the
//! visible subset of the catalog. Every operation is total: no input is
//! rejected, and an empty result is a normal outcome.

use std::collections::BTreeSet;
use std::fmt;

use super::catalog::Catalog;
use super::data::ProjectRecord;
use super::index::{Initial, TagIndex};

/// User-controlled filter inputs for one session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text query, kept verbatim
    pub search_text: String,
    /// Tags a project must all carry
    pub selected_tags: BTreeSet<String>,
    /// Restricts to projects with a tag under this letter
    pub active_initial: Option<Initial>,
}

impl FilterState {
    /// The query to match with, or `None` when it is blank
    fn query(&self) -> Option<String> {
        normalized_query(&self.search_text)
    }

    /// True when no dimension narrows the catalog
    pub fn is_unfiltered(&self) -> bool {
        self.query().is_none() && self.selected_tags.is_empty() && self.active_initial.is_none()
    }
}

fn normalized_query(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

/// Whether `project` passes all three filter dimensions.
/// `query` must already be lowercased.
fn matches(project: &ProjectRecord, index: &TagIndex, state: &FilterState, query: Option<&str>) -> bool {
    if let Some(query) = query {
        let found = project.name.to_lowercase().contains(query)
            || project.description.to_lowercase().contains(query)
            || project.techs.iter().any(|t| t.to_lowercase().contains(query));
        if !found {
            return false;
        }
    }

    if !state.selected_tags.iter().all(|tag| project.has_tech(tag)) {
        return false;
    }

    if let Some(initial) = state.active_initial {
        let bucket = index.tags_for(initial);
        if !project.techs.iter().any(|t| bucket.contains(t)) {
            return false;
        }
    }

    true
}

/// The visible subset of `projects`, in catalog order
pub fn apply<'a>(projects: &'a [ProjectRecord], index: &TagIndex, state: &FilterState) -> Vec<&'a ProjectRecord> {
    let query = state.query();
    projects
        .iter()
        .filter(|p| matches(p, index, state, query.as_deref()))
        .collect()
}

/// Tag suggestions for the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions<'a> {
    /// The query is empty or blank
    Idle,
    /// Tags containing the query, sorted; may be empty
    Matches(Vec<&'a str>),
}

impl<'a> Suggestions<'a> {
    /// The suggested tags, empty when idle
    pub fn tags(&self) -> &[&'a str] {
        match self {
            Suggestions::Idle => &[],
            Suggestions::Matches(tags) => tags,
        }
    }
}

pub fn suggestions<'a>(index: &'a TagIndex, search_text: &str) -> Suggestions<'a> {
    let Some(query) = normalized_query(search_text) else {
        return Suggestions::Idle;
    };

    Suggestions::Matches(
        index
            .all_tags()
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect(),
    )
}

/// Result counts for the summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible: usize,
    pub total: usize,
    pub filtered: bool,
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.filtered {
            return write!(f, "Showing all {} projects", self.total);
        }
        match self.visible {
            1 => write!(f, "1 project found"),
            n => write!(f, "{} projects found", n),
        }
    }
}

/// Catalog, index and filter state for one session.
/// The visible set is recomputed eagerly after every mutation.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    catalog: Catalog,
    index: TagIndex,
    state: FilterState,
    /// Positions into `catalog.projects()`
    visible: Vec<usize>,
}

impl CatalogFilter {
    pub fn new(catalog: Catalog) -> Self {
        let index = TagIndex::build(catalog.projects());
        let mut filter = CatalogFilter {
            catalog,
            index,
            state: FilterState::default(),
            visible: Vec::new(),
        };
        filter.recompute();
        filter
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &TagIndex {
        &self.index
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn visible(&self) -> impl Iterator<Item = &ProjectRecord> {
        let projects = self.catalog.projects();
        self.visible.iter().map(move |&i| &projects[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            visible: self.visible.len(),
            total: self.catalog.len(),
            filtered: !self.state.is_unfiltered(),
        }
    }

    pub fn suggestions(&self) -> Suggestions<'_> {
        suggestions(&self.index, &self.state.search_text)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.recompute();
    }

    /// Add `tag` if absent, remove it if present
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.state.selected_tags.remove(tag) {
            self.state.selected_tags.insert(tag.to_string());
        }
        self.recompute();
    }

    /// Replace the letter filter. Repeated selection does not clear it;
    /// callers that want toggle behaviour pass `None`.
    pub fn set_active_initial(&mut self, initial: Option<Initial>) {
        self.state.active_initial = initial;
        self.recompute();
    }

    /// Require a suggested tag and clear the query
    pub fn accept_suggestion(&mut self, tag: &str) {
        if !self.state.selected_tags.contains(tag) {
            self.state.selected_tags.insert(tag.to_string());
        }
        self.state.search_text.clear();
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        let query = self.state.query();
        self.visible = self
            .catalog
            .projects()
            .iter()
            .enumerate()
            .filter(|(_, p)| matches(p, &self.index, &self.state, query.as_deref()))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            visible = self.visible.len(),
            total = self.catalog.len(),
            "recomputed visible projects"
        );
    }
}
