//! Sortable, filterable project listing.
//!
//! [`ListState`] owns the project set for the page session together with the
//! current [`SortState`] and [`FilterState`]. The visible listing is always
//! derived, never stored, so re-rendering after any mutation is safe.
//!
//! ## Ordering
//!
//! - Numeric columns (`year`, `area`) compare numerically; a missing value
//!   counts as 0.
//! - Text columns (`id`, `name`) compare case- and accent-insensitively first
//!   ("Évora" sorts with "Evora", before "Faro"); only exact folded ties fall
//!   back to the lowercased text. A missing value counts as the empty string.
//! - Descending order reverses the comparator, not the result, so the sort
//!   stays stable: ties keep TOC order in both directions.

use crate::naming;
use crate::types::Project;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Error, Debug, PartialEq)]
#[error("unknown column '{0}' (expected id, name, year, program, location or area)")]
pub struct ParseColumnError(String);

/// Every column of the project listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Id,
    Name,
    Year,
    Program,
    Location,
    Area,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::Name,
        Column::Year,
        Column::Program,
        Column::Location,
        Column::Area,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Year => "year",
            Column::Program => "program",
            Column::Location => "location",
            Column::Area => "area",
        }
    }

    pub fn is_sortable(self) -> bool {
        matches!(self, Column::Id | Column::Name | Column::Year | Column::Area)
    }

    pub fn is_filterable(self) -> bool {
        matches!(self, Column::Program | Column::Location)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Year | Column::Area)
    }

    /// Display text of this column for a project; `None` when the value is
    /// missing.
    pub fn text(self, project: &Project) -> Option<String> {
        match self {
            Column::Id => Some(project.id.clone()),
            Column::Name => Some(project.name.clone()).filter(|n| !n.is_empty()),
            Column::Year => project.year.known().map(|y| y.to_string()),
            Column::Program => project.program.clone(),
            Column::Location => project.location.clone(),
            Column::Area => project.area_sqm.map(naming::format_area),
        }
    }

    fn raw_value(self, project: &Project) -> Option<&str> {
        match self {
            Column::Id => Some(&project.id),
            Column::Name => Some(&project.name),
            Column::Program => project.program.as_deref(),
            Column::Location => project.location.as_deref(),
            Column::Year | Column::Area => None,
        }
    }

    fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            Column::Year => a.year.sort_value().cmp(&b.year.sort_value()),
            Column::Area => a
                .area_sqm
                .unwrap_or(0.0)
                .total_cmp(&b.area_sqm.unwrap_or(0.0)),
            _ => collate(
                self.raw_value(a).unwrap_or_default(),
                self.raw_value(b).unwrap_or_default(),
            ),
        }
    }
}

/// Primary key: decomposed, combining marks dropped, lowercased.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseColumnError(s.to_string()))
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: Column,
    pub ascending: bool,
}

/// At most one active value per filterable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState(BTreeMap<Column, String>);

impl FilterState {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.0.get(&column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> {
        self.0.iter().map(|(c, v)| (*c, v.as_str()))
    }

    fn matches(&self, project: &Project) -> bool {
        self.0
            .iter()
            .all(|(column, value)| column.raw_value(project) == Some(value.as_str()))
    }
}

/// The project set plus sort and filter state.
#[derive(Debug, Clone)]
pub struct ListState {
    projects: Vec<Project>,
    sort: SortState,
    default_sort: Column,
    filters: FilterState,
    filter_columns: Vec<Column>,
}

impl ListState {
    /// Create a listing over `projects` (in TOC order).
    ///
    /// `default_sort` falls back to `id` when it is not sortable, and
    /// unfilterable entries of `filter_columns` are ignored.
    pub fn new(projects: Vec<Project>, default_sort: Column, filter_columns: &[Column]) -> Self {
        let default_sort = if default_sort.is_sortable() {
            default_sort
        } else {
            Column::Id
        };
        Self {
            projects,
            sort: SortState {
                key: default_sort,
                ascending: true,
            },
            default_sort,
            filters: FilterState::default(),
            filter_columns: filter_columns
                .iter()
                .copied()
                .filter(|c| c.is_filterable())
                .collect(),
        }
    }

    /// All projects in TOC order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filter_columns(&self) -> &[Column] {
        &self.filter_columns
    }

    /// Sort by `key`, flipping direction when it is already the sort key.
    ///
    /// Returns false (and changes nothing) for unsortable columns.
    pub fn set_sort(&mut self, key: Column) -> bool {
        if !key.is_sortable() {
            tracing::debug!(column = %key, "ignoring sort on unsortable column");
            return false;
        }
        if self.sort.key == key {
            self.sort.ascending = !self.sort.ascending;
        } else {
            self.sort = SortState {
                key,
                ascending: true,
            };
        }
        true
    }

    /// Replace the active value for `column`; `None` clears it.
    ///
    /// Returns false (and changes nothing) when the column has no filter or
    /// the value does not occur in the project set.
    pub fn set_filter(&mut self, column: Column, value: Option<&str>) -> bool {
        if !self.filter_columns.contains(&column) {
            tracing::debug!(column = %column, "ignoring filter on unfilterable column");
            return false;
        }
        match value {
            None => {
                self.filters.0.remove(&column);
            }
            Some(value) => {
                if !self.unique_values(column).contains(value) {
                    tracing::debug!(column = %column, value, "ignoring filter value not in project set");
                    return false;
                }
                self.filters.0.insert(column, value.to_string());
            }
        }
        true
    }

    /// Projects matching every active filter, in the current sort order.
    pub fn visible_projects(&self) -> Vec<&Project> {
        let mut visible: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| self.filters.matches(p))
            .collect();
        let SortState { key, ascending } = self.sort;
        // `sort_by` is stable, which keeps TOC order among ties.
        visible.sort_by(|a, b| {
            let ord = key.compare(a, b);
            if ascending { ord } else { ord.reverse() }
        });
        visible
    }

    /// Distinct non-empty values of `column`, sorted. Feeds filter dropdowns.
    pub fn unique_values(&self, column: Column) -> BTreeSet<String> {
        self.projects
            .iter()
            .filter_map(|p| column.text(p))
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// Back to the configured sort and no filters.
    pub fn reset(&mut self) {
        self.sort = SortState {
            key: self.default_sort,
            ascending: true,
        };
        self.filters = FilterState::default();
    }
}
