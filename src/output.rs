//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and title; paths and
//! secondary facts follow on indented context lines. The same project reads
//! the same way in every command.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 Harbor House (4 images)
//!     Source: content/projects/01/
//!     final_dressed: 3
//!     models: 1
//!     drawings: 2 (excluded)
//! 002 Museum of Tides (detail unavailable)
//!     Source: content/projects/02/
//!
//! Loaded 2 projects, 1 detail unavailable
//! ```
//!
//! ## List
//!
//! ```text
//! Sorted by year, descending
//! Filter: program = Residential
//! 001 Harbor House [01]
//!     2020 | Residential | Porto | 120 sqm
//! ```
//!
//! ## Values
//!
//! ```text
//! program
//!     Cultural
//!     Residential
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::GalleryConfig;
use crate::list::{Column, ListState};
use crate::types::Project;
use std::collections::BTreeSet;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Project header: index, display name, then a parenthesised detail.
///
/// ```text
/// 001 Harbor House (4 images)
/// 002 Museum of Tides (detail unavailable)
/// ```
fn project_header(index: usize, project: &Project) -> String {
    let name = if project.name.is_empty() {
        &project.id
    } else {
        &project.name
    };
    if project.detail_loaded {
        format!(
            "{} {} ({})",
            format_index(index),
            name,
            plural(project.image_count(), "image", "images")
        )
    } else {
        format!("{} {} (detail unavailable)", format_index(index), name)
    }
}

// ============================================================================
// check
// ============================================================================

/// Inventory of the loaded site: every project in TOC order with its image
/// categories. Categories the gallery never shows are marked.
pub fn format_inventory(projects: &[Project], gallery: &GalleryConfig) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];

    for (i, project) in projects.iter().enumerate() {
        lines.push(project_header(i + 1, project));
        lines.push(format!("    Source: {}", project.directory));
        for (category, paths) in project.detail.images.iter() {
            let excluded = gallery.excluded_categories.iter().any(|c| c == category);
            let marker = if excluded {
                " (excluded)"
            } else if paths.is_empty() {
                " (empty)"
            } else {
                ""
            };
            lines.push(format!("    {}: {}{}", category, paths.len(), marker));
        }
    }

    let failed = projects.iter().filter(|p| !p.detail_loaded).count();
    lines.push(String::new());
    let summary = format!("Loaded {}", plural(projects.len(), "project", "projects"));
    if failed > 0 {
        lines.push(format!(
            "{}, {}",
            summary,
            plural(failed, "detail unavailable", "details unavailable")
        ));
    } else {
        lines.push(summary);
    }
    lines
}

pub fn print_inventory(projects: &[Project], gallery: &GalleryConfig) {
    for line in format_inventory(projects, gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// list
// ============================================================================

/// The visible listing under the current sort and filters.
pub fn format_listing(list: &ListState) -> Vec<String> {
    let sort = list.sort();
    let mut lines = vec![format!(
        "Sorted by {}, {}",
        sort.key,
        if sort.ascending { "ascending" } else { "descending" }
    )];
    for (column, value) in list.filters().iter() {
        lines.push(format!("Filter: {} = {}", column, value));
    }

    let visible = list.visible_projects();
    if visible.is_empty() {
        lines.push("No projects match the active filters.".to_string());
        return lines;
    }

    for (i, project) in visible.iter().enumerate() {
        let name: &str = if project.name.is_empty() {
            "(untitled)"
        } else {
            &project.name
        };
        lines.push(format!("{} {} [{}]", format_index(i + 1), name, project.id));
        let facts: Vec<String> = [Column::Year, Column::Program, Column::Location, Column::Area]
            .into_iter()
            .filter_map(|c| c.text(project))
            .collect();
        if !facts.is_empty() {
            lines.push(format!("    {}", facts.join(" | ")));
        }
    }
    lines
}

pub fn print_listing(list: &ListState) {
    for line in format_listing(list) {
        println!("{}", line);
    }
}

// ============================================================================
// values
// ============================================================================

/// Distinct values of one column, as offered by its filter dropdown.
pub fn format_values(column: Column, values: &BTreeSet<String>) -> Vec<String> {
    let mut lines = vec![column.to_string()];
    if values.is_empty() {
        lines.push("    (none)".to_string());
    }
    lines.extend(values.iter().map(|v| format!("    {}", v)));
    lines
}

pub fn print_values(column: Column, values: &BTreeSet<String>) {
    for line in format_values(column, values) {
        println!("{}", line);
    }
}
