//! Shared test utilities for the studio-folio test suite.
//!
//! Provides project builders, a canned document source and lookup helpers
//! that work with the in-memory model (`Project`, `ListState`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let list = sample_list();
//! let harbor = find_project(list.projects(), "01");
//! assert_eq!(harbor.name, "Harbor House");
//!
//! let project = project_with_images("p", &[("final_dressed", 12), ("models", 2)]);
//! assert_eq!(project.image_count(), 14);
//! ```

use crate::list::{Column, ListState};
use crate::store::MemorySource;
use crate::types::{Credit, Credits, ImageCategories, Project, ProjectDetail, Year};

// =========================================================================
// Project builders
// =========================================================================

/// A bare project living at `content/projects/<id>/`, with no metadata
/// beyond name and year and no detail loaded.
pub fn project(id: &str, name: &str, year: Year) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        year,
        program: None,
        location: None,
        area_sqm: None,
        directory: format!("content/projects/{id}/"),
        detail: ProjectDetail::default(),
        detail_loaded: false,
    }
}

/// A loaded project whose detail declares `categories` in order, each
/// holding `count` images named `./<category>/01.jpg`, `./<category>/02.jpg`…
pub fn project_with_images(id: &str, categories: &[(&str, usize)]) -> Project {
    let mut p = project(id, &format!("Project {id}"), Year::Known(2020));
    p.detail.images = ImageCategories::new(
        categories
            .iter()
            .map(|(name, count)| {
                let paths = (1..=*count).map(|i| format!("./{name}/{i:02}.jpg")).collect();
                (name.to_string(), paths)
            })
            .collect(),
    );
    p.detail_loaded = true;
    p
}

/// Five projects covering the awkward cases: a shared year, an unknown year,
/// a missing program, a missing location and a missing area.
///
/// | id | name            | year    | program     | location | area |
/// |----|-----------------|---------|-------------|----------|------|
/// | 01 | Harbor House    | 2020    | Residential | Porto    | 120  |
/// | 02 | Museum of Tides | 2018    | Cultural    | Lisbon   | 2400 |
/// | 03 | Courtyard Flats | 2020    | Residential | Lisbon   | 860  |
/// | 04 | Atelier Row     | unknown | -           | Braga    | 45   |
/// | 05 | Pavilion        | 2016    | Cultural    | -        | -    |
pub fn sample_projects() -> Vec<Project> {
    let rows: [(&str, &str, Year, Option<&str>, Option<&str>, Option<f64>); 5] = [
        ("01", "Harbor House", Year::Known(2020), Some("Residential"), Some("Porto"), Some(120.0)),
        ("02", "Museum of Tides", Year::Known(2018), Some("Cultural"), Some("Lisbon"), Some(2400.0)),
        ("03", "Courtyard Flats", Year::Known(2020), Some("Residential"), Some("Lisbon"), Some(860.0)),
        ("04", "Atelier Row", Year::Unknown, None, Some("Braga"), Some(45.0)),
        ("05", "Pavilion", Year::Known(2016), Some("Cultural"), None, None),
    ];
    rows.into_iter()
        .map(|(id, name, year, program, location, area)| {
            let mut p = project(id, name, year);
            p.program = program.map(str::to_string);
            p.location = location.map(str::to_string);
            p.area_sqm = area;
            p
        })
        .collect()
}

/// [`sample_projects`] in a listing with the stock sort and filter columns.
pub fn sample_list() -> ListState {
    ListState::new(sample_projects(), Column::Id, &[Column::Program, Column::Location])
}

/// [`sample_projects`] with details attached: "01" has two categories and
/// two credits, "02" has none, "05" has only excluded categories.
pub fn sample_projects_with_details() -> Vec<Project> {
    let mut projects = sample_projects();
    for p in &mut projects {
        p.detail_loaded = true;
        match p.id.as_str() {
            "01" => {
                p.detail = ProjectDetail {
                    title: Some("Harbor House, Porto".to_string()),
                    description: Some("A house on the quay.\n\nTimber and stone.".to_string()),
                    credits: Credits::new(vec![
                        Credit {
                            role: "Architect".to_string(),
                            names: "Studio Folio".to_string(),
                        },
                        Credit {
                            role: "Team".to_string(),
                            names: "Ana Reis, Tomas Lima".to_string(),
                        },
                    ]),
                    images: project_with_images("01", &[("final_dressed", 12), ("models", 2)])
                        .detail
                        .images,
                };
            }
            "02" => p.detail_loaded = false,
            "05" => {
                p.detail.images = project_with_images("05", &[("in_process", 3), ("drawings", 2)])
                    .detail
                    .images;
            }
            other => {
                p.detail.images = project_with_images(other, &[("final_dressed", 3)])
                    .detail
                    .images;
            }
        }
    }
    projects
}

// =========================================================================
// Canned documents
// =========================================================================

/// A document source with a three-project TOC listed in order 03, 01, 02.
///
/// "01" has four images and two credits, "02" has no detail document and
/// "03" has a single-category detail.
pub fn sample_source() -> MemorySource {
    MemorySource::new()
        .with(
            "content/toc.json",
            r#"{"projects": [
                {"id": "03", "directory": "content/projects/03/", "name": "Courtyard Flats",
                 "year": 2020, "program": "Residential", "location": "Lisbon", "area_sqm": 860},
                {"id": "01", "directory": "content/projects/01/", "name": "Harbor House",
                 "year": "2020", "program": "Residential", "location": "Porto", "area_sqm": 120},
                {"id": "02", "directory": "content/projects/02/", "name": "Museum of Tides",
                 "year": "unknown", "program": "Cultural", "address": "Lisbon", "area": "2400"}
            ]}"#,
        )
        .with(
            "content/projects/01/project.json",
            r#"{
                "title": "Harbor House, Porto",
                "description": "A house on the quay.\n\nTimber and stone.",
                "credits": {"Architect": "Studio Folio", "Team": "Ana Reis, Tomas Lima"},
                "images": {
                    "final_dressed": ["./img/01.jpg", "./img/02.jpg", "./img/03.jpg"],
                    "models": ["./models/01.jpg"]
                }
            }"#,
        )
        .with(
            "content/projects/03/project.json",
            r#"{"images": {"final_dressed": ["./img/a.jpg", "./img/b.jpg"]}}"#,
        )
}

// =========================================================================
// Lookups — panics with a clear message on miss
// =========================================================================

/// Find a project by id. Panics if not found.
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> &'a Project {
    projects.iter().find(|p| p.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        panic!("project '{id}' not found. Available: {ids:?}")
    })
}
