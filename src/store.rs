//! Document loading.
//!
//! The [`DataStore`] turns the two-level document layout into the in-memory
//! project list:
//!
//! ```text
//! 1. TOC        content/toc.json           →  Vec<Project>   (fatal on failure)
//! 2. Details    <directory>project.json    →  Project.detail (isolated per project)
//! ```
//!
//! Detail documents are fetched in parallel with [rayon](https://docs.rs/rayon).
//! Each fetch writes only its own project's slot, so completion order does
//! not matter and the list keeps TOC order. A failed detail leaves that
//! project with an empty detail and `detail_loaded = false`; the failure is
//! logged and the load carries on.
//!
//! Details are cached on the projects for the whole session: nothing is
//! re-fetched on expansion.
//!
//! Where documents come from is behind the [`ContentSource`] seam:
//! [`DirSource`] reads a site directory, [`MemorySource`] serves documents
//! held in memory.

use crate::config::ContentConfig;
use crate::types::{Project, ProjectDetail, TocDocument};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal load failures. Only the TOC can produce one.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch table of contents {path}: {source}")]
    Toc {
        path: String,
        #[source]
        source: FetchError,
    },
    #[error("invalid table of contents {path}: {source}")]
    TocParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-project detail failures; recovered by the store.
#[derive(Error, Debug)]
pub enum DetailError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid detail document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can hand out documents by site-relative path.
pub trait ContentSource: Sync {
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Reads documents from a site directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io {
                path: path.to_string(),
                source,
            },
        })
    }
}

/// Documents held in memory, keyed by path (a leading `./` is ignored).
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, body: impl Into<String>) {
        self.documents.insert(normalize(path).to_string(), body.into());
    }

    pub fn with(mut self, path: &str, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.documents
            .get(normalize(path))
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

fn normalize(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Loads and caches the project list.
#[derive(Debug)]
pub struct DataStore<S> {
    source: S,
    content: ContentConfig,
}

impl<S: ContentSource> DataStore<S> {
    pub fn new(source: S, content: ContentConfig) -> Self {
        Self { source, content }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Path of a project's detail document.
    pub fn detail_path(&self, project: &Project) -> String {
        format!("{}{}", project.directory, self.content.detail_file)
    }

    /// Fetch and parse the TOC into projects without details. A repeated id
    /// keeps its first entry.
    pub fn load_toc(&self) -> Result<Vec<Project>, LoadError> {
        let path = &self.content.toc;
        let body = self.source.fetch(path).map_err(|source| LoadError::Toc {
            path: path.clone(),
            source,
        })?;
        let toc: TocDocument =
            serde_json::from_str(&body).map_err(|source| LoadError::TocParse {
                path: path.clone(),
                source,
            })?;
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(toc.projects.len());
        for entry in toc.projects {
            if !seen.insert(entry.id.clone()) {
                tracing::warn!(project = %entry.id, "duplicate project id in TOC, keeping the first");
                continue;
            }
            projects.push(Project::from_entry(entry, &self.content.base_path));
        }
        Ok(projects)
    }

    /// Fetch and parse one project's detail document.
    pub fn load_detail(&self, project: &Project) -> Result<ProjectDetail, DetailError> {
        let body = self.source.fetch(&self.detail_path(project))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Load the TOC, then every detail document in parallel.
    ///
    /// Only a TOC failure is an error; detail failures are isolated to their
    /// project.
    pub fn load_all(&self) -> Result<Vec<Project>, LoadError> {
        let mut projects = self.load_toc()?;

        projects
            .par_iter_mut()
            .for_each(|project| match self.load_detail(project) {
                Ok(detail) => {
                    project.detail = detail;
                    project.detail_loaded = true;
                }
                Err(err) => {
                    tracing::warn!(
                        project = %project.id,
                        path = %self.detail_path(project),
                        error = %err,
                        "project detail unavailable, continuing without it"
                    );
                }
            });

        let failed = projects.iter().filter(|p| !p.detail_loaded).count();
        tracing::info!(
            projects = projects.len(),
            failed_details = failed,
            "content loaded"
        );
        Ok(projects)
    }
}
