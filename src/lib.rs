//! # Studio Folio
//!
//! Navigation and presentation core for an architecture-studio portfolio.
//! The site is driven by two kinds of JSON document: a table of contents
//! listing every project, and one detail document per project with its
//! image categories, credits and description.
//!
//! # Architecture: Documents → State → Views
//!
//! ```text
//! 1. Load     toc.json + project.json  →  Vec<Project>          (store)
//! 2. Interact Intent                   →  state machines         (studio)
//! 3. Render   state                    →  view structs → HTML    (render)
//! ```
//!
//! Loading happens once per session. After that every user action is an
//! [`studio::Intent`] applied to in-memory state, and every view is a pure
//! function of that state, so re-rendering after any change is always safe.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Fetches the TOC and, in parallel, every detail document; isolates per-project failures |
//! | [`list`] | Sortable, filterable project listing |
//! | [`gallery`] | Per-project image browsing: paged folders and a flattened image cursor |
//! | [`navigation`] | Panel strip state machine (TOC → Splash → Info → Gallery → Image) |
//! | [`expansion`] | Single-page grid listing: one expanded row, image overlay |
//! | [`studio`] | Session controller dispatching intents to the state machines |
//! | [`render`] | State → serializable view structs → Maud markup |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Document and project model shared by every module |
//! | [`naming`] | Asset path and display label conventions |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Two Navigation Models
//!
//! The portfolio has two presentations that never share a page: a sliding
//! panel strip and a single-page grid with expandable rows. They disagree on
//! details (which images the full-size view steps through, whether expanding
//! waits for a collapse), so each gets its own machine ([`navigation`] and
//! [`expansion`]) over the shared [`gallery::GalleryState`].
//!
//! ## Transitions as Tokens
//!
//! Animated changes are two-phase. Starting one hands back a token
//! ([`navigation::Transition`], [`expansion::Collapse`]) and marks the machine
//! busy; requests made meanwhile are dropped. Handing the token back commits
//! the new state in one step. A token cannot be cloned, so a transition is
//! completed at most once.
//!
//! ## Details Loaded Up Front
//!
//! Detail documents are small and the project count is modest, so
//! [`store::DataStore::load_all`] fetches them all in parallel with rayon and
//! keeps them for the session. A broken detail document costs that project
//! its gallery, never the listing.

pub mod config;
pub mod expansion;
pub mod gallery;
pub mod list;
pub mod logging;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod render;
pub mod store;
pub mod studio;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
