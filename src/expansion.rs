//! Single-page listing: row expansion and the image overlay.
//!
//! The grid listing shows at most one expanded row. Clicking a row header
//! goes through [`Expansion::toggle`]:
//!
//! ```text
//!            toggle(a)                    toggle(a)
//! Collapsed ──────────► Expanded(a) ──────────────► Collapsing { a, then: None } ──► Collapsed
//!                            │
//!                            │ toggle(b)
//!                            ▼
//!                Collapsing { a, then: Some(b) } ──finish──► Expanded(b)
//! ```
//!
//! Expanding is immediate. Collapsing animates: `toggle` returns a
//! [`Collapse`] token and the row stays on screen until the caller hands the
//! token to [`Expansion::finish_collapse`]. While a collapse is running every
//! other toggle is dropped.
//!
//! The expanded row owns a [`GalleryState`] (paged folder grid). The overlay
//! is a full-size view of the gallery's cursor image; it steps through the
//! folder it was opened from and wraps at that folder's ends.

use crate::config::GalleryConfig;
use crate::gallery::GalleryState;
use crate::types::{ImageRef, Project};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RowState {
    Collapsed,
    Expanded {
        project: String,
    },
    Collapsing {
        project: String,
        then: Option<String>,
    },
}

/// An in-flight row collapse. Pass it to [`Expansion::finish_collapse`].
#[derive(Debug, PartialEq, Serialize)]
pub struct Collapse {
    id: u64,
    pub project: String,
    /// Row expanded once the collapse is done.
    pub then: Option<String>,
}

/// What a toggle did.
#[derive(Debug, PartialEq)]
pub enum Toggle {
    Expanded,
    Collapsing(Collapse),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Expansion {
    state: RowState,
    gallery: Option<GalleryState>,
    /// Gallery of the row queued behind a running collapse.
    pending: Option<GalleryState>,
    overlay: bool,
    inverted: bool,
    in_flight: Option<u64>,
    next_id: u64,
}

impl Default for Expansion {
    fn default() -> Self {
        Self::new()
    }
}

impl Expansion {
    pub fn new() -> Self {
        Self {
            state: RowState::Collapsed,
            gallery: None,
            pending: None,
            overlay: false,
            inverted: false,
            in_flight: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    /// The row currently drawn open (also while it collapses).
    pub fn expanded_project(&self) -> Option<&str> {
        match &self.state {
            RowState::Collapsed => None,
            RowState::Expanded { project } | RowState::Collapsing { project, .. } => Some(project),
        }
    }

    pub fn is_collapsing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn gallery(&self) -> Option<&GalleryState> {
        self.gallery.as_ref()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay
    }

    /// Image shown in the overlay.
    pub fn overlay_image(&self) -> Option<ImageRef> {
        if !self.overlay {
            return None;
        }
        self.gallery.as_ref()?.current()
    }

    /// Images the overlay steps through: the size of its folder.
    pub fn overlay_len(&self) -> usize {
        match (self.overlay_image(), self.gallery.as_ref()) {
            (Some(image), Some(gallery)) => gallery.category_len(&image.category),
            _ => 0,
        }
    }

    /// Expand `project`, collapse it if it is already open, or swap rows
    /// through a collapse.
    pub fn toggle(&mut self, project: &Project, config: &GalleryConfig) -> Toggle {
        if self.is_collapsing() {
            tracing::debug!(project = %project.id, "dropping row toggle: collapse in flight");
            return Toggle::Ignored;
        }
        match &self.state {
            RowState::Collapsed => {
                self.state = RowState::Expanded {
                    project: project.id.clone(),
                };
                self.gallery = Some(GalleryState::open(project, config));
                Toggle::Expanded
            }
            RowState::Expanded { project: open } => {
                let open = open.clone();
                let then = (open != project.id).then(|| project.id.clone());
                if then.is_some() {
                    self.pending = Some(GalleryState::open(project, config));
                }
                Toggle::Collapsing(self.begin_collapse(open, then))
            }
            RowState::Collapsing { .. } => Toggle::Ignored,
        }
    }

    /// Collapse whatever is open, with nothing queued behind it.
    pub fn collapse(&mut self) -> Option<Collapse> {
        if self.is_collapsing() {
            return None;
        }
        match &self.state {
            RowState::Expanded { project } => {
                let project = project.clone();
                Some(self.begin_collapse(project, None))
            }
            _ => None,
        }
    }

    fn begin_collapse(&mut self, project: String, then: Option<String>) -> Collapse {
        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(id);
        self.overlay = false;
        self.state = RowState::Collapsing {
            project: project.clone(),
            then: then.clone(),
        };
        Collapse { id, project, then }
    }

    /// Commit a finished collapse. Returns false for a stale token.
    pub fn finish_collapse(&mut self, collapse: Collapse) -> bool {
        if self.in_flight != Some(collapse.id) {
            tracing::debug!(project = %collapse.project, "ignoring stale collapse");
            return false;
        }
        self.in_flight = None;
        self.inverted = false;
        self.gallery = self.pending.take();
        self.state = match collapse.then {
            Some(project) if self.gallery.is_some() => RowState::Expanded { project },
            _ => RowState::Collapsed,
        };
        true
    }

    // ========================================================================
    // Expanded row controls
    // ========================================================================

    /// Flip the dark/light treatment of the open row.
    pub fn toggle_inverted(&mut self) -> bool {
        if !matches!(self.state, RowState::Expanded { .. }) {
            return false;
        }
        self.inverted = !self.inverted;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.open_gallery_mut().is_some_and(GalleryState::next_page)
    }

    pub fn prev_page(&mut self) -> bool {
        self.open_gallery_mut().is_some_and(GalleryState::prev_page)
    }

    pub fn select_category(&mut self, category: &str) -> bool {
        self.open_gallery_mut()
            .is_some_and(|g| g.select_category(category))
    }

    fn open_gallery_mut(&mut self) -> Option<&mut GalleryState> {
        match self.state {
            RowState::Expanded { .. } => self.gallery.as_mut(),
            _ => None,
        }
    }

    // ========================================================================
    // Overlay
    // ========================================================================

    /// Open the overlay on the `slot`-th image of the visible page.
    pub fn open_overlay(&mut self, slot: usize) -> Option<ImageRef> {
        let gallery = self.open_gallery_mut()?;
        if slot >= gallery.page_images().len() {
            return None;
        }
        let category = gallery.active_category()?.name.clone();
        let index = gallery.page_start() + slot;
        let image = gallery.select_image(&category, index)?;
        self.overlay = true;
        Some(image)
    }

    pub fn overlay_next(&mut self) -> Option<ImageRef> {
        if !self.overlay {
            return None;
        }
        self.gallery.as_mut()?.next_in_category()
    }

    pub fn overlay_prev(&mut self) -> Option<ImageRef> {
        if !self.overlay {
            return None;
        }
        self.gallery.as_mut()?.prev_in_category()
    }

    pub fn close_overlay(&mut self) -> bool {
        std::mem::replace(&mut self.overlay, false)
    }
}
