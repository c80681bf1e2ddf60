//! Panel navigation state machine.
//!
//! The site is a strip of five pages viewed two at a time:
//!
//! ```text
//! page:      0 TOC   1 Splash   2 Info   3 Gallery   4 Image
//! position:  ├─ 0 ──┤
//!                    ├── 1 ────┤
//!                              ├── 2 ──┤
//!                                       ├──── 3 ────┤
//! ```
//!
//! [`Position`] says which adjacent pair is on screen. Moves are single steps
//! (`forward`, `back`) or a jump to position 0 (`home`).
//!
//! ## Transitions
//!
//! A move is two-phase. `forward`/`back`/`home` check the guards, mark the
//! navigator as animating and hand back a [`Transition`] describing the
//! pages that slide in. Nothing else changes until the caller passes that
//! token to [`Navigator::complete`] once the slide has finished; the position
//! change and the clearing of selection state happen there, together.
//!
//! While a transition is in flight every request is dropped, not queued.
//!
//! ## Guards
//!
//! | From | Move | Requires |
//! |------|------|----------|
//! | 0 | forward | a current project |
//! | 1 | forward | a current project |
//! | 2 | forward | a selected image |
//! | 3 | forward | never (last position) |
//! | >0 | back, home | nothing |
//!
//! A failed guard is a no-op, never an error.
//!
//! ## What `back` clears
//!
//! Each `back` undoes what the matching `forward` needed: leaving position 3
//! clears the selected image, leaving 2 clears nothing, leaving 1 clears the
//! current project and its gallery. `home` clears everything.

use crate::config::GalleryConfig;
use crate::gallery::GalleryState;
use crate::types::{ImageRef, Project};
use serde::Serialize;
use std::time::Duration;

/// Which pair of pages is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    TocSplash,
    SplashInfo,
    InfoGallery,
    GalleryImage,
}

impl Position {
    pub fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Option<Position> {
        match self {
            Position::TocSplash => Some(Position::SplashInfo),
            Position::SplashInfo => Some(Position::InfoGallery),
            Position::InfoGallery => Some(Position::GalleryImage),
            Position::GalleryImage => None,
        }
    }

    fn prev(self) -> Option<Position> {
        match self {
            Position::TocSplash => None,
            Position::SplashInfo => Some(Position::TocSplash),
            Position::InfoGallery => Some(Position::SplashInfo),
            Position::GalleryImage => Some(Position::InfoGallery),
        }
    }
}

/// A logical page, identified by what it shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Panel {
    Toc,
    /// `None` shows the site's default splash.
    Splash { project: Option<String> },
    Info { project: String },
    Gallery { project: String },
    Image { image: ImageRef },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Back,
    Home,
}

/// An in-flight slide. Hand it back to [`Navigator::complete`] when the
/// animation ends.
#[derive(Debug, PartialEq, Serialize)]
pub struct Transition {
    id: u64,
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    /// Pages entering the screen, left to right.
    pub incoming: Vec<Panel>,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    position: Position,
    current_project: Option<String>,
    preview_project: Option<String>,
    selected_image: Option<ImageRef>,
    gallery: Option<GalleryState>,
    in_flight: Option<(u64, Direction)>,
    next_id: u64,
    duration: Duration,
}

impl Navigator {
    pub fn new(duration: Duration) -> Self {
        Self {
            position: Position::TocSplash,
            current_project: None,
            preview_project: None,
            selected_image: None,
            gallery: None,
            in_flight: None,
            next_id: 0,
            duration,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current_project(&self) -> Option<&str> {
        self.current_project.as_deref()
    }

    pub fn preview_project(&self) -> Option<&str> {
        self.preview_project.as_deref()
    }

    pub fn selected_image(&self) -> Option<&ImageRef> {
        self.selected_image.as_ref()
    }

    pub fn gallery(&self) -> Option<&GalleryState> {
        self.gallery.as_ref()
    }

    /// The two pages on screen, left then right.
    pub fn panels(&self) -> [Panel; 2] {
        let left = self.position.index();
        [self.page(left), self.page(left + 1)]
    }

    fn page(&self, index: usize) -> Panel {
        let project = || self.current_project.clone().unwrap_or_default();
        match index {
            0 => Panel::Toc,
            1 => Panel::Splash {
                project: self
                    .current_project
                    .clone()
                    .or_else(|| self.preview_project.clone()),
            },
            2 => Panel::Info { project: project() },
            3 => Panel::Gallery { project: project() },
            _ => Panel::Image {
                image: self.selected_image.clone().unwrap_or(ImageRef {
                    path: String::new(),
                    category: String::new(),
                    index: 0,
                }),
            },
        }
    }

    // ========================================================================
    // Selection (no transition)
    // ========================================================================

    /// Make `project` current and open its gallery. Only the TOC page can
    /// select, so this is accepted at position 0 only.
    pub fn select_project(&mut self, project: &Project, config: &GalleryConfig) -> bool {
        if self.is_animating() || self.position != Position::TocSplash {
            tracing::debug!(project = %project.id, position = ?self.position, "ignoring project selection");
            return false;
        }
        self.current_project = Some(project.id.clone());
        self.gallery = Some(GalleryState::open(project, config));
        self.selected_image = None;
        true
    }

    /// Preview a project on the splash page while hovering its TOC entry.
    pub fn hover(&mut self, project_id: &str) -> bool {
        if self.is_animating() || self.position != Position::TocSplash {
            return false;
        }
        self.preview_project = Some(project_id.to_string());
        true
    }

    /// Select a thumbnail. The gallery must be on screen (position 2 or 3).
    pub fn select_image(&mut self, category: &str, index: usize) -> Option<&ImageRef> {
        if self.is_animating() || self.position < Position::InfoGallery {
            return None;
        }
        let image = self.gallery.as_mut()?.select_image(category, index)?;
        self.selected_image = Some(image);
        self.selected_image.as_ref()
    }

    /// Step the full-size image forward through every category (position 3).
    pub fn next_image(&mut self) -> Option<&ImageRef> {
        self.step_image(GalleryState::next_image)
    }

    /// Step the full-size image backward through every category (position 3).
    pub fn prev_image(&mut self) -> Option<&ImageRef> {
        self.step_image(GalleryState::prev_image)
    }

    fn step_image(
        &mut self,
        step: fn(&mut GalleryState) -> Option<ImageRef>,
    ) -> Option<&ImageRef> {
        if self.is_animating() || self.position != Position::GalleryImage {
            return None;
        }
        let image = step(self.gallery.as_mut()?)?;
        self.selected_image = Some(image);
        self.selected_image.as_ref()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn forward(&mut self) -> Option<Transition> {
        if self.is_animating() {
            tracing::debug!("dropping forward: transition in flight");
            return None;
        }
        let to = self.position.next()?;
        let ready = match self.position {
            Position::TocSplash | Position::SplashInfo => self.current_project.is_some(),
            Position::InfoGallery => self.selected_image.is_some(),
            Position::GalleryImage => false,
        };
        if !ready {
            tracing::debug!(position = ?self.position, "forward guard not met");
            return None;
        }
        let incoming = vec![self.page(to.index() + 1)];
        Some(self.begin(Direction::Forward, to, incoming))
    }

    pub fn back(&mut self) -> Option<Transition> {
        if self.is_animating() {
            tracing::debug!("dropping back: transition in flight");
            return None;
        }
        let to = self.position.prev()?;
        let incoming = vec![self.page(to.index())];
        Some(self.begin(Direction::Back, to, incoming))
    }

    pub fn home(&mut self) -> Option<Transition> {
        if self.is_animating() {
            tracing::debug!("dropping home: transition in flight");
            return None;
        }
        if self.position == Position::TocSplash {
            return None;
        }
        let incoming = vec![Panel::Toc, Panel::Splash { project: None }];
        Some(self.begin(Direction::Home, Position::TocSplash, incoming))
    }

    fn begin(&mut self, direction: Direction, to: Position, incoming: Vec<Panel>) -> Transition {
        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some((id, direction));
        Transition {
            id,
            direction,
            from: self.position,
            to,
            incoming,
            duration: self.duration,
        }
    }

    /// Commit a finished transition. Returns false for a token that is not
    /// the one in flight.
    pub fn complete(&mut self, transition: Transition) -> bool {
        if self.in_flight != Some((transition.id, transition.direction)) {
            tracing::debug!(id = transition.id, "ignoring stale transition");
            return false;
        }
        match transition.direction {
            Direction::Forward => {
                if transition.from == Position::TocSplash {
                    self.preview_project = None;
                }
            }
            Direction::Back => match transition.from {
                Position::GalleryImage => self.selected_image = None,
                Position::SplashInfo => {
                    self.current_project = None;
                    self.gallery = None;
                }
                _ => {}
            },
            Direction::Home => {
                self.current_project = None;
                self.preview_project = None;
                self.selected_image = None;
                self.gallery = None;
            }
        }
        self.position = transition.to;
        self.in_flight = None;
        true
    }
}
