//! The page controller.
//!
//! A [`Studio`] owns everything that lives for one page session: the loaded
//! project list with its sort/filter state, the panel [`Navigator`] and the
//! single-page row [`Expansion`]. User input arrives as [`Intent`]s through
//! [`Studio::dispatch`], which answers with an [`Update`] telling the view
//! layer what to do next:
//!
//! | Update | View layer |
//! |--------|------------|
//! | `Ignored` | nothing |
//! | `Redraw` | re-render from [`crate::render`] |
//! | `Slide(t)` | animate `t.incoming` in, then call [`Studio::finish_slide`] |
//! | `Collapse(c)` | animate the row shut, then call [`Studio::finish_collapse`] |
//!
//! Invalid or badly-timed intents are never errors: they come back as
//! `Ignored` and leave the state untouched.

use crate::config::SiteConfig;
use crate::expansion::{Collapse, Expansion, Toggle};
use crate::list::{Column, ListState};
use crate::navigation::{Direction, Navigator, Position, Transition};
use crate::store::{ContentSource, DataStore, LoadError};
use crate::types::Project;

/// Which of the two visible panels was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Listing
    SortBy(Column),
    FilterBy(Column, Option<String>),

    // Panel navigation
    HoverProject(String),
    SelectProject(String),
    SelectImage { category: String, index: usize },
    ClickPanel(Side),
    Navigate(Direction),

    // Single-page rows
    ToggleRow(String),
    NextPage,
    PrevPage,
    SelectCategory(String),
    ToggleInverted,
    OpenOverlay(usize),
    OverlayNext,
    OverlayPrev,
    CloseOverlay,
}

#[derive(Debug, PartialEq)]
pub enum Update {
    Ignored,
    Redraw,
    Slide(Transition),
    Collapse(Collapse),
}

impl Update {
    fn redraw_if(changed: bool) -> Self {
        if changed { Update::Redraw } else { Update::Ignored }
    }
}

#[derive(Debug, Clone)]
pub struct Studio {
    config: SiteConfig,
    list: ListState,
    nav: Navigator,
    rows: Expansion,
}

impl Studio {
    pub fn new(projects: Vec<Project>, config: SiteConfig) -> Self {
        let list = ListState::new(
            projects,
            config.listing.default_sort,
            &config.listing.filter_columns,
        );
        let nav = Navigator::new(config.animation.duration());
        Self {
            config,
            list,
            nav,
            rows: Expansion::new(),
        }
    }

    /// Load every document from `source` and start a session over it.
    pub fn load<S: ContentSource>(source: S, config: SiteConfig) -> Result<Self, LoadError> {
        let projects = DataStore::new(source, config.content.clone()).load_all()?;
        Ok(Self::new(projects, config))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn rows(&self) -> &Expansion {
        &self.rows
    }

    pub fn dispatch(&mut self, intent: Intent) -> Update {
        tracing::trace!(?intent, "dispatch");
        match intent {
            Intent::SortBy(column) => Update::redraw_if(self.list.set_sort(column)),
            Intent::FilterBy(column, value) => {
                let changed = self.list.set_filter(column, value.as_deref());
                if changed && !self.expanded_row_visible() {
                    self.rows.close_overlay();
                }
                Update::redraw_if(changed)
            }

            Intent::HoverProject(id) => {
                Update::redraw_if(self.list.project(&id).is_some() && self.nav.hover(&id))
            }
            Intent::SelectProject(id) => self.select_and_open(&id),
            Intent::SelectImage { category, index } => self.select_image(&category, index),
            Intent::ClickPanel(side) => self.click_panel(side),
            Intent::Navigate(direction) => {
                let transition = match direction {
                    Direction::Forward => self.nav.forward(),
                    Direction::Back => self.nav.back(),
                    Direction::Home => self.nav.home(),
                };
                transition.map_or(Update::Ignored, Update::Slide)
            }

            Intent::ToggleRow(id) => {
                let Some(project) = self.list.project(&id) else {
                    tracing::debug!(project = %id, "ignoring toggle of unknown row");
                    return Update::Ignored;
                };
                match self.rows.toggle(project, &self.config.gallery) {
                    Toggle::Expanded => Update::Redraw,
                    Toggle::Collapsing(c) => Update::Collapse(c),
                    Toggle::Ignored => Update::Ignored,
                }
            }
            Intent::CloseOverlay => Update::redraw_if(self.rows.close_overlay()),
            row_control => {
                if !self.expanded_row_visible() {
                    tracing::debug!(intent = ?row_control, "ignoring control of a hidden row");
                    return Update::Ignored;
                }
                self.row_control(row_control)
            }
        }
    }

    /// Controls of the expanded row; only reached while that row is listed.
    fn row_control(&mut self, intent: Intent) -> Update {
        let changed = match intent {
            Intent::NextPage => self.rows.next_page(),
            Intent::PrevPage => self.rows.prev_page(),
            Intent::SelectCategory(name) => self.rows.select_category(&name),
            Intent::ToggleInverted => self.rows.toggle_inverted(),
            Intent::OpenOverlay(slot) => self.rows.open_overlay(slot).is_some(),
            Intent::OverlayNext => self.rows.overlay_next().is_some(),
            Intent::OverlayPrev => self.rows.overlay_prev().is_some(),
            _ => false,
        };
        Update::redraw_if(changed)
    }

    /// True when a row is expanded and the active filters still list it.
    pub fn expanded_row_visible(&self) -> bool {
        self.rows.expanded_project().is_some_and(|id| {
            self.list
                .visible_projects()
                .iter()
                .any(|project| project.id == id)
        })
    }

    /// Select a TOC entry and slide to its splash/info pair.
    fn select_and_open(&mut self, id: &str) -> Update {
        let Some(project) = self.list.project(id) else {
            tracing::debug!(project = %id, "ignoring selection of unknown project");
            return Update::Ignored;
        };
        if !self.nav.select_project(project, &self.config.gallery) {
            return Update::Ignored;
        }
        self.nav.forward().map_or(Update::Redraw, Update::Slide)
    }

    /// A thumbnail click: slides the image in from the gallery pair, swaps it
    /// in place when the image is already showing.
    fn select_image(&mut self, category: &str, index: usize) -> Update {
        if self.nav.select_image(category, index).is_none() {
            return Update::Ignored;
        }
        match self.nav.position() {
            Position::InfoGallery => self.nav.forward().map_or(Update::Redraw, Update::Slide),
            _ => Update::Redraw,
        }
    }

    fn click_panel(&mut self, side: Side) -> Update {
        match (side, self.nav.position()) {
            (Side::Left, _) => self.nav.back().map_or(Update::Ignored, Update::Slide),
            (Side::Right, Position::TocSplash) => match self.nav.preview_project() {
                Some(id) => {
                    let id = id.to_string();
                    self.select_and_open(&id)
                }
                None => Update::Ignored,
            },
            (Side::Right, Position::SplashInfo) => {
                self.nav.forward().map_or(Update::Ignored, Update::Slide)
            }
            (Side::Right, Position::InfoGallery) => Update::Ignored,
            (Side::Right, Position::GalleryImage) => {
                Update::redraw_if(self.nav.next_image().is_some())
            }
        }
    }

    /// Commit a finished slide. Arriving home also resets the listing.
    pub fn finish_slide(&mut self, transition: Transition) -> bool {
        let home = transition.direction == Direction::Home;
        let done = self.nav.complete(transition);
        if done && home {
            self.list.reset();
        }
        done
    }

    pub fn finish_collapse(&mut self, collapse: Collapse) -> bool {
        self.rows.finish_collapse(collapse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::RowState;
    use crate::test_helpers::*;

    fn studio() -> Studio {
        Studio::new(sample_projects_with_details(), SiteConfig::default())
    }

    fn slide(studio: &mut Studio, update: Update) {
        match update {
            Update::Slide(t) => assert!(studio.finish_slide(t)),
            other => panic!("expected a slide, got {other:?}"),
        }
    }

    // =========================================================================
    // Listing intents
    // =========================================================================

    #[test]
    fn sort_and_filter_redraw() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::SortBy(Column::Year)), Update::Redraw);
        assert_eq!(
            s.dispatch(Intent::FilterBy(Column::Program, Some("Cultural".into()))),
            Update::Redraw
        );
        assert_eq!(s.list().visible_projects().len(), 2);
    }

    #[test]
    fn invalid_listing_intents_are_ignored() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::SortBy(Column::Location)), Update::Ignored);
        assert_eq!(
            s.dispatch(Intent::FilterBy(Column::Program, Some("Nope".into()))),
            Update::Ignored
        );
    }

    // =========================================================================
    // Panel navigation
    // =========================================================================

    #[test]
    fn selecting_project_slides_forward() {
        let mut s = studio();
        let update = s.dispatch(Intent::SelectProject("01".into()));
        slide(&mut s, update);
        assert_eq!(s.navigator().position(), Position::SplashInfo);
        assert_eq!(s.navigator().current_project(), Some("01"));
    }

    #[test]
    fn unknown_project_is_ignored() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::SelectProject("99".into())), Update::Ignored);
        assert_eq!(s.dispatch(Intent::HoverProject("99".into())), Update::Ignored);
    }

    #[test]
    fn splash_click_opens_hovered_project() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Right)), Update::Ignored);
        assert_eq!(s.dispatch(Intent::HoverProject("03".into())), Update::Redraw);
        let update = s.dispatch(Intent::ClickPanel(Side::Right));
        slide(&mut s, update);
        assert_eq!(s.navigator().current_project(), Some("03"));
    }

    #[test]
    fn full_walk_and_back_again() {
        let mut s = studio();
        let u = s.dispatch(Intent::SelectProject("01".into()));
        slide(&mut s, u);
        let u = s.dispatch(Intent::ClickPanel(Side::Right));
        slide(&mut s, u);
        assert_eq!(s.navigator().position(), Position::InfoGallery);
        // Gallery background is inert
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Right)), Update::Ignored);

        let u = s.dispatch(Intent::SelectImage {
            category: "models".into(),
            index: 0,
        });
        slide(&mut s, u);
        assert_eq!(s.navigator().position(), Position::GalleryImage);

        // Image click steps forward, wrapping to the first category
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Right)), Update::Redraw);
        let image = s.navigator().selected_image().unwrap();
        assert_eq!(image.category, "models");
        assert_eq!(image.index, 1);
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Right)), Update::Redraw);
        assert_eq!(s.navigator().selected_image().unwrap().category, "final_dressed");

        for _ in 0..3 {
            let u = s.dispatch(Intent::ClickPanel(Side::Left));
            slide(&mut s, u);
        }
        assert_eq!(s.navigator().position(), Position::TocSplash);
        assert_eq!(s.navigator().current_project(), None);
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Left)), Update::Ignored);
    }

    #[test]
    fn thumbnail_on_image_position_swaps_without_slide() {
        let mut s = studio();
        let u = s.dispatch(Intent::SelectProject("01".into()));
        slide(&mut s, u);
        let u = s.dispatch(Intent::Navigate(Direction::Forward));
        slide(&mut s, u);
        let u = s.dispatch(Intent::SelectImage {
            category: "final_dressed".into(),
            index: 4,
        });
        slide(&mut s, u);
        let u = s.dispatch(Intent::SelectImage {
            category: "final_dressed".into(),
            index: 7,
        });
        assert_eq!(u, Update::Redraw);
        assert_eq!(s.navigator().selected_image().unwrap().index, 7);
    }

    #[test]
    fn intents_during_slide_are_dropped() {
        let mut s = studio();
        let Update::Slide(t) = s.dispatch(Intent::SelectProject("01".into())) else {
            panic!("expected slide");
        };
        assert_eq!(s.dispatch(Intent::Navigate(Direction::Forward)), Update::Ignored);
        assert_eq!(s.dispatch(Intent::ClickPanel(Side::Left)), Update::Ignored);
        assert!(s.finish_slide(t));
        assert_eq!(s.navigator().position(), Position::SplashInfo);
    }

    #[test]
    fn home_resets_navigation_and_listing() {
        let mut s = studio();
        s.dispatch(Intent::SortBy(Column::Area));
        s.dispatch(Intent::FilterBy(Column::Location, Some("Lisbon".into())));
        let u = s.dispatch(Intent::SelectProject("01".into()));
        slide(&mut s, u);
        let u = s.dispatch(Intent::Navigate(Direction::Home));
        slide(&mut s, u);
        assert_eq!(s.navigator().position(), Position::TocSplash);
        assert_eq!(s.navigator().current_project(), None);
        assert_eq!(s.list().sort().key, Column::Id);
        assert!(s.list().filters().is_empty());
    }

    // =========================================================================
    // Row intents
    // =========================================================================

    #[test]
    fn row_swap_runs_through_collapse() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::ToggleRow("01".into())), Update::Redraw);
        let Update::Collapse(c) = s.dispatch(Intent::ToggleRow("03".into())) else {
            panic!("expected collapse");
        };
        assert_eq!(s.dispatch(Intent::ToggleRow("04".into())), Update::Ignored);
        assert!(s.finish_collapse(c));
        assert_eq!(
            s.rows().state(),
            &RowState::Expanded {
                project: "03".into()
            }
        );
    }

    #[test]
    fn overlay_intents() {
        let mut s = studio();
        assert_eq!(s.dispatch(Intent::OpenOverlay(0)), Update::Ignored);
        s.dispatch(Intent::ToggleRow("01".into()));
        assert_eq!(s.dispatch(Intent::NextPage), Update::Redraw);
        assert_eq!(s.dispatch(Intent::OpenOverlay(2)), Update::Redraw);
        let image = s.rows().overlay_image().unwrap();
        assert_eq!(image.index, 11);
        assert_eq!(s.dispatch(Intent::OverlayNext), Update::Redraw);
        let wrapped = s.rows().overlay_image().unwrap();
        assert_eq!((wrapped.category.as_str(), wrapped.index), ("final_dressed", 0));
        assert_eq!(s.dispatch(Intent::CloseOverlay), Update::Redraw);
        assert_eq!(s.dispatch(Intent::CloseOverlay), Update::Ignored);
    }

    #[test]
    fn hidden_expanded_row_ignores_controls() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("01".into()));
        s.dispatch(Intent::OpenOverlay(0));
        assert!(s.expanded_row_visible());

        s.dispatch(Intent::FilterBy(Column::Location, Some("Lisbon".into())));
        assert!(!s.expanded_row_visible());
        assert!(!s.rows().overlay_open());
        for intent in [
            Intent::NextPage,
            Intent::PrevPage,
            Intent::SelectCategory("models".into()),
            Intent::ToggleInverted,
            Intent::OpenOverlay(0),
            Intent::OverlayNext,
        ] {
            assert_eq!(s.dispatch(intent), Update::Ignored);
        }
        assert_eq!(s.rows().gallery().unwrap().page(), 0);

        s.dispatch(Intent::FilterBy(Column::Location, None));
        assert!(s.expanded_row_visible());
        assert_eq!(s.dispatch(Intent::NextPage), Update::Redraw);
    }

    #[test]
    fn load_from_source() {
        let s = Studio::load(sample_source(), SiteConfig::default()).unwrap();
        assert_eq!(s.list().projects().len(), 3);
        let ids: Vec<&str> = s.list().visible_projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["01", "02", "03"]);
    }
}
