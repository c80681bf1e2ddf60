//! Per-project image browsing.
//!
//! A [`GalleryState`] is opened for one project and offers two ways through
//! its images:
//!
//! - **Paged**: one category ("folder") at a time, `page_size` images per
//!   page. Past the last page of a category, `next_page` moves to the first
//!   page of the next category and from the last category back to the first.
//!   Before the first page, `prev_page` moves to the last page of the
//!   previous category; on the very first page it stays put.
//! - **Sequential**: a flattened cursor over every image of every category
//!   (category declaration order, then in-category order). `next_image` and
//!   `prev_image` wrap at both ends, so `next_image` applied `total()` times
//!   returns to the start. `next_in_category` and `prev_in_category` step
//!   the same cursor but wrap inside its current category.
//!
//! Only non-empty categories that are not excluded by policy take part, so
//! every category in the gallery is enterable. A gallery with no categories
//! is empty: every navigation call is a no-op.

use crate::config::GalleryConfig;
use crate::naming;
use crate::types::{ImageRef, Project};
use serde::Serialize;

/// One enterable category with its resolved image paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryCategory {
    pub name: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryState {
    project_id: String,
    categories: Vec<GalleryCategory>,
    active: usize,
    page: usize,
    cursor: usize,
    page_size: usize,
}

impl GalleryState {
    /// Open the gallery of `project` on the first enterable category.
    pub fn open(project: &Project, config: &GalleryConfig) -> Self {
        let categories = project
            .detail
            .images
            .iter()
            .filter(|(name, paths)| {
                !paths.is_empty()
                    && !config
                        .excluded_categories
                        .iter()
                        .any(|ex| ex.as_str() == *name)
            })
            .map(|(name, paths)| GalleryCategory {
                name: name.to_string(),
                images: paths
                    .iter()
                    .map(|p| naming::resolve_asset(&project.directory, p))
                    .collect(),
            })
            .collect();
        Self {
            project_id: project.id.clone(),
            categories,
            active: 0,
            page: 0,
            cursor: 0,
            page_size: config.page_size.max(1),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// True when no category has an image; views show a placeholder.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[GalleryCategory] {
        &self.categories
    }

    pub fn active_category(&self) -> Option<&GalleryCategory> {
        self.categories.get(self.active)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ========================================================================
    // Paged browsing
    // ========================================================================

    pub fn page(&self) -> usize {
        self.page
    }

    /// Pages in the active category; at least 1.
    pub fn page_count(&self) -> usize {
        self.active_category()
            .map(|c| c.images.len().div_ceil(self.page_size))
            .unwrap_or(0)
            .max(1)
    }

    /// Index of the first image of the current page within its category.
    pub fn page_start(&self) -> usize {
        self.page * self.page_size
    }

    /// Images on the current page (may be shorter than `page_size`).
    pub fn page_images(&self) -> &[String] {
        match self.active_category() {
            Some(category) => {
                let start = self.page_start().min(category.images.len());
                let end = (start + self.page_size).min(category.images.len());
                &category.images[start..end]
            }
            None => &[],
        }
    }

    /// Advance one page, rolling into the next category (circularly).
    pub fn next_page(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.page + 1 < self.page_count() {
            self.page += 1;
        } else {
            self.active = (self.active + 1) % self.categories.len();
            self.page = 0;
        }
        true
    }

    /// Go back one page, rolling into the previous category's last page.
    /// Returns false on the first page of the first category.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else if self.active > 0 {
            self.active -= 1;
            self.page = self.page_count() - 1;
            true
        } else {
            false
        }
    }

    /// Switch to `name`, back on its first page and first image.
    /// Unknown and non-enterable categories are ignored.
    pub fn select_category(&mut self, name: &str) -> bool {
        let Some(idx) = self.categories.iter().position(|c| c.name == name) else {
            tracing::debug!(category = name, "ignoring selection of non-enterable category");
            return false;
        };
        self.active = idx;
        self.page = 0;
        self.cursor = self.offset_of(idx);
        true
    }

    // ========================================================================
    // Sequential browsing
    // ========================================================================

    /// Number of images across all categories.
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.images.len()).sum()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Image under the cursor.
    pub fn current(&self) -> Option<ImageRef> {
        self.image_at(self.cursor)
    }

    pub fn next_image(&mut self) -> Option<ImageRef> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % total;
        self.current()
    }

    pub fn prev_image(&mut self) -> Option<ImageRef> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.cursor = (self.cursor + total - 1) % total;
        self.current()
    }

    /// Step to the next image of the cursor's own category, wrapping at its
    /// end. The page stays where it is.
    pub fn next_in_category(&mut self) -> Option<ImageRef> {
        self.step_in_category(true)
    }

    pub fn prev_in_category(&mut self) -> Option<ImageRef> {
        self.step_in_category(false)
    }

    fn step_in_category(&mut self, forward: bool) -> Option<ImageRef> {
        let current = self.current()?;
        let cat_idx = self.categories.iter().position(|c| c.name == current.category)?;
        let len = self.categories[cat_idx].images.len();
        let index = if forward {
            (current.index + 1) % len
        } else {
            (current.index + len - 1) % len
        };
        self.cursor = self.offset_of(cat_idx) + index;
        self.current()
    }

    /// Number of images in `category`; 0 when it is not enterable.
    pub fn category_len(&self, category: &str) -> usize {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map_or(0, |c| c.images.len())
    }

    /// Put the cursor on `category[index]` and bring its page into view.
    /// Out-of-range indices are clamped to the category's last image.
    pub fn select_image(&mut self, category: &str, index: usize) -> Option<ImageRef> {
        let cat_idx = self.categories.iter().position(|c| c.name == category)?;
        let index = index.min(self.categories[cat_idx].images.len() - 1);
        self.active = cat_idx;
        self.page = index / self.page_size;
        self.cursor = self.offset_of(cat_idx) + index;
        self.current()
    }

    /// Image at a flattened position.
    pub fn image_at(&self, flat: usize) -> Option<ImageRef> {
        let mut remaining = flat;
        for category in &self.categories {
            if remaining < category.images.len() {
                return Some(ImageRef {
                    path: category.images[remaining].clone(),
                    category: category.name.clone(),
                    index: remaining,
                });
            }
            remaining -= category.images.len();
        }
        None
    }

    /// Flattened position of `category[index]`.
    pub fn flat_index(&self, category: &str, index: usize) -> Option<usize> {
        let cat_idx = self.categories.iter().position(|c| c.name == category)?;
        (index < self.categories[cat_idx].images.len()).then(|| self.offset_of(cat_idx) + index)
    }

    fn offset_of(&self, cat_idx: usize) -> usize {
        self.categories[..cat_idx]
            .iter()
            .map(|c| c.images.len())
            .sum()
    }
}
