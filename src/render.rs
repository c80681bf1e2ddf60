//! View rendering.
//!
//! Rendering is two pure steps, both recomputable from state at any time:
//!
//! ```text
//! Studio state ──views──► *View structs (serde::Serialize) ──markup──► maud::Markup
//! ```
//!
//! The view structs are the contract with whatever draws the page: the CLI
//! prints them as JSON, and the `*_markup` functions turn them into HTML
//! fragments with [Maud](https://maud.lambda.xyz/). All interpolated text is
//! escaped by Maud.
//!
//! Two independent views exist:
//!
//! - [`ListingView`]: the single-page grid listing with its expanded detail
//!   row and image overlay.
//! - [`PanelsView`]: the two visible pages of the panel navigator.

use crate::config::ContentConfig;
use crate::expansion::Expansion;
use crate::gallery::GalleryState;
use crate::list::{Column, ListState};
use crate::naming;
use crate::navigation::{Navigator, Panel, Position};
use crate::studio::Studio;
use crate::types::{ImageRef, Project};
use maud::{DOCTYPE, Markup, html};
use serde::Serialize;

/// Everything on screen for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteView {
    pub listing: ListingView,
    pub panels: PanelsView,
}

// ============================================================================
// Grid listing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    /// Dark-on-light treatment toggled from the expanded row.
    pub inverted: bool,
    pub overlay: Option<OverlayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub column: Column,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortArrow>,
    pub filter: Option<FilterView>,
}

/// Direction arrow of the active sort column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortArrow {
    /// `↓` ascending, `↑` descending.
    pub arrow: &'static str,
    /// Numeric columns carry the arrow before the label.
    pub leading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterView {
    pub options: Vec<FilterOption>,
    /// Set when a value is active; the header then offers a clear control.
    pub active: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: String,
    pub thumb: String,
    pub name: String,
    pub year: String,
    pub program: String,
    pub location: String,
    pub area: String,
    pub expanded: bool,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// False when the detail document failed to load; nothing else is shown.
    pub loaded: bool,
    /// Always `page_size` slots; short pages are padded with placeholders.
    pub slots: Vec<Slot>,
    pub folders: Vec<FolderLink>,
    pub credits: Vec<CreditView>,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    Image { src: String, slot: usize },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderLink {
    pub category: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditView {
    pub role: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub src: String,
    /// Stepping controls and caption appear only with more than one image.
    pub nav: bool,
    pub caption: Option<String>,
}

pub fn listing_view(list: &ListState, rows: &Expansion, content: &ContentConfig) -> ListingView {
    let header = Column::ALL
        .into_iter()
        .map(|column| header_cell(list, column))
        .collect();

    let expanded = rows.expanded_project();
    let rows_view: Vec<RowView> = list
        .visible_projects()
        .into_iter()
        .map(|project| {
            let is_expanded = expanded == Some(project.id.as_str());
            let detail = if is_expanded {
                rows.gallery().map(|g| detail_view(project, g))
            } else {
                None
            };
            row_view(project, content, is_expanded, detail)
        })
        .collect();

    // An overlay only ever sits over a listed row.
    let row_listed = rows_view.iter().any(|row| row.expanded);
    let overlay = rows
        .overlay_image()
        .filter(|_| row_listed)
        .map(|image| overlay_view(&image, rows.overlay_len()));

    ListingView {
        header,
        rows: rows_view,
        inverted: rows.is_inverted(),
        overlay,
    }
}

fn header_cell(list: &ListState, column: Column) -> HeaderCell {
    let sort = list.sort();
    let arrow = (sort.key == column).then(|| SortArrow {
        arrow: if sort.ascending { "↓" } else { "↑" },
        leading: column.is_numeric(),
    });
    let filter = list.filter_columns().contains(&column).then(|| {
        let active = list.filters().get(column).map(str::to_string);
        FilterView {
            options: list
                .unique_values(column)
                .into_iter()
                .map(|value| FilterOption {
                    active: active.as_deref() == Some(value.as_str()),
                    value,
                })
                .collect(),
            active,
        }
    });
    HeaderCell {
        column,
        label: naming::category_label(column.as_str()),
        sortable: column.is_sortable(),
        sort: arrow,
        filter,
    }
}

fn row_view(
    project: &Project,
    content: &ContentConfig,
    expanded: bool,
    detail: Option<DetailView>,
) -> RowView {
    let text = |column: Column| column.text(project).unwrap_or_default();
    RowView {
        id: project.id.clone(),
        thumb: format!("{}{}", project.directory, content.thumb_file),
        name: project.name.clone(),
        year: text(Column::Year),
        program: text(Column::Program),
        location: text(Column::Location),
        area: text(Column::Area),
        expanded,
        detail,
    }
}

fn detail_view(project: &Project, gallery: &GalleryState) -> DetailView {
    if !project.detail_loaded {
        return DetailView {
            loaded: false,
            slots: Vec::new(),
            folders: Vec::new(),
            credits: Vec::new(),
            paragraphs: Vec::new(),
        };
    }
    let mut slots: Vec<Slot> = gallery
        .page_images()
        .iter()
        .enumerate()
        .map(|(slot, src)| Slot::Image {
            src: src.clone(),
            slot,
        })
        .collect();
    slots.resize(gallery.page_size().max(slots.len()), Slot::Placeholder);

    let active = gallery.active_category().map(|c| c.name.as_str());
    DetailView {
        loaded: true,
        slots,
        folders: gallery
            .categories()
            .iter()
            .map(|c| FolderLink {
                category: c.name.clone(),
                label: naming::category_label(&c.name),
                active: active == Some(c.name.as_str()),
            })
            .collect(),
        credits: credits_view(project),
        paragraphs: description_paragraphs(project),
    }
}

fn credits_view(project: &Project) -> Vec<CreditView> {
    project
        .detail
        .credits
        .iter()
        .map(|credit| CreditView {
            role: credit.role.clone(),
            names: naming::split_names(&credit.names)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .filter(|credit| !credit.names.is_empty())
        .collect()
}

fn description_paragraphs(project: &Project) -> Vec<String> {
    project
        .detail
        .description
        .as_deref()
        .map(naming::paragraphs)
        .unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn overlay_view(image: &ImageRef, folder_len: usize) -> OverlayView {
    let nav = folder_len > 1;
    OverlayView {
        src: image.path.clone(),
        nav,
        caption: nav.then(|| naming::short_filename(&image.path).to_string()),
    }
}

// ============================================================================
// Panels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelsView {
    pub position: Position,
    pub left: PanelView,
    pub right: PanelView,
    /// The left page reacts to clicks (back) only away from home.
    pub left_clickable: bool,
    pub right_clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PanelView {
    Toc { entries: Vec<TocEntryView> },
    Splash { src: String },
    Info(InfoView),
    Gallery(GalleryView),
    Image { src: String, category: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntryView {
    pub id: String,
    pub name: String,
    pub previewed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoView {
    pub title: String,
    pub program: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub year: Option<String>,
    pub paragraphs: Vec<String>,
    pub credits: Vec<CreditView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    pub sections: Vec<GallerySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GallerySection {
    pub category: String,
    pub label: String,
    pub thumbs: Vec<Thumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumb {
    pub src: String,
    pub category: String,
    pub index: usize,
    pub active: bool,
}

pub fn panels_view(nav: &Navigator, list: &ListState, content: &ContentConfig) -> PanelsView {
    let [left, right] = nav.panels();
    PanelsView {
        position: nav.position(),
        left: panel_view(&left, nav, list, content),
        right: panel_view(&right, nav, list, content),
        left_clickable: nav.position() > Position::TocSplash,
        right_clickable: true,
    }
}

/// Content of one logical page. Also used for the pages a transition
/// slides in.
pub fn panel_view(
    panel: &Panel,
    nav: &Navigator,
    list: &ListState,
    content: &ContentConfig,
) -> PanelView {
    match panel {
        Panel::Toc => PanelView::Toc {
            entries: list
                .projects()
                .iter()
                .map(|p| TocEntryView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    previewed: nav.preview_project() == Some(p.id.as_str()),
                })
                .collect(),
        },
        Panel::Splash { project } => {
            let src = project
                .as_deref()
                .and_then(|id| list.project(id))
                .map(|p| format!("{}{}", p.directory, content.splash_file))
                .unwrap_or_else(|| content.default_splash.clone());
            PanelView::Splash { src }
        }
        Panel::Info { project } => PanelView::Info(match list.project(project) {
            Some(p) => info_view(p),
            None => InfoView {
                title: String::new(),
                program: None,
                location: None,
                area: None,
                year: None,
                paragraphs: Vec::new(),
                credits: Vec::new(),
            },
        }),
        Panel::Gallery { .. } => PanelView::Gallery(gallery_view(nav)),
        Panel::Image { image } => PanelView::Image {
            src: image.path.clone(),
            category: image.category.clone(),
            index: image.index,
        },
    }
}

fn info_view(project: &Project) -> InfoView {
    InfoView {
        title: project.title().to_string(),
        program: Column::Program.text(project),
        location: Column::Location.text(project),
        area: Column::Area.text(project),
        year: Column::Year.text(project),
        paragraphs: description_paragraphs(project),
        credits: credits_view(project),
    }
}

fn gallery_view(nav: &Navigator) -> GalleryView {
    let Some(gallery) = nav.gallery() else {
        return GalleryView {
            sections: Vec::new(),
        };
    };
    let selected = nav.selected_image();
    GalleryView {
        sections: gallery
            .categories()
            .iter()
            .map(|c| GallerySection {
                category: c.name.clone(),
                label: naming::category_label(&c.name),
                thumbs: c
                    .images
                    .iter()
                    .enumerate()
                    .map(|(index, src)| Thumb {
                        src: src.clone(),
                        category: c.name.clone(),
                        index,
                        active: selected
                            .is_some_and(|s| s.category == c.name && s.index == index),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Both views of a session.
pub fn site_view(studio: &Studio) -> SiteView {
    let content = &studio.config().content;
    SiteView {
        listing: listing_view(studio.list(), studio.rows(), content),
        panels: panels_view(studio.navigator(), studio.list(), content),
    }
}

// ============================================================================
// Markup
// ============================================================================

/// Renders the base HTML document structure
pub fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

/// Full page holding both views.
pub fn site_markup(title: &str, view: &SiteView) -> Markup {
    base_document(
        title,
        html! {
            (panels_markup(&view.panels))
            (listing_markup(&view.listing))
        },
    )
}

pub fn listing_markup(view: &ListingView) -> Markup {
    html! {
        div.project-grid.inverted[view.inverted] {
            div.grid-header {
                @for cell in &view.header {
                    (header_markup(cell))
                }
            }
            div id="project-body" {
                @for row in &view.rows {
                    (row_markup(row))
                }
            }
        }
        @if let Some(overlay) = &view.overlay {
            (overlay_markup(overlay))
        }
    }
}

fn header_markup(cell: &HeaderCell) -> Markup {
    let leading = cell.sort.as_ref().filter(|s| s.leading);
    let trailing = cell.sort.as_ref().filter(|s| !s.leading);
    html! {
        span class={ "col-" (cell.column.as_str()) } data-column=(cell.column.as_str()) data-sortable[cell.sortable] {
            @if let Some(sort) = leading {
                span.sort-arrow { (sort.arrow) " " }
            }
            (cell.label)
            @if let Some(sort) = trailing {
                span.sort-arrow { " " (sort.arrow) }
            }
            @if let Some(filter) = &cell.filter {
                @if filter.active.is_some() {
                    span.filter-clear { " ×" }
                }
                div.filter-dropdown {
                    @for option in &filter.options {
                        div.filter-option.active[option.active] data-value=(option.value) {
                            (option.value)
                        }
                    }
                }
            }
        }
    }
}

fn row_markup(row: &RowView) -> Markup {
    html! {
        div.grid-row.expanded[row.expanded] data-project-id=(row.id) {
            span.col-id { (row.id) }
            span.col-thumb { img.row-thumb src=(row.thumb) alt=(row.name); }
            span.col-name { (row.name) }
            span.col-year { (row.year) }
            span.col-program { (row.program) }
            span.col-location { (row.location) }
            span.col-area { (row.area) }
        }
        @if let Some(detail) = &row.detail {
            (detail_markup(detail))
        }
    }
}

fn detail_markup(detail: &DetailView) -> Markup {
    html! {
        div.detail-row {
            @if !detail.loaded {
                div.detail-info { p { "Could not load project details." } }
            } @else {
                div.detail-images-container {
                    div.detail-images {
                        @for slot in &detail.slots {
                            @match slot {
                                Slot::Image { src, slot: index } => {
                                    img src=(src) data-slot=(index) alt="";
                                }
                                Slot::Placeholder => {
                                    span.image-placeholder {}
                                }
                            }
                        }
                    }
                    div.image-nav {
                        span.image-arrow.image-prev { "←" }
                        @for folder in &detail.folders {
                            span.folder-link.active[folder.active] data-folder=(folder.category) {
                                (folder.label)
                            }
                        }
                        span.image-arrow.image-next { "→" }
                    }
                }
                div.detail-info {
                    (credits_markup(&detail.credits))
                    @for paragraph in &detail.paragraphs {
                        p.detail-description { (paragraph) }
                    }
                    span.wip-link { "WIP" }
                }
            }
        }
    }
}

fn credits_markup(credits: &[CreditView]) -> Markup {
    html! {
        @if !credits.is_empty() {
            div.detail-credits {
                @for credit in credits {
                    p {
                        span.credit-role { (credit.role) ":" }
                        @for name in &credit.names {
                            br;
                            (name)
                        }
                    }
                }
            }
        }
    }
}

fn overlay_markup(overlay: &OverlayView) -> Markup {
    html! {
        div.image-overlay {
            div.image-overlay-box {
                img src=(overlay.src) alt="";
                @if overlay.nav {
                    div.image-overlay-nav {
                        span.overlay-arrow.overlay-prev { "←" }
                        @if let Some(caption) = &overlay.caption {
                            span.overlay-filename { (caption) }
                        }
                        span.overlay-arrow.overlay-next { "→" }
                    }
                }
            }
        }
    }
}

pub fn panels_markup(view: &PanelsView) -> Markup {
    html! {
        div.panels data-position=(view.position.index()) {
            div.panel.panel-left.clickable[view.left_clickable] {
                (panel_markup(&view.left))
            }
            div.panel.panel-right.clickable[view.right_clickable] {
                (panel_markup(&view.right))
            }
        }
    }
}

pub fn panel_markup(panel: &PanelView) -> Markup {
    match panel {
        PanelView::Toc { entries } => html! {
            ul.toc {
                @for entry in entries {
                    li.previewed[entry.previewed] data-project-id=(entry.id) {
                        a href="#" { (entry.name) }
                    }
                }
            }
        },
        PanelView::Splash { src } => html! {
            img.splash src=(src) alt="";
        },
        PanelView::Info(info) => html! {
            div.info {
                h1 { (info.title) }
                dl {
                    @for (label, value) in [
                        ("Program", &info.program),
                        ("Address", &info.location),
                        ("Area", &info.area),
                        ("Year", &info.year),
                    ] {
                        @if let Some(value) = value {
                            dt { (label) }
                            dd { (value) }
                        }
                    }
                }
                @for paragraph in &info.paragraphs {
                    p { (paragraph) }
                }
                (credits_markup(&info.credits))
            }
        },
        PanelView::Gallery(gallery) => html! {
            div.gallery {
                @if gallery.sections.is_empty() {
                    p.gallery-empty { "No images." }
                }
                @for section in &gallery.sections {
                    section data-category=(section.category) {
                        h2 { (section.label) }
                        div.thumbs {
                            @for thumb in &section.thumbs {
                                img.thumb.active[thumb.active]
                                    src=(thumb.src)
                                    data-category=(thumb.category)
                                    data-index=(thumb.index)
                                    alt="";
                            }
                        }
                    }
                }
            }
        },
        PanelView::Image { src, category, index } => html! {
            img.full-image src=(src) data-category=(category) data-index=(index) alt="";
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::navigation::Direction;
    use crate::studio::{Intent, Update};
    use crate::test_helpers::*;

    fn studio() -> Studio {
        Studio::new(sample_projects_with_details(), SiteConfig::default())
    }

    fn slide(s: &mut Studio, update: Update) {
        match update {
            Update::Slide(t) => assert!(s.finish_slide(t)),
            other => panic!("expected slide, got {other:?}"),
        }
    }

    fn header<'a>(view: &'a ListingView, column: Column) -> &'a HeaderCell {
        view.header.iter().find(|c| c.column == column).unwrap()
    }

    // =========================================================================
    // Listing view
    // =========================================================================

    #[test]
    fn listing_rows_follow_visible_projects() {
        let s = studio();
        let view = site_view(&s).listing;
        let ids: Vec<&str> = view.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["01", "02", "03", "04", "05"]);
        let harbor = &view.rows[0];
        assert_eq!(harbor.thumb, "content/projects/01/thumb.jpg");
        assert_eq!(harbor.area, "120 sqm");
        assert_eq!(view.rows[3].year, "");
        assert_eq!(view.rows[4].area, "");
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("01".into()));
        assert_eq!(site_view(&s), site_view(&s));
    }

    #[test]
    fn sort_arrow_leads_numeric_columns() {
        let mut s = studio();
        let view = site_view(&s).listing;
        let id = header(&view, Column::Id).sort.clone().unwrap();
        assert_eq!((id.arrow, id.leading), ("↓", false));

        s.dispatch(Intent::SortBy(Column::Year));
        s.dispatch(Intent::SortBy(Column::Year));
        let view = site_view(&s).listing;
        assert!(header(&view, Column::Id).sort.is_none());
        let year = header(&view, Column::Year).sort.clone().unwrap();
        assert_eq!((year.arrow, year.leading), ("↑", true));
    }

    #[test]
    fn filter_header_lists_values_and_active() {
        let mut s = studio();
        s.dispatch(Intent::FilterBy(Column::Location, Some("Lisbon".into())));
        let view = site_view(&s).listing;
        let filter = header(&view, Column::Location).filter.clone().unwrap();
        let values: Vec<&str> = filter.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Braga", "Lisbon", "Porto"]);
        assert_eq!(filter.active.as_deref(), Some("Lisbon"));
        assert!(filter.options[1].active);
        assert!(header(&view, Column::Name).filter.is_none());
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn expanded_row_has_padded_page() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("01".into()));
        s.dispatch(Intent::NextPage);
        let view = site_view(&s).listing;
        let detail = view.rows[0].detail.clone().unwrap();
        assert_eq!(detail.slots.len(), 9);
        let images = detail.slots.iter().filter(|s| matches!(s, Slot::Image { .. })).count();
        assert_eq!(images, 3);
        assert_eq!(detail.slots[3], Slot::Placeholder);
        let folders: Vec<(&str, bool)> = detail
            .folders
            .iter()
            .map(|f| (f.label.as_str(), f.active))
            .collect();
        assert_eq!(folders, vec![("Final Dressed", true), ("Models", false)]);
        assert_eq!(detail.credits[1].names, vec!["Ana Reis", "Tomas Lima"]);
        assert_eq!(detail.paragraphs, vec!["A house on the quay.", "Timber and stone."]);
        assert!(view.rows[1].detail.is_none());
    }

    #[test]
    fn failed_detail_row_shows_message() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("02".into()));
        let view = site_view(&s).listing;
        let detail = view.rows[1].detail.clone().unwrap();
        assert!(!detail.loaded);
        let html = listing_markup(&view).into_string();
        assert!(html.contains("Could not load project details."));
    }

    #[test]
    fn expanded_row_survives_resort_and_hides_when_filtered() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("03".into()));
        s.dispatch(Intent::SortBy(Column::Name));
        let view = site_view(&s).listing;
        let expanded: Vec<&str> = view
            .rows
            .iter()
            .filter(|r| r.expanded)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(expanded, vec!["03"]);

        s.dispatch(Intent::FilterBy(Column::Location, Some("Porto".into())));
        let view = site_view(&s).listing;
        assert!(view.rows.iter().all(|r| !r.expanded));
    }

    #[test]
    fn overlay_caption_only_with_several_images() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("01".into()));
        s.dispatch(Intent::OpenOverlay(0));
        let overlay = site_view(&s).listing.overlay.unwrap();
        assert!(overlay.nav);
        assert_eq!(overlay.caption.as_deref(), Some("final_dressed/01.jpg"));

        let single = project_with_images("x", &[("final_dressed", 1)]);
        let mut s = Studio::new(vec![single], SiteConfig::default());
        s.dispatch(Intent::ToggleRow("x".into()));
        s.dispatch(Intent::OpenOverlay(0));
        let overlay = site_view(&s).listing.overlay.unwrap();
        assert!(!overlay.nav);
        assert_eq!(overlay.caption, None);
    }

    #[test]
    fn overlay_nav_follows_its_folder() {
        let p = project_with_images("x", &[("final_dressed", 3), ("models", 1)]);
        let mut s = Studio::new(vec![p], SiteConfig::default());
        s.dispatch(Intent::ToggleRow("x".into()));
        s.dispatch(Intent::SelectCategory("models".into()));
        s.dispatch(Intent::OpenOverlay(0));
        let overlay = site_view(&s).listing.overlay.unwrap();
        assert_eq!(overlay.src, "content/projects/x/models/01.jpg");
        assert!(!overlay.nav);
    }

    #[test]
    fn filtering_out_the_expanded_row_drops_its_overlay() {
        let mut s = studio();
        s.dispatch(Intent::ToggleRow("01".into()));
        s.dispatch(Intent::OpenOverlay(0));
        assert!(site_view(&s).listing.overlay.is_some());
        s.dispatch(Intent::FilterBy(Column::Location, Some("Lisbon".into())));
        assert!(site_view(&s).listing.overlay.is_none());
    }

    // =========================================================================
    // Panels view
    // =========================================================================

    #[test]
    fn home_panels_show_default_splash() {
        let s = studio();
        let panels = site_view(&s).panels;
        assert!(!panels.left_clickable);
        assert!(panels.right_clickable);
        assert!(matches!(&panels.left, PanelView::Toc { entries } if entries.len() == 5));
        assert_eq!(
            panels.right,
            PanelView::Splash {
                src: "./img/splash.jpg".into()
            }
        );
    }

    #[test]
    fn hover_swaps_splash() {
        let mut s = studio();
        s.dispatch(Intent::HoverProject("03".into()));
        let panels = site_view(&s).panels;
        assert_eq!(
            panels.right,
            PanelView::Splash {
                src: "content/projects/03/img/splash.jpg".into()
            }
        );
        let PanelView::Toc { entries } = panels.left else {
            panic!("expected toc");
        };
        let previewed: Vec<&str> = entries
            .iter()
            .filter(|e| e.previewed)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(previewed, vec!["03"]);
    }

    #[test]
    fn info_and_gallery_panels() {
        let mut s = studio();
        let u = s.dispatch(Intent::SelectProject("01".into()));
        slide(&mut s, u);
        let u = s.dispatch(Intent::Navigate(Direction::Forward));
        slide(&mut s, u);
        s.dispatch(Intent::SelectImage {
            category: "models".into(),
            index: 1,
        });
        let panels = site_view(&s).panels;
        assert!(panels.left_clickable);

        let PanelView::Info(info) = panels.left else {
            panic!("expected info");
        };
        assert_eq!(info.title, "Harbor House, Porto");
        assert_eq!(info.area.as_deref(), Some("120 sqm"));
        assert_eq!(info.credits.len(), 2);

        // Mid-slide the gallery pair is still on screen
        let PanelView::Gallery(gallery) = panels.right else {
            panic!("expected gallery");
        };
        let labels: Vec<&str> = gallery.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Final Dressed", "Models"]);
        let active: Vec<(&str, usize)> = gallery
            .sections
            .iter()
            .flat_map(|s| &s.thumbs)
            .filter(|t| t.active)
            .map(|t| (t.category.as_str(), t.index))
            .collect();
        assert_eq!(active, vec![("models", 1)]);
    }

    #[test]
    fn excluded_only_gallery_is_empty() {
        let mut s = studio();
        let u = s.dispatch(Intent::SelectProject("05".into()));
        slide(&mut s, u);
        let u = s.dispatch(Intent::Navigate(Direction::Forward));
        slide(&mut s, u);
        let panels = site_view(&s).panels;
        let PanelView::Gallery(gallery) = &panels.right else {
            panic!("expected gallery");
        };
        assert!(gallery.sections.is_empty());
        assert!(panels_markup(&panels).into_string().contains("No images."));
    }

    // =========================================================================
    // Markup
    // =========================================================================

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Studio", html! { p { "test" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Studio</title>"));
    }

    #[test]
    fn header_markup_places_arrows() {
        let mut s = studio();
        let html = listing_markup(&site_view(&s).listing).into_string();
        assert!(html.contains("Id<span class=\"sort-arrow\"> ↓</span>"));

        s.dispatch(Intent::SortBy(Column::Area));
        let html = listing_markup(&site_view(&s).listing).into_string();
        assert!(html.contains("<span class=\"sort-arrow\">↓ </span>Area"));
    }

    #[test]
    fn filter_clear_only_when_active() {
        let mut s = studio();
        let html = listing_markup(&site_view(&s).listing).into_string();
        assert!(!html.contains("filter-clear"));
        s.dispatch(Intent::FilterBy(Column::Program, Some("Cultural".into())));
        let html = listing_markup(&site_view(&s).listing).into_string();
        assert_eq!(html.matches("filter-clear").count(), 1);
    }

    #[test]
    fn site_markup_renders_both_views() {
        let s = studio();
        let html = site_markup("Studio", &site_view(&s)).into_string();
        assert!(html.contains("class=\"panels\""));
        assert!(html.contains("id=\"project-body\""));
        assert!(html.contains("data-project-id=\"05\""));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut p = project("x", "<script>alert('xss')</script>", crate::types::Year::Unknown);
        p.detail_loaded = true;
        let s = Studio::new(vec![p], SiteConfig::default());
        let html = site_markup("Studio", &site_view(&s)).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
