//! Path and label conventions shared by every view.
//!
//! ## Asset paths
//!
//! Detail documents list images relative to the project directory, sometimes
//! with a leading `./`. Assets resolve as plain concatenation:
//!
//! - `content/projects/01/` + `./img/a.jpg` → `content/projects/01/img/a.jpg`
//! - `content/projects/01/` + `img/a.jpg` → `content/projects/01/img/a.jpg`
//!
//! ## Category labels
//!
//! Category keys are snake_case in the documents and title-cased for display:
//! `final_dressed` → "Final Dressed".

/// Resolve a document-relative path against a project directory.
pub fn resolve_asset(directory: &str, relative: &str) -> String {
    let relative = relative.strip_prefix("./").unwrap_or(relative);
    format!("{directory}{relative}")
}

/// Human label for a category key: underscores become spaces and each word
/// starts with an uppercase letter.
pub fn category_label(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The last two segments of an image path (`folder/file.jpg`), used as the
/// caption in the image overlay.
pub fn short_filename(path: &str) -> &str {
    match path.rmatch_indices('/').nth(1) {
        Some((pos, _)) => &path[pos + 1..],
        None => path,
    }
}

/// Split a comma-separated credit value into trimmed, non-empty names.
pub fn split_names(names: &str) -> Vec<&str> {
    names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect()
}

/// Split a description into paragraphs on newlines, dropping blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Format an area value the way the listing shows it: `"120 sqm"`.
pub fn format_area(area_sqm: f64) -> String {
    format!("{area_sqm} sqm")
}
