//! Data model shared by the store, the state machines and the renderer.
//!
//! Two documents feed the site:
//!
//! ```text
//! content/toc.json                       # ordered project list
//! content/projects/01-harbor/project.json  # per-project detail
//! ```
//!
//! The TOC is strict about `id` and `directory` and lenient about everything
//! else: `year` may be a number, a numeric string, `"unknown"` or absent;
//! `area_sqm` may be a number or a numeric string. Missing metadata never
//! fails a load.
//!
//! Detail documents are JSON objects whose `images` and `credits` members are
//! *ordered* mappings. JSON object order carries meaning here (category
//! declaration order drives gallery order), so both are deserialized into
//! ordered vectors rather than maps.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The table-of-contents document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TocDocument {
    pub projects: Vec<TocEntry>,
}

/// One project row as declared in the TOC.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TocEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub directory: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub year: Year,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub program: Option<String>,
    #[serde(default, alias = "address", deserialize_with = "non_empty_string")]
    pub location: Option<String>,
    #[serde(default, alias = "area", deserialize_with = "lenient_number")]
    pub area_sqm: Option<f64>,
}

/// Completion year of a project. Anything unparseable is `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Year {
    Known(i32),
    #[default]
    Unknown,
}

impl Year {
    /// Numeric sort value; unknown years sort as 0.
    pub fn sort_value(self) -> i64 {
        match self {
            Year::Known(y) => i64::from(y),
            Year::Unknown => 0,
        }
    }

    pub fn known(self) -> Option<i32> {
        match self {
            Year::Known(y) => Some(y),
            Year::Unknown => None,
        }
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .map(Year::Known)
                .unwrap_or(Year::Unknown),
            Value::String(s) => s.trim().parse().map(Year::Known).unwrap_or(Year::Unknown),
            _ => Year::Unknown,
        })
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Year::Known(y) => serializer.serialize_i32(*y),
            Year::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Per-project detail document (`<directory>project.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectDetail {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub images: ImageCategories,
}

/// Image categories ("folders") in declaration order.
///
/// Non-array members are dropped, as are non-string array items. Empty
/// categories are kept here; the gallery decides what is enterable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageCategories(Vec<(String, Vec<String>)>);

impl ImageCategories {
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Self {
        Self(categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, paths)| paths.as_slice())
    }

    /// Total number of images across every category.
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, paths)| paths.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<'de> Deserialize<'de> for ImageCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let categories = deserializer
            .deserialize_any(OrderedEntries)?
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Array(items) => {
                    let paths = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(path) => Some(path),
                            _ => None,
                        })
                        .collect();
                    Some((name, paths))
                }
                _ => None,
            })
            .collect();
        Ok(Self(categories))
    }
}

impl Serialize for ImageCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, paths) in &self.0 {
            map.serialize_entry(name, paths)?;
        }
        map.end()
    }
}

/// A single credit line: a role and its comma-separated names.
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    pub role: String,
    pub names: String,
}

/// Credits in declaration order. Non-string values are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credits(Vec<Credit>);

impl Credits {
    pub fn new(credits: Vec<Credit>) -> Self {
        Self(credits)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Credit> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let credits = deserializer
            .deserialize_any(OrderedEntries)?
            .into_iter()
            .filter_map(|(role, value)| match value {
                Value::String(names) => Some(Credit { role, names }),
                _ => None,
            })
            .collect();
        Ok(Self(credits))
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for credit in &self.0 {
            map.serialize_entry(&credit.role, &credit.names)?;
        }
        map.end()
    }
}

/// A project as held in memory for the page session.
///
/// `directory` already carries the configured base path and always ends with
/// `/`, so document and asset paths are plain concatenations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub year: Year,
    pub program: Option<String>,
    pub location: Option<String>,
    pub area_sqm: Option<f64>,
    pub directory: String,
    pub detail: ProjectDetail,
    /// False when the detail document could not be fetched or parsed.
    pub detail_loaded: bool,
}

impl Project {
    pub fn from_entry(entry: TocEntry, base_path: &str) -> Self {
        let mut directory = format!("{base_path}{}", entry.directory);
        if !directory.is_empty() && !directory.ends_with('/') {
            directory.push('/');
        }
        Self {
            id: entry.id,
            name: entry.name,
            year: entry.year,
            program: entry.program,
            location: entry.location,
            area_sqm: entry.area_sqm,
            directory,
            detail: ProjectDetail::default(),
            detail_loaded: false,
        }
    }

    /// Title for headings: the detail title wins over the TOC name.
    pub fn title(&self) -> &str {
        self.detail
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn image_count(&self) -> usize {
        self.detail.images.total()
    }
}

/// Stable cross-category reference to one image of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Resolved asset path (`directory + relative path`).
    pub path: String,
    pub category: String,
    pub index: usize,
}

// ============================================================================
// Lenient field deserializers
// ============================================================================

/// Visits a JSON object into `(key, value)` pairs, preserving document order.
/// `null` is an empty object. A repeated key keeps its first position and the
/// last value.
struct OrderedEntries;

impl<'de> Visitor<'de> for OrderedEntries {
    type Value = Vec<(String, Value)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, Value)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(entries)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn non_empty_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
