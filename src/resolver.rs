//! Version inference for uploaded documents.
//!
//! Files are grouped into families by the part of their name before the first
//! `.`; every family shares one integer category. Version strings are read
//! from the end of the name once its extension is removed.

use crate::error::{Error, Result};
use crate::metadata::{get_dates, FileStat, VersionedFileInfo};
use crate::store::{Category, FileRecord, MetadataStore};
use crate::utils::file::{first_dot_stem, strip_extension};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub const NO_VERSION: &str = "0";

static RULES: LazyLock<VersionRules> = LazyLock::new(VersionRules::default);

/// Ordered patterns for reading a version suffix; the first match wins.
pub struct VersionRules {
    patterns: Vec<Regex>,
}

impl Default for VersionRules {
    fn default() -> Self {
        Self {
            patterns: vec![
                // report.2.13, report 1.0.4
                Regex::new(r"(\d+(?:\.\d+)+)$").unwrap(),
                // report 4, report.4
                Regex::new(r"[\s.](\d+)$").unwrap(),
            ],
        }
    }
}

impl VersionRules {
    pub fn extract(&self, file_name: &str) -> String {
        let name = strip_extension(file_name).to_lowercase();

        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(&name))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NO_VERSION.to_string())
    }
}

/// Version string at the end of `file_name`, or `"0"` when none is present.
pub fn extract_version(file_name: &str) -> String {
    RULES.extract(file_name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Names of earlier versions; `None` means a brand-new family.
    pub matches: Option<Vec<String>>,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VersionListing {
    /// Earlier versions with their dates; `None` means a brand-new family.
    pub versions: Option<Vec<VersionedFileInfo>>,
    pub category: Category,
}

/// Decide which records share a family with `file_name` and which category it
/// should be filed under.
///
/// Repeated names in `records` collapse to their last category while keeping
/// the position of their first occurrence. The candidate never matches itself.
/// With no match, the category is one past the highest remaining category;
/// otherwise it is the category of the last matching record. A store whose
/// highest category is `Category::MAX` cannot take a new family.
pub fn resolve_version(file_name: &str, records: &[FileRecord]) -> Result<Resolution> {
    let mut known: Vec<(&str, Category)> = Vec::with_capacity(records.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());

    for record in records {
        match index.get(record.name.as_str()) {
            Some(&i) => known[i].1 = record.category,
            None => {
                index.insert(record.name.as_str(), known.len());
                known.push((record.name.as_str(), record.category));
            }
        }
    }

    known.retain(|(name, _)| *name != file_name);

    let stem = first_dot_stem(file_name);
    let mut matches = Vec::new();
    let mut matched_category = None;

    for (name, cat) in &known {
        if first_dot_stem(name) == stem {
            matches.push(name.to_string());
            matched_category = Some(*cat);
        }
    }

    let category = match matched_category {
        Some(category) => category,
        None => next_category(&known)?,
    };

    log::debug!(
        "Resolved {} against {} record(s): {} match(es), category {}",
        file_name,
        known.len(),
        matches.len(),
        category
    );

    Ok(Resolution {
        matches: if matches.is_empty() { None } else { Some(matches) },
        category,
    })
}

fn next_category(known: &[(&str, Category)]) -> Result<Category> {
    let highest = known.iter().map(|(_, c)| *c).max().unwrap_or(0);
    highest
        .checked_add(1)
        .ok_or_else(|| Error::Internal(format!("No category left after {}", highest)))
}

/// Resolves uploads against a metadata store and a folder on disk.
///
/// Category allocation is not serialized: two concurrent callers may both
/// compute the same new category for different families.
pub struct VersionResolver<S, F> {
    store: S,
    stat: F,
}

impl<S: MetadataStore, F: FileStat> VersionResolver<S, F> {
    pub fn new(store: S, stat: F) -> Self {
        Self { store, stat }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn resolve(&self, file_name: &str) -> Result<Resolution> {
        if file_name.is_empty() {
            return Err(Error::Internal("File name must not be empty".to_string()));
        }

        let records = self.store.all_file_names_and_categories()?;
        resolve_version(file_name, &records)
    }

    pub fn list_versioned_files(&self, file_name: &str, folder: &Path) -> Result<VersionListing> {
        let resolution = self.resolve(file_name)?;

        let versions = match resolution.matches {
            Some(names) => Some(
                names
                    .iter()
                    .map(|name| get_dates(name, folder, &self.stat))
                    .collect::<Result<Vec<_>>>()
                    .map_err(|e| {
                        Error::internal("An error occurred while listing the versioned files", e)
                    })?,
            ),
            None => None,
        };

        Ok(VersionListing {
            versions,
            category: resolution.category,
        })
    }
}
