//! The PoP registry file model.
//!
//! Two files are involved: the full listing (`pop_all.json`, everything the
//! directory knows about, annotated or not) and the canonical registry
//! (`pop.json`, only entries carrying both a code and a subnet). The
//! registry path is always passed in explicitly; there is no
//! executable-relative lookup.

use crate::error::Result;
use crate::types::{ListedPop, Pop};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The canonical registry: verified PoPs, sorted by id
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pops: Vec<Pop>,
}

/// A non-fatal problem found while filtering the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterWarning {
    /// The entry carries only one of code/subnet and was excluded
    PartialAnnotation {
        /// Name of the offending entry
        name: String,
    },
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialAnnotation { name } => {
                write!(f, "{name} has only subnet or code")
            }
        }
    }
}

impl Registry {
    /// Load the canonical registry from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let pops: Vec<Pop> = serde_json::from_str(&content)?;
        Ok(Self { pops })
    }

    /// Save the canonical registry as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(&self.pops)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the canonical registry out of a listing.
    ///
    /// Entries carrying both code and subnet are kept (annotations
    /// included); entries carrying exactly one of them produce a warning
    /// and are dropped; unannotated entries are dropped silently. The
    /// result is sorted by id.
    #[must_use]
    pub fn from_listing(listing: &[ListedPop]) -> (Self, Vec<FilterWarning>) {
        let mut pops = Vec::new();
        let mut warnings = Vec::new();

        for entry in listing {
            if entry.is_verified() {
                // is_verified guarantees both fields are present
                let (Some(code), Some(subnet)) = (entry.code.clone(), entry.subnet) else {
                    continue;
                };
                pops.push(Pop {
                    id: entry.id.clone(),
                    name: Some(entry.name.clone()),
                    location: Some(entry.location.clone()),
                    country: Some(entry.country.clone()),
                    subnet,
                    code,
                    neighbors: entry.neighbors.clone(),
                });
            } else if entry.is_partially_annotated() {
                warnings.push(FilterWarning::PartialAnnotation {
                    name: entry.name.clone(),
                });
            }
        }

        pops.sort_by(|a, b| a.id.cmp(&b.id));
        (Self { pops }, warnings)
    }

    /// Iterate the PoPs in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Pop> {
        self.pops.iter()
    }

    /// All PoPs in registry order
    #[must_use]
    pub fn pops(&self) -> &[Pop] {
        &self.pops
    }

    /// Number of PoPs in the registry
    #[must_use]
    pub fn len(&self) -> usize {
        self.pops.len()
    }

    /// Returns true if the registry holds no PoPs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pops.is_empty()
    }
}

impl From<Vec<Pop>> for Registry {
    fn from(pops: Vec<Pop>) -> Self {
        Self { pops }
    }
}

impl IntoIterator for Registry {
    type Item = Pop;
    type IntoIter = std::vec::IntoIter<Pop>;

    fn into_iter(self) -> Self::IntoIter {
        self.pops.into_iter()
    }
}

/// Load the full listing from a JSON file
pub fn load_listing(path: &Path) -> Result<Vec<ListedPop>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the full listing as pretty-printed JSON
pub fn save_listing(listing: &[ListedPop], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(listing)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

/// Carry code/subnet/neighbor annotations from an earlier listing over to
/// a freshly fetched one, matching entries by id.
///
/// A refresh pulls descriptive metadata from the directory, but the
/// annotations live only in our files; without this step every refresh
/// would wipe them.
pub fn merge_annotations(fetched: &mut [ListedPop], existing: &[ListedPop]) {
    let by_id: HashMap<&str, &ListedPop> = existing
        .iter()
        .map(|entry| (entry.id.as_str(), entry))
        .collect();

    for entry in fetched {
        if let Some(previous) = by_id.get(entry.id.as_str()) {
            entry.code.clone_from(&previous.code);
            entry.subnet = previous.subnet;
            entry.neighbors.clone_from(&previous.neighbors);
        }
    }
}
