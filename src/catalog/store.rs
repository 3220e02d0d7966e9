use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::sequence::Sequence;
use crate::parsing::markers::parse_marker_text;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Marker '{0}' has an empty pattern")]
    EmptyPattern(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// A disease marker: a name and the subsequence that indicates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    name: String,
    pattern: Sequence,
}

impl Marker {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marker pattern (never empty)
    #[must_use]
    pub fn pattern(&self) -> &Sequence {
        &self.pattern
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub markers: Vec<Marker>,
}

/// Disease name -> marker pattern mapping.
///
/// Iteration follows the order in which names were first added. Adding a
/// name that is already present replaces its pattern in place.
#[derive(Debug, Clone, Default)]
pub struct MarkerCatalog {
    markers: Vec<Marker>,

    /// Index: disease name -> index in markers vec
    name_to_index: HashMap<String, usize>,
}

impl MarkerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Self {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/disease_markers.txt");
        Self::from_text(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a file: JSON for `.json`, marker text otherwise
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Ok(Self::from_text(&content))
        }
    }

    /// Build a catalog from `<disease-name> <marker-pattern>` lines.
    ///
    /// Malformed lines are skipped; see [`parse_marker_text`].
    pub fn from_text(text: &str) -> Self {
        let mut catalog = Self::new();
        for line in parse_marker_text(text) {
            // Tokens from split_whitespace are never empty
            if let Err(e) = catalog.insert(line.name, line.pattern) {
                tracing::warn!("Skipping marker on line {}: {}", line.line_num, e);
            }
        }
        catalog
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for marker in data.markers {
            catalog.insert(marker.name, marker.pattern)?;
        }

        Ok(catalog)
    }

    /// Add a marker, replacing the pattern if the name is already present.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyPattern` if the pattern is empty.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<Sequence>,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(CatalogError::EmptyPattern(name));
        }

        if let Some(&index) = self.name_to_index.get(&name) {
            tracing::warn!("Duplicate marker '{}', replacing earlier pattern", name);
            self.markers[index].pattern = pattern;
        } else {
            self.name_to_index.insert(name.clone(), self.markers.len());
            self.markers.push(Marker { name, pattern });
        }

        Ok(())
    }

    /// Get a marker by disease name
    pub fn get(&self, name: &str) -> Option<&Marker> {
        self.name_to_index.get(name).map(|&idx| &self.markers[idx])
    }

    /// All markers in catalog order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            markers: self.markers.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Export catalog to the marker text format
    pub fn to_text(&self) -> String {
        self.markers
            .iter()
            .map(|m| format!("{} {}\n", m.name, m.pattern))
            .collect()
    }

    /// Number of markers in catalog
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl<'a> IntoIterator for &'a MarkerCatalog {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
