use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::standard::{Standard, StandardError};
use crate::core::types::StandardId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Standard '{0}' not found in catalog")]
    NotFound(StandardId),

    #[error("Standard '{0}' already exists in catalog")]
    AlreadyExists(StandardId),

    #[error("Invalid standard: {0}")]
    InvalidStandard(#[from] StandardError),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    pub standards: Vec<Standard>,
}

/// Registry of known standards.
///
/// Populated once (embedded data, a JSON file, or explicit registration)
/// and then shared read-only, by reference or behind an `Arc`, with every
/// conformance check.
#[derive(Debug, Default)]
pub struct StandardCatalog {
    /// Standards in registration order
    standards: Vec<Standard>,

    /// Index: standard ID -> index in standards vec
    id_to_index: HashMap<StandardId, usize>,
}

impl StandardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog is malformed; `build.rs`
    /// validates it, so this only fails if validation and loading disagree.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/standards.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the file cannot be read, or any
    /// error from [`StandardCatalog::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` for malformed JSON,
    /// `CatalogError::InvalidStandard` for a standard that cannot be scored
    /// against, or `CatalogError::AlreadyExists` for a repeated ID.
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
        for standard in data.standards {
            catalog.register(standard)?;
        }

        tracing::debug!("Loaded catalog with {} standards", catalog.len());
        Ok(catalog)
    }

    /// Register a standard under its ID
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::AlreadyExists` if the ID is taken, or
    /// `CatalogError::InvalidStandard` if the standard has no signatures.
    pub fn register(&mut self, standard: Standard) -> Result<(), CatalogError> {
        if self.contains(&standard.id) {
            return Err(CatalogError::AlreadyExists(standard.id));
        }
        standard.validate()?;

        self.id_to_index
            .insert(standard.id.clone(), self.standards.len());
        self.standards.push(standard);
        Ok(())
    }

    /// Remove a standard, returning it if it was registered
    pub fn remove(&mut self, id: &StandardId) -> Option<Standard> {
        let index = self.id_to_index.remove(id)?;
        let removed = self.standards.remove(index);
        for slot in self.id_to_index.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Get a standard by ID
    pub fn get(&self, id: &StandardId) -> Option<&Standard> {
        self.id_to_index.get(id).map(|&idx| &self.standards[idx])
    }

    /// Get a standard by ID, reporting unknown IDs as an error
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no standard has this ID.
    pub fn lookup(&self, id: &StandardId) -> Result<&Standard, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &StandardId) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// All standards sorted by ID
    pub fn list(&self) -> Vec<&Standard> {
        let mut standards: Vec<&Standard> = self.standards.iter().collect();
        standards.sort_by(|a, b| a.id.cmp(&b.id));
        standards
    }

    /// Standards in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Standard> {
        self.standards.iter()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            standards: self.list().into_iter().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of standards in catalog
    pub fn len(&self) -> usize {
        self.standards.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }
}
