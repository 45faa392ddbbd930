//! Static local catalog.
//!
//! The catalog is a JSON document with `products`, `categories`, `colors`
//! and `sizes`. A copy is embedded at build time from `data/catalog.json`;
//! deployments may point `STOREFRONT_CATALOG_PATH` at a replacement file.
//! Either way it is loaded once at startup and is read-only afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use velour_core::{Category, Product, ProductId};

/// Catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors that can occur while loading the static catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
    #[error("Catalog product {0} must use a numeric local id")]
    NotLocal(ProductId),
}

/// The build-time product list plus category, color and size enumerations.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    sizes: Vec<String>,
}

impl StaticCatalog {
    /// Build a catalog from its parts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a product has an external id or two products
    /// share an id.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        colors: Vec<String>,
        sizes: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            products,
            categories,
            colors,
            sizes,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load the catalog file at `path`, or the built-in catalog if none is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the chosen catalog cannot be read or is
    /// invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(Self::builtin, Self::from_path)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.products.len());
        for product in &self.products {
            if product.id.is_external() {
                return Err(CatalogError::NotLocal(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Valid color tokens for the color filter.
    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Valid size tokens for the size filter.
    #[must_use]
    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    /// Find a local product by its numeric id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id == ProductId::Local(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = StaticCatalog::builtin().unwrap();
        assert!(!catalog.products().is_empty());
        assert!(catalog.products().iter().all(|p| !p.id.is_external()));
        assert!(catalog.categories().iter().any(|c| c.value == "women"));
        assert!(catalog.colors().iter().any(|c| c == "black"));
        assert!(catalog.sizes().iter().any(|s| s == "M"));
    }

    #[test]
    fn test_find_by_local_id() {
        let catalog = StaticCatalog::builtin().unwrap();
        let first = catalog.products().first().unwrap();
        let ProductId::Local(id) = first.id else {
            panic!("builtin catalog should only contain local ids");
        };

        assert_eq!(catalog.find(id), Some(first));
        assert_eq!(catalog.find(-1), None);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "products": [
                {"id": 1, "name": "A", "price": 10},
                {"id": 1, "name": "B", "price": 20}
            ],
            "categories": []
        }"#;
        let err = StaticCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ProductId::Local(1))));
    }

    #[test]
    fn test_rejects_external_ids() {
        let json = r#"{
            "products": [{"id": "external-4", "name": "A", "price": 10}],
            "categories": []
        }"#;
        let err = StaticCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::NotLocal(ProductId::External(4))));
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let catalog = StaticCatalog::load(None).unwrap();
        assert_eq!(catalog.products(), StaticCatalog::builtin().unwrap().products());

        let err = StaticCatalog::load(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = StaticCatalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
