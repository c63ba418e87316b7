use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::product::{Product, ProductId, ProductKind};
use crate::errors::{ApplicationError, DomainError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid catalog entry: {0}")]
    InvalidEntry(#[from] DomainError),
}

impl From<CatalogError> for ApplicationError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value.to_string())
    }
}

/// Products known to the shop, in display order.
///
/// Identifiers are not checked for uniqueness on insert; lookups return the
/// first match.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            sample_product(1, "Laptop", 40_000, 5, electronic("2 Years")),
            sample_product(2, "T-Shirt", 1_200, 20, ProductKind::Clothing { size: "Medium".into() }),
            sample_product(3, "Smartphone", 25_000, 10, electronic("1 Year")),
        ])
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let catalog = Self::from_toml_str(&raw)?;
        debug!(
            event_name = "shop.catalog.loaded",
            path = %path.display(),
            product_count = catalog.len(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let document = toml::from_str::<CatalogDocument>(raw)?;
        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(document.products.len());

        for entry in document.products {
            if !seen.insert(entry.id) {
                warn!(
                    event_name = "shop.catalog.duplicate_id",
                    product_id = entry.id.0,
                    "duplicate product id in catalog; lookups resolve to the first entry"
                );
            }
            products.push(Product::new(entry.id, entry.name, entry.price, entry.stock, entry.kind)?);
        }

        Ok(Self::new(products))
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == product_id)
    }

    pub fn find_mut(&mut self, product_id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id() == product_id)
    }

    pub fn get(&self, product_id: ProductId) -> Result<&Product, DomainError> {
        self.find(product_id).ok_or(DomainError::NotFound(product_id))
    }
}

fn electronic(warranty_period: &str) -> ProductKind {
    ProductKind::Electronic { warranty_period: warranty_period.to_string() }
}

fn sample_product(id: u32, name: &str, price: u32, stock: u32, kind: ProductKind) -> Product {
    Product::with_whole_price(ProductId(id), name, price, stock, kind)
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: ProductId,
    name: String,
    price: Decimal,
    stock: u32,
    #[serde(flatten)]
    kind: ProductKind,
}
