//! The read-only product catalog.
//!
//! A [`Catalog`] is built once at startup and never mutated afterwards. The
//! cart engine only uses it to validate ids and to snapshot name and price
//! when an entry is first created.

use std::collections::HashSet;

use serde::Deserialize;

use crate::types::{Product, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A product has an empty (or whitespace-only) name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// Ordering applied by [`Catalog::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the catalog was supplied in.
    #[default]
    Catalog,
    /// Alphabetical by name, case-insensitive.
    NameAsc,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// An ordered, immutable list of products with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating ids and names.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id or a product name is
    /// blank.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Whether the catalog lists `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name or description contains `query`, ignoring case.
    ///
    /// A blank query matches everything. Catalog order is preserved.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                needle.is_empty()
                    || product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// A sorted view of `products`. Ties keep their incoming order.
    #[must_use]
    pub fn sorted<'a>(mut products: Vec<&'a Product>, order: SortOrder) -> Vec<&'a Product> {
        match order {
            SortOrder::Catalog => {}
            SortOrder::NameAsc => products.sort_by_key(|p| p.name.to_lowercase()),
            SortOrder::PriceAsc => products.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// On-disk catalog shape: `products: [...]`.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<Product>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Self::new(file.products)
    }
}
