//! Product catalog.
//!
//! The catalog is fixed for the lifetime of the process. It is built once at
//! startup (either the built-in product list or a JSON file) and shared
//! read-only between pages.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use bazaar_core::{Category, CurrencyCode, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product offered for sale or rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    /// Path of the product image asset.
    pub image: String,
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {id} is priced in {found:?}, catalog uses {expected:?}")]
    MixedCurrency {
        id: ProductId,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only product list with lookup by id and category.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Build a catalog, keeping products in the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id and
    /// `CatalogError::MixedCurrency` if prices use more than one currency.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let currency = products
            .first()
            .map_or_else(CurrencyCode::default, |p| p.price.currency_code);

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.currency_code != currency {
                return Err(CatalogError::MixedCurrency {
                    id: product.id,
                    expected: currency,
                    found: product.price.currency_code,
                });
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            currency,
        })
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails the checks in [`Catalog::new`].
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in the given category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Currency every price in the catalog is expressed in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The built-in storefront catalog.
    fn default() -> Self {
        Self {
            products: builtin_products().into_iter().map(Arc::new).collect(),
            currency: CurrencyCode::BDT,
        }
    }
}

fn builtin_products() -> Vec<Product> {
    let product = |id: i32, name: &str, price: i64, category: Category, image: &str| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price, CurrencyCode::BDT),
        category,
        image: format!("/static/images/{image}"),
    };

    vec![
        product(1, "Red Floral Saree", 2500, Category::Womens, "image_1759e4.jpg"),
        product(2, "Maroon Party Dress", 3800, Category::Womens, "image_1759ca.jpg"),
        product(3, "Casual Jeans", 1500, Category::Mens, "image_1759e9.jpg"),
        product(4, "Maroon Formal Shirt", 1800, Category::Mens, "image_175a04.jpg"),
        product(5, "Black Formal Shirt", 1600, Category::Mens, "image_175a0a.jpg"),
        product(6, "Silver Wrist Watch", 950, Category::Womens, "image_175a25.jpg"),
    ]
}
