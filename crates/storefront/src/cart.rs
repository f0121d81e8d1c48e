//! In-memory shopping cart.
//!
//! The cart lives for one page load. Entries are kept in insertion order and
//! there is at most one entry per product; adding a product again bumps its
//! quantity. Entries are never removed individually, checkout clears the
//! whole store.

use std::sync::Arc;

use bazaar_core::{CurrencyCode, Price, ProductId};

use crate::catalog::Product;

/// A product and the quantity requested in the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    product: Arc<Product>,
    quantity: u32,
}

impl CartEntry {
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered cart entries for one page.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
    currency: CurrencyCode,
}

impl CartStore {
    /// Create an empty cart whose totals are expressed in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            entries: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `product`, returning the entry's new quantity.
    pub fn add(&mut self, product: Arc<Product>) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }

        self.entries.push(CartEntry {
            product,
            quantity: 1,
        });
        1
    }

    /// Sum of all entry quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.entries
            .iter()
            .map(CartEntry::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Sum of price times quantity across entries.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.entries
            .iter()
            .map(CartEntry::subtotal)
            .fold(Price::zero(self.currency), Price::saturating_add)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
