//! Stock-aware cart state machine.
//!
//! The cart is an insertion-ordered set of product reservations, persisted
//! to a durable slot after every mutation. Two invariants hold at all
//! times: an entry's quantity never exceeds the product's catalog stock,
//! and no entry is ever kept at quantity zero.

mod storage;

pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use speedparts_core::ProductId;

use crate::catalog::CatalogIndex;

/// A single product reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Reserved product.
    pub id: ProductId,
    /// Units reserved; always at least 1.
    pub quantity: u32,
}

/// Rejected cart mutations. The cart is left untouched on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product has no catalog stock at all.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Incrementing would push the reservation past catalog stock.
    #[error("no more stock available for product {0}")]
    StockExceeded(ProductId),

    /// The catalog has no product with this id.
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
}

/// What `set_quantity` actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry now holds the requested quantity.
    Set(u32),
    /// The request exceeded catalog stock and was reduced. Non-fatal,
    /// surfaced to the user as feedback.
    Clamped {
        /// What the caller asked for.
        requested: u32,
        /// What the entry was set to.
        set: u32,
    },
    /// The quantity reached zero and the entry was removed.
    Removed,
}

/// Cart totals at full decimal precision.
///
/// Rounding to two decimal places happens only at presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over all entries.
    pub subtotal: Decimal,
    /// Equal to the subtotal; no tax or shipping surcharge is modeled.
    pub total: Decimal,
}

/// Mutable set of product reservations, persisted after every mutation.
///
/// Entries keep insertion order for display stability. Mutations are
/// synchronous and atomic within a handler invocation; the durable write
/// completes before the mutation returns.
pub struct CartStore {
    entries: Vec<CartEntry>,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// An empty cart over `storage`. The slot is not written until the
    /// first mutation.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        Self {
            entries: Vec::new(),
            storage,
        }
    }

    /// Restore the cart from the durable slot, reconciled against the
    /// session catalog.
    ///
    /// Entries for products the catalog no longer knows are dropped, and
    /// quantities above current stock are clamped down; a restored
    /// reservation the catalog cannot honor is a prior-session artifact,
    /// not a valid state. When reconciliation changed anything the slot is
    /// rewritten immediately.
    #[must_use]
    pub fn restore(storage: Box<dyn CartStorage>, catalog: &CatalogIndex) -> Self {
        let persisted = storage.load();
        let mut entries: Vec<CartEntry> = Vec::with_capacity(persisted.len());
        let mut changed = false;

        for entry in persisted {
            let Some(product) = catalog.get(entry.id) else {
                debug!(id = %entry.id, "Dropping persisted entry for unknown product");
                changed = true;
                continue;
            };
            if entries.iter().any(|existing| existing.id == entry.id) {
                warn!(id = %entry.id, "Dropping duplicate persisted cart entry");
                changed = true;
                continue;
            }
            let quantity = entry.quantity.min(product.stock);
            if quantity == 0 {
                debug!(id = %entry.id, "Dropping persisted entry with no sellable stock");
                changed = true;
                continue;
            }
            if quantity != entry.quantity {
                debug!(
                    id = %entry.id,
                    persisted = entry.quantity,
                    clamped = quantity,
                    "Clamping persisted quantity to catalog stock"
                );
                changed = true;
            }
            entries.push(CartEntry {
                id: entry.id,
                quantity,
            });
        }

        let mut cart = Self { entries, storage };
        if changed {
            cart.persist();
        }
        cart
    }

    /// Add one unit of `id` to the cart.
    ///
    /// Inserts a quantity-1 entry, or increments an existing entry by one.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] when the product has zero catalog stock,
    /// [`CartError::StockExceeded`] when the increment would pass catalog
    /// stock, [`CartError::UnknownProduct`] when the catalog has no such
    /// id. The cart is unchanged on error.
    pub fn add(&mut self, catalog: &CatalogIndex, id: ProductId) -> Result<(), CartError> {
        let product = catalog.get(id).ok_or(CartError::UnknownProduct(id))?;

        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                if entry.quantity >= product.stock {
                    return Err(CartError::StockExceeded(id));
                }
                entry.quantity += 1;
            }
            None => {
                if product.stock == 0 {
                    return Err(CartError::OutOfStock(id));
                }
                self.entries.push(CartEntry { id, quantity: 1 });
            }
        }

        self.persist();
        Ok(())
    }

    /// Set the reservation for `id` to `requested`, clamped to
    /// `[0, catalog stock]`.
    ///
    /// A clamped-to-zero quantity removes the entry. The returned
    /// [`QuantityChange`] tells the caller whether a clamp happened so it
    /// can be surfaced as non-fatal feedback.
    ///
    /// # Errors
    ///
    /// [`CartError::UnknownProduct`] when the catalog has no such id.
    pub fn set_quantity(
        &mut self,
        catalog: &CatalogIndex,
        id: ProductId,
        requested: u32,
    ) -> Result<QuantityChange, CartError> {
        let product = catalog.get(id).ok_or(CartError::UnknownProduct(id))?;
        let clamped = requested.min(product.stock);

        let change = if clamped == 0 {
            self.entries.retain(|entry| entry.id != id);
            QuantityChange::Removed
        } else {
            match self.entries.iter_mut().find(|entry| entry.id == id) {
                Some(entry) => entry.quantity = clamped,
                None => self.entries.push(CartEntry {
                    id,
                    quantity: clamped,
                }),
            }
            if clamped < requested {
                QuantityChange::Clamped {
                    requested,
                    set: clamped,
                }
            } else {
                QuantityChange::Set(clamped)
            }
        };

        self.persist();
        Ok(change)
    }

    /// Remove the entry for `id`. No-op (and no write) when absent.
    pub fn remove(&mut self, id: ProductId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Subtotal and total over the current entries.
    ///
    /// Entries whose product does not resolve against `catalog` contribute
    /// nothing; the catalog is immutable for the session, so this is
    /// defense in depth rather than an expected path.
    #[must_use]
    pub fn totals(&self, catalog: &CatalogIndex) -> CartTotals {
        let subtotal: Decimal = self
            .entries
            .iter()
            .filter_map(|entry| {
                catalog
                    .get(entry.id)
                    .map(|product| product.price.line_total(entry.quantity))
            })
            .sum();
        CartTotals {
            subtotal,
            total: subtotal,
        }
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Reserved quantity for `id`; zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map_or(0, |entry| entry.quantity)
    }

    /// Total units across all entries (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Write the current entries to the durable slot.
    ///
    /// A failed write is logged and does not poison the in-memory cart;
    /// the session keeps operating on the authoritative in-memory state.
    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.entries) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
