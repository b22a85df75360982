//! Session-scoped ownership of the catalog and cart.
//!
//! One [`SessionContext`] per session owns the [`CatalogIndex`] and the
//! [`CartStore`]; every handler borrows from it. There is no ambient or
//! static state.

use tracing::warn;

use speedparts_core::ProductId;

use crate::cart::{CartError, CartStorage, CartStore, CartTotals, QuantityChange};
use crate::catalog::{CatalogIndex, CatalogSource, LoadError};
use crate::checkout::{CustomerInput, Order, ValidationError};
use crate::config::StorefrontConfig;
use crate::dispatch::links;
use crate::stock::StockLedger;

/// Pre-filled text for the standing contact link.
const CONTACT_TEXT: &str = "Hello! I have a question.";

/// Session-scoped owner of the catalog index and the cart.
pub struct SessionContext {
    config: StorefrontConfig,
    catalog: CatalogIndex,
    cart: CartStore,
}

impl SessionContext {
    /// Load the catalog, seed the cart from the durable slot, and build
    /// the session context.
    ///
    /// A catalog load failure never escapes this boundary: the session
    /// starts with an empty catalog and the [`LoadError`] is handed back
    /// alongside for the caller to surface as a warning. Restored cart
    /// entries are reconciled against the loaded catalog - unknown
    /// products dropped, quantities clamped to current stock.
    pub async fn bootstrap<S: CatalogSource>(
        config: StorefrontConfig,
        source: &S,
        storage: Box<dyn CartStorage>,
    ) -> (Self, Option<LoadError>) {
        let (catalog, load_error) = match CatalogIndex::load(source).await {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                warn!(error = %e, "Catalog load failed, starting with empty catalog");
                (CatalogIndex::empty(), Some(e))
            }
        };
        let cart = CartStore::restore(storage, &catalog);
        (
            Self {
                config,
                catalog,
                cart,
            },
            load_error,
        )
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the session catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Stock ledger over the current catalog and cart. Build a fresh one
    /// after any cart mutation.
    #[must_use]
    pub const fn ledger(&self) -> StockLedger<'_> {
        StockLedger::new(&self.catalog, &self.cart)
    }

    /// Add one unit to the cart (see [`CartStore::add`]).
    ///
    /// # Errors
    ///
    /// See [`CartStore::add`].
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), CartError> {
        self.cart.add(&self.catalog, id)
    }

    /// Set a cart quantity (see [`CartStore::set_quantity`]).
    ///
    /// # Errors
    ///
    /// See [`CartStore::set_quantity`].
    pub fn set_cart_quantity(
        &mut self,
        id: ProductId,
        requested: u32,
    ) -> Result<QuantityChange, CartError> {
        self.cart.set_quantity(&self.catalog, id, requested)
    }

    /// Remove a product from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove(id);
    }

    /// Empty the cart. Called after checkout dispatch returns, whatever
    /// the dispatch report was.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Cart totals against the session catalog.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals(&self.catalog)
    }

    /// Assemble a finalized order from the session's cart and catalog.
    ///
    /// # Errors
    ///
    /// See [`Order::assemble`].
    pub fn checkout(&self, input: CustomerInput) -> Result<Order, ValidationError> {
        Order::assemble(&self.cart, &self.catalog, input)
    }

    /// Standing messaging link for general questions to the seller.
    #[must_use]
    pub fn contact_link(&self) -> String {
        links::messaging_link(&self.config.seller_phone, CONTACT_TEXT)
    }
}
