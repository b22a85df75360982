//! Available-to-sell arithmetic over catalog stock and cart reservations.

use speedparts_core::ProductId;

use crate::cart::CartStore;
use crate::catalog::CatalogIndex;

/// Available quantity at or above which a product counts as fully in stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Coarse availability classification driving purchase affordances and
/// low-stock warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockBand {
    /// Nothing left to sell.
    OutOfStock,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] units left; carries the remainder.
    Low(u32),
    /// At least [`LOW_STOCK_THRESHOLD`] units available.
    InStock,
}

/// Read-model over catalog stock minus cart reservations.
///
/// A ledger borrows the session's catalog and cart; build a fresh one
/// after any cart mutation (see `SessionContext::ledger`).
#[derive(Clone, Copy)]
pub struct StockLedger<'a> {
    catalog: &'a CatalogIndex,
    cart: &'a CartStore,
}

impl<'a> StockLedger<'a> {
    /// Build a ledger over `catalog` and `cart`.
    #[must_use]
    pub const fn new(catalog: &'a CatalogIndex, cart: &'a CartStore) -> Self {
        Self { catalog, cart }
    }

    /// Units still available to sell for `id`.
    ///
    /// Catalog stock minus the cart reservation, saturating at zero: a
    /// reservation above catalog stock is a prior invariant breach and is
    /// clamped on read rather than surfaced as a negative count. Unknown
    /// products have zero availability.
    #[must_use]
    pub fn available(&self, id: ProductId) -> u32 {
        let stock = self.catalog.get(id).map_or(0, |product| product.stock);
        stock.saturating_sub(self.cart.quantity_of(id))
    }

    /// Whether at least one more unit of `id` can be sold.
    #[must_use]
    pub fn is_purchasable(&self, id: ProductId) -> bool {
        self.available(id) > 0
    }

    /// Availability band for `id`.
    #[must_use]
    pub fn stock_band(&self, id: ProductId) -> StockBand {
        match self.available(id) {
            0 => StockBand::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => StockBand::Low(n),
            _ => StockBand::InStock,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use speedparts_core::{Condition, Price};

    use crate::cart::MemoryStorage;
    use crate::catalog::Product;

    use super::*;

    fn product(id: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Part {id}"),
            part_number: format!("PN-{id:04}"),
            price: Price::new(Decimal::new(1000, 2)),
            stock,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: "2018".to_string(),
            category: "Suspension".to_string(),
            condition: Condition::Used,
            description: String::new(),
            images: Vec::new(),
        }
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_products(vec![product(1, 8), product(2, 3), product(3, 0)])
    }

    #[test]
    fn test_available_subtracts_reservation() {
        let catalog = catalog();
        let mut cart = CartStore::new(Box::new(MemoryStorage::default()));
        cart.set_quantity(&catalog, ProductId::new(1), 5).expect("set");

        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.available(ProductId::new(1)), 3);
        assert_eq!(ledger.available(ProductId::new(2)), 3);
    }

    #[test]
    fn test_available_is_zero_for_unknown_product() {
        let catalog = catalog();
        let cart = CartStore::new(Box::new(MemoryStorage::default()));

        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.available(ProductId::new(99)), 0);
        assert!(!ledger.is_purchasable(ProductId::new(99)));
    }

    #[test]
    fn test_fully_reserved_product_is_not_purchasable() {
        let catalog = catalog();
        let mut cart = CartStore::new(Box::new(MemoryStorage::default()));
        cart.set_quantity(&catalog, ProductId::new(2), 3).expect("set");

        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.available(ProductId::new(2)), 0);
        assert!(!ledger.is_purchasable(ProductId::new(2)));
    }

    #[test]
    fn test_stock_bands() {
        let catalog = catalog();
        let mut cart = CartStore::new(Box::new(MemoryStorage::default()));

        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.stock_band(ProductId::new(1)), StockBand::InStock);
        assert_eq!(ledger.stock_band(ProductId::new(2)), StockBand::Low(3));
        assert_eq!(ledger.stock_band(ProductId::new(3)), StockBand::OutOfStock);

        // Reserving units moves a product down the bands
        cart.set_quantity(&catalog, ProductId::new(1), 4).expect("set");
        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.stock_band(ProductId::new(1)), StockBand::Low(4));
    }

    #[test]
    fn test_threshold_boundary_is_in_stock() {
        let catalog = CatalogIndex::from_products(vec![product(1, LOW_STOCK_THRESHOLD)]);
        let cart = CartStore::new(Box::new(MemoryStorage::default()));

        let ledger = StockLedger::new(&catalog, &cart);
        assert_eq!(ledger.stock_band(ProductId::new(1)), StockBand::InStock);
    }
}
