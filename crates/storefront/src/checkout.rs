//! Checkout validation and order assembly.
//!
//! An [`Order`] is derived and transient: it exists only for the duration
//! of the checkout operation and is never persisted. Assembly validates
//! the customer form, snapshots the cart against the catalog, and computes
//! the total.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use speedparts_core::{Price, ProductId};

use crate::cart::CartStore;
use crate::catalog::CatalogIndex;

/// Raw delivery selection as it arrives from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeliveryInput {
    /// The customer picks the order up.
    #[default]
    Pickup,
    /// Ship to the given address text; may still be blank and is validated
    /// at assembly.
    Shipping {
        /// Address as typed into the form.
        address: String,
    },
}

/// Validated delivery method. A shipping address is structurally present,
/// never an empty-string placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The customer picks the order up.
    Pickup,
    /// Ship to a non-empty address.
    Shipping {
        /// Validated, trimmed address.
        address: String,
    },
}

impl Delivery {
    /// Wire label for the structured payload.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Shipping { .. } => "shipping",
        }
    }

    /// Address for the structured payload; pickup carries the `N/A`
    /// sentinel.
    #[must_use]
    pub fn address_or_sentinel(&self) -> &str {
        match self {
            Self::Pickup => "N/A",
            Self::Shipping { address } => address,
        }
    }
}

/// Customer-supplied checkout form data, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: String,
    /// Delivery selection.
    pub delivery: DeliveryInput,
    /// Free-text notes; blank when the customer left none.
    pub notes: String,
}

/// Checkout form rejections, reported for the first failing field in form
/// order: name, phone, then the shipping address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Customer name is empty.
    #[error("customer name is required")]
    MissingName,
    /// Customer phone is empty.
    #[error("customer phone is required")]
    MissingPhone,
    /// Shipping was selected but the address is empty.
    #[error("shipping address is required")]
    MissingAddress,
}

impl ValidationError {
    /// Form field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingPhone => "phone",
            Self::MissingAddress => "address",
        }
    }
}

/// A cart entry snapshotted against the catalog at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Product id.
    pub id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Part number at order time.
    pub part_number: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price captured at order time.
    pub unit_price: Price,
}

impl OrderLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.line_total(self.quantity)
    }
}

/// A finalized order, assembled at checkout and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Customer name.
    pub customer_name: String,
    /// Customer phone.
    pub customer_phone: String,
    /// Validated delivery method.
    pub delivery: Delivery,
    /// Notes, when the customer left any.
    pub notes: Option<String>,
    /// Snapshot of the cart line items.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals at assembly time.
    pub total: Decimal,
}

impl Order {
    /// Validate `input` and snapshot the cart into a finalized order.
    ///
    /// Validation is fail-fast in form order: name, phone, then the
    /// shipping address when shipping was selected. Whitespace-only input
    /// counts as empty. The cart is not modified; clearing it after a
    /// successful dispatch is the caller's job.
    ///
    /// Cart entries that no longer resolve against the catalog are dropped
    /// from the snapshot. The catalog is immutable for the session, so a
    /// dangling entry indicates earlier state damage, not a normal path.
    ///
    /// # Errors
    ///
    /// The first failing field, as a [`ValidationError`]. No partial order
    /// is produced.
    pub fn assemble(
        cart: &CartStore,
        catalog: &CatalogIndex,
        input: CustomerInput,
    ) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let phone = input.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        let delivery = match input.delivery {
            DeliveryInput::Pickup => Delivery::Pickup,
            DeliveryInput::Shipping { address } => {
                let address = address.trim();
                if address.is_empty() {
                    return Err(ValidationError::MissingAddress);
                }
                Delivery::Shipping {
                    address: address.to_string(),
                }
            }
        };

        let lines: Vec<OrderLine> = cart
            .entries()
            .iter()
            .filter_map(|entry| {
                let Some(product) = catalog.get(entry.id) else {
                    debug!(id = %entry.id, "Dropping order line for unknown product");
                    return None;
                };
                Some(OrderLine {
                    id: entry.id,
                    name: product.name.clone(),
                    part_number: product.part_number.clone(),
                    quantity: entry.quantity,
                    unit_price: product.price,
                })
            })
            .collect();

        let total: Decimal = lines.iter().map(OrderLine::line_total).sum();

        // Both sums skip unresolvable entries, so they must agree.
        let cart_total = cart.totals(catalog).total;
        debug_assert_eq!(total, cart_total);
        if total != cart_total {
            warn!(%total, %cart_total, "Order total diverges from cart total");
        }

        let notes = input.notes.trim();
        Ok(Self {
            customer_name: name.to_string(),
            customer_phone: phone.to_string(),
            delivery,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use speedparts_core::Condition;

    use crate::cart::MemoryStorage;
    use crate::catalog::Product;

    use super::*;

    fn product(id: i64, name: &str, price: Decimal, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            part_number: format!("PN-{id:04}"),
            price: Price::new(price),
            stock,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2015".to_string(),
            category: "Brakes".to_string(),
            condition: Condition::New,
            description: String::new(),
            images: Vec::new(),
        }
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_products(vec![
            product(1, "Brake Pad Set", Decimal::new(5000, 2), 5),
            product(2, "Oil Filter", Decimal::new(2000, 2), 5),
        ])
    }

    fn filled_cart(catalog: &CatalogIndex) -> CartStore {
        let mut cart = CartStore::new(Box::new(MemoryStorage::default()));
        cart.set_quantity(catalog, ProductId::new(1), 2).expect("set");
        cart.set_quantity(catalog, ProductId::new(2), 1).expect("set");
        cart
    }

    fn valid_input() -> CustomerInput {
        CustomerInput {
            name: "Ama Mensah".to_string(),
            phone: "+233200000001".to_string(),
            delivery: DeliveryInput::Pickup,
            notes: String::new(),
        }
    }

    #[test]
    fn test_assemble_snapshots_cart() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        let order = Order::assemble(&cart, &catalog, valid_input()).expect("assemble");

        assert_eq!(order.lines.len(), 2);
        let first = order.lines.first().expect("first line");
        assert_eq!(first.name, "Brake Pad Set");
        assert_eq!(first.quantity, 2);
        assert_eq!(order.total, Decimal::new(12000, 2));
        assert_eq!(order.total, cart.totals(&catalog).total);
    }

    #[test]
    fn test_validation_fails_fast_in_form_order() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        // Everything wrong at once: the name failure wins
        let input = CustomerInput {
            name: "   ".to_string(),
            phone: String::new(),
            delivery: DeliveryInput::Shipping {
                address: String::new(),
            },
            notes: String::new(),
        };
        assert_eq!(
            Order::assemble(&cart, &catalog, input),
            Err(ValidationError::MissingName)
        );

        let input = CustomerInput {
            phone: String::new(),
            ..valid_input()
        };
        assert_eq!(
            Order::assemble(&cart, &catalog, input),
            Err(ValidationError::MissingPhone)
        );
    }

    #[test]
    fn test_shipping_requires_address() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        let input = CustomerInput {
            delivery: DeliveryInput::Shipping {
                address: "  ".to_string(),
            },
            ..valid_input()
        };
        let result = Order::assemble(&cart, &catalog, input);

        assert_eq!(result, Err(ValidationError::MissingAddress));
        let err = result.expect_err("validation error");
        assert_eq!(err.field(), "address");
        // The cart is untouched by a failed assembly
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_pickup_needs_no_address() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        let order = Order::assemble(&cart, &catalog, valid_input()).expect("assemble");
        assert_eq!(order.delivery, Delivery::Pickup);
        assert_eq!(order.delivery.address_or_sentinel(), "N/A");
    }

    #[test]
    fn test_shipping_address_is_trimmed() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        let input = CustomerInput {
            delivery: DeliveryInput::Shipping {
                address: "  12 Ring Road, Accra  ".to_string(),
            },
            ..valid_input()
        };
        let order = Order::assemble(&cart, &catalog, input).expect("assemble");

        assert_eq!(
            order.delivery,
            Delivery::Shipping {
                address: "12 Ring Road, Accra".to_string()
            }
        );
    }

    #[test]
    fn test_blank_notes_become_none() {
        let catalog = catalog();
        let cart = filled_cart(&catalog);

        let input = CustomerInput {
            notes: "  \t ".to_string(),
            ..valid_input()
        };
        let order = Order::assemble(&cart, &catalog, input).expect("assemble");
        assert_eq!(order.notes, None);
    }

    #[test]
    fn test_dangling_entry_is_dropped_from_snapshot() {
        // Build a cart against a wider catalog, then assemble against a
        // narrower one to simulate a dangling reservation.
        let wide = catalog();
        let narrow =
            CatalogIndex::from_products(vec![product(1, "Brake Pad Set", Decimal::new(5000, 2), 5)]);

        let cart = filled_cart(&wide);
        let order = Order::assemble(&cart, &narrow, valid_input()).expect("assemble");

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total, Decimal::new(10000, 2));
    }
}
