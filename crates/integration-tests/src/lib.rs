//! Integration test fixtures for SpeedParts.
//!
//! The storefront engine is exercised fully in-process: the catalog source,
//! the durable cart slot, and both outbound dispatch channels are replaced
//! with the in-memory fakes defined here.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use speedparts_core::{Condition, Price, ProductId};
use speedparts_storefront::catalog::{CatalogSource, LoadError, Product};
use speedparts_storefront::config::StorefrontConfig;
use speedparts_storefront::dispatch::{LinkLauncher, OrderPayload, RemoteSubmitter, SubmitError};

/// Catalog source answering from a fixed product list.
pub struct StaticSource(pub Vec<Product>);

impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        Ok(self.0.clone())
    }
}

/// Catalog source that is always down.
pub struct DownSource;

impl CatalogSource for DownSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        Err(LoadError::Status(503))
    }
}

/// Link launcher recording every opened URL.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingLauncher {
    /// URLs opened so far, in order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("launcher log").clone()
    }
}

impl LinkLauncher for RecordingLauncher {
    fn launch(&self, url: &str) {
        self.urls.lock().expect("launcher log").push(url.to_string());
    }
}

/// Remote submitter with a scripted outcome and a call counter.
pub struct StubSubmitter {
    fail: bool,
    calls: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<serde_json::Value>>>,
}

impl StubSubmitter {
    /// Submitter that accepts every order.
    #[must_use]
    pub fn accepting() -> Self {
        Self::scripted(false)
    }

    /// Submitter that rejects every order with a 500.
    #[must_use]
    pub fn failing() -> Self {
        Self::scripted(true)
    }

    fn scripted(fail: bool) -> Self {
        Self {
            fail,
            calls: Arc::new(AtomicUsize::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of submissions attempted.
    #[must_use]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// JSON value of the most recent payload, when any was submitted.
    #[must_use]
    pub fn last_payload(&self) -> Arc<Mutex<Option<serde_json::Value>>> {
        Arc::clone(&self.last_payload)
    }
}

impl RemoteSubmitter for StubSubmitter {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let value = serde_json::to_value(payload).expect("payload serializes");
        *self.last_payload.lock().expect("payload slot") = Some(value);
        if self.fail {
            Err(SubmitError::Status { status: 500 })
        } else {
            Ok(())
        }
    }
}

/// A catalog product with the given id, price, and stock.
#[must_use]
pub fn product(id: i64, name: &str, price: Decimal, stock: u32) -> Product {
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
        images: vec![format!("assets/pn-{id:04}.jpg")],
    }
}

/// The standard two-product test catalog: `P1` (50.00, stock 3) and `P2`
/// (20.00, stock 10).
#[must_use]
pub fn standard_catalog() -> Vec<Product> {
    vec![
        product(1, "Brake Pad Set", Decimal::new(5000, 2), 3),
        product(2, "Oil Filter", Decimal::new(2000, 2), 10),
    ]
}

/// Storefront configuration for tests.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        seller_phone: "+233240000000".to_string(),
        currency: "GHS".to_string(),
        catalog_url: "https://parts.example/products.json".to_string(),
        order_endpoint: None,
        cart_path: "speedparts-cart.json".into(),
    }
}
