//! Catalog source boundary.
//!
//! The product collection is retrieved once at session start from an
//! abstract source; [`HttpCatalogSource`] fetches a JSON document over
//! HTTP. A load failure is recovered at the session boundary by
//! substituting the empty catalog (see `SessionContext::bootstrap`).

use thiserror::Error;
use tracing::debug;

use speedparts_core::ProductId;

use super::Product;

/// Errors fetching or parsing the catalog document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport failure reaching the catalog source.
    #[error("catalog fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("catalog source returned status {0}")]
    Status(u16),

    /// The document could not be parsed as a product collection.
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product record violates a catalog invariant.
    #[error("invalid product {id}: {reason}")]
    InvalidProduct {
        /// Offending record.
        id: ProductId,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Abstract fetch for the product collection.
pub trait CatalogSource {
    /// Retrieve the full, ordered product collection.
    async fn fetch(&self) -> Result<Vec<Product>, LoadError>;
}

/// Catalog source backed by an HTTP endpoint serving a JSON document.
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Create a source fetching from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        debug!(url = %self.url, "Fetching catalog");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        // Read the body as text first for better parse diagnostics
        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use speedparts_core::{Condition, Price};

    use super::super::CatalogIndex;
    use super::*;

    struct StaticSource(Vec<Product>);

    impl CatalogSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    impl CatalogSource for DownSource {
        async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
            Err(LoadError::Status(503))
        }
    }

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Oil Filter".to_string(),
            part_number: "OF-100".to_string(),
            price: Price::new(price),
            stock: 4,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2015".to_string(),
            category: "Engine".to_string(),
            condition: Condition::New,
            description: String::new(),
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_load_indexes_fetched_products() {
        let source = StaticSource(vec![product(1, Decimal::new(1500, 2))]);
        let index = CatalogIndex::load(&source).await.expect("load");
        assert_eq!(index.len(), 1);
        assert!(index.get(ProductId::new(1)).is_some());
    }

    #[tokio::test]
    async fn test_load_propagates_source_failure() {
        let result = CatalogIndex::load(&DownSource).await;
        assert!(matches!(result, Err(LoadError::Status(503))));
    }

    #[tokio::test]
    async fn test_load_rejects_negative_price() {
        let source = StaticSource(vec![product(1, Decimal::new(-100, 2))]);
        let result = CatalogIndex::load(&source).await;
        assert!(matches!(
            result,
            Err(LoadError::InvalidProduct { reason: "negative price", .. })
        ));
    }

    #[test]
    fn test_catalog_document_parses() {
        let body = r#"[
            {
                "id": 1,
                "name": "Brake Pad Set",
                "part_number": "BP-2201",
                "price": 50.00,
                "stock": 3,
                "make": "Toyota",
                "model": "Corolla",
                "year": "2015",
                "category": "Brakes",
                "condition": "new",
                "description": "Front axle set.",
                "images": ["assets/bp-2201.jpg"]
            }
        ]"#;
        let products: Vec<Product> = serde_json::from_str(body).expect("parse");
        assert_eq!(products.len(), 1);
        let first = products.first().expect("one product");
        assert_eq!(first.part_number, "BP-2201");
        assert_eq!(first.price, Price::new(Decimal::new(5000, 2)));
    }
}
