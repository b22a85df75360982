//! Immutable, session-scoped product catalog.
//!
//! The catalog is loaded once at session start and read-only thereafter.
//! This module holds the [`Product`] record, the derived filter [`Facets`],
//! and the [`CatalogIndex`] that answers [`FilterQuery`] lookups.

mod source;

pub use source::{CatalogSource, HttpCatalogSource, LoadError};

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use speedparts_core::{Condition, Price, ProductId};

/// Sentinel make for parts that fit any vehicle.
const ANY_MAKE: &str = "Universal";
/// Sentinel model for parts that fit several models.
const ANY_MODEL: &str = "Various";
/// Sentinel year for parts without a model year.
const ANY_YEAR: &str = "N/A";

/// A purchasable part in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Manufacturer part number.
    pub part_number: String,
    /// Unit price (currency-less magnitude).
    pub price: Price,
    /// Units in catalog stock.
    pub stock: u32,
    /// Vehicle make; "Universal" when not make-specific.
    pub make: String,
    /// Vehicle model; "Various" when not model-specific.
    pub model: String,
    /// Model year; "N/A" when not year-specific.
    pub year: String,
    /// Part category.
    pub category: String,
    /// Physical condition.
    pub condition: Condition,
    /// Long-form description.
    pub description: String,
    /// Image references, display order preserved.
    pub images: Vec<String>,
}

/// A catalog filter: free text plus exact-match selectors.
///
/// Selectors are conjunctive. The free-text term matches disjunctively
/// across name, part number, make, model, and category with a
/// case-insensitive substring test. Empty fields are wildcards.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    /// Free-text search term.
    pub search: String,
    /// Exact make selector.
    pub make: Option<String>,
    /// Exact model selector.
    pub model: Option<String>,
    /// Exact year selector.
    pub year: Option<String>,
    /// Exact category selector.
    pub category: Option<String>,
    /// Exact condition selector.
    pub condition: Option<Condition>,
}

/// Distinct filterable values per catalog dimension.
///
/// Values are sorted. The "fits anything" sentinels (`Universal`,
/// `Various`, `N/A`) are excluded so they never appear as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub years: Vec<String>,
    pub categories: Vec<String>,
}

/// Immutable index over the session's product catalog.
///
/// Queries are pure and deterministic: identical inputs yield identical
/// results, and catalog order is always preserved.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl CatalogIndex {
    /// The empty catalog, used as the recovery value when loading fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch the product collection from `source` and index it.
    ///
    /// # Errors
    ///
    /// Any transport or parse failure from the source, or a product
    /// record carrying a negative price.
    pub async fn load<S: CatalogSource>(source: &S) -> Result<Self, LoadError> {
        let products = source.fetch().await?;
        for product in &products {
            if product.price.is_negative() {
                return Err(LoadError::InvalidProduct {
                    id: product.id,
                    reason: "negative price",
                });
            }
        }
        Ok(Self::from_products(products))
    }

    /// Index an already-fetched product collection.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id, index))
            .collect();
        Self { products, by_id }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.by_id.get(&id).and_then(|&index| self.products.get(index))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Derive the distinct, sorted filter values per dimension.
    #[must_use]
    pub fn facets(&self) -> Facets {
        let mut makes = BTreeSet::new();
        let mut models = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for product in &self.products {
            if product.make != ANY_MAKE {
                makes.insert(product.make.clone());
            }
            if product.model != ANY_MODEL {
                models.insert(product.model.clone());
            }
            if product.year != ANY_YEAR {
                years.insert(product.year.clone());
            }
            categories.insert(product.category.clone());
        }

        Facets {
            makes: makes.into_iter().collect(),
            models: models.into_iter().collect(),
            years: years.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    /// Products satisfying `filter`, in catalog order.
    #[must_use]
    pub fn query(&self, filter: &FilterQuery) -> Vec<&Product> {
        let term = filter.search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| Self::matches(product, filter, &term))
            .collect()
    }

    fn matches(product: &Product, filter: &FilterQuery, term: &str) -> bool {
        let matches_search = term.is_empty()
            || product.name.to_lowercase().contains(term)
            || product.part_number.to_lowercase().contains(term)
            || product.make.to_lowercase().contains(term)
            || product.model.to_lowercase().contains(term)
            || product.category.to_lowercase().contains(term);

        matches_search
            && filter.make.as_ref().is_none_or(|make| *make == product.make)
            && filter.model.as_ref().is_none_or(|model| *model == product.model)
            && filter.year.as_ref().is_none_or(|year| *year == product.year)
            && filter
                .category
                .as_ref()
                .is_none_or(|category| *category == product.category)
            && filter
                .condition
                .is_none_or(|condition| condition == product.condition)
    }
}
