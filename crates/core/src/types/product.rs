//! Catalog product record.
//!
//! Field names mirror the upstream catalog JSON so the record deserializes
//! straight off the wire. Products are immutable once fetched; the listing
//! page consumes them by value for the duration of a request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Customer rating attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating on the upstream scale (0.0 to 5.0).
    pub rate: f64,
    /// Number of ratings behind the average.
    pub count: u32,
}

/// A single catalog product.
///
/// `category` is free text from the upstream catalog; the filter logic
/// matches against it case-insensitively rather than parsing it into an
/// enum, because the upstream value set is not closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Free-text category label, e.g. `men's clothing`.
    pub category: String,
    /// Product image URL.
    pub image: String,
    /// Customer rating, when the upstream provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Stock availability. Absent upstream means "assume in stock".
    #[serde(
        default,
        rename = "inStock",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_stock: Option<bool>,
}

impl Product {
    /// Rating rate used for popularity ordering, with missing ratings
    /// treated as 0.
    #[must_use]
    pub fn rating_rate(&self) -> f64 {
        self.rating.as_ref().map_or(0.0, |r| r.rate)
    }

    /// Whether the product should render as out of stock.
    ///
    /// Only an explicit `inStock: false` counts; absence means available.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        matches!(self.in_stock, Some(false))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_upstream_shape() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
        let rating = product.rating.unwrap();
        assert!((rating.rate - 3.9).abs() < f64::EPSILON);
        assert_eq!(rating.count, 120);
        assert_eq!(product.in_stock, None);
    }

    #[test]
    fn test_deserialize_without_rating() {
        let json = r#"{
            "id": 7,
            "title": "Plain Mug",
            "price": 4.5,
            "description": "A mug.",
            "category": "home",
            "image": "https://example.com/mug.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, None);
        assert!(
            (product.rating_rate() - 0.0).abs() < f64::EPSILON,
            "missing rating must count as zero for popularity ordering"
        );
    }

    #[test]
    fn test_out_of_stock_requires_explicit_false() {
        let json = r#"{
            "id": 2,
            "title": "Sold Out Jacket",
            "price": 56.99,
            "description": "Gone.",
            "category": "women's clothing",
            "image": "https://example.com/jacket.jpg",
            "inStock": false
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_out_of_stock());

        let available = Product {
            in_stock: None,
            ..product
        };
        assert!(!available.is_out_of_stock());
    }
}
