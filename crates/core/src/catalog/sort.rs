//! Product ordering.
//!
//! Sorting never mutates its input: [`apply`] clones the slice into a new
//! vector and orders that. All orderings are stable, so products with equal
//! keys keep their original relative order.

use crate::types::Product;

/// A catalog ordering, parsed from the `sort` query token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Upstream order, unchanged. Also the fallback for unknown tokens.
    #[default]
    Recommended,
    /// Highest product id first.
    Newest,
    /// Highest rating first; products without a rating sort as 0.
    Popular,
    /// Most expensive first.
    PriceHigh,
    /// Cheapest first.
    PriceLow,
}

impl SortKey {
    /// Every ordering, in dropdown display order.
    pub const ALL: [Self; 5] = [
        Self::Recommended,
        Self::Newest,
        Self::Popular,
        Self::PriceHigh,
        Self::PriceLow,
    ];

    /// Stable token used in query strings.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::PriceHigh => "price-high",
            Self::PriceLow => "price-low",
        }
    }

    /// Dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "Recommended",
            Self::Newest => "Newest first",
            Self::Popular => "Popular",
            Self::PriceHigh => "Price: highest to lowest",
            Self::PriceLow => "Price: lowest to highest",
        }
    }

    /// Parse a wire token. Total: unknown tokens fall back to
    /// [`SortKey::Recommended`], so query noise never 400s.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.token() == token)
            .unwrap_or_default()
    }
}

/// Return a newly ordered copy of `products`.
///
/// The input is never reordered. Ties preserve original relative order.
#[must_use]
pub fn apply(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut ordered = products.to_vec();
    match key {
        SortKey::Newest => ordered.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::Popular => {
            ordered.sort_by(|a, b| b.rating_rate().total_cmp(&a.rating_rate()));
        }
        SortKey::PriceHigh => ordered.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::PriceLow => ordered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::Recommended => {}
    }
    ordered
}
