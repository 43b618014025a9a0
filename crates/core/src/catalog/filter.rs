//! Product filtering.
//!
//! Filtering is a closed dispatch over [`FilterId`]: every sidebar dimension
//! has an arm in [`retains`], including the dimensions that deliberately do
//! not narrow the result. Adding a dimension means adding an enum variant,
//! and the compiler then points at every place that must decide what the new
//! dimension does.

use std::collections::BTreeMap;

use crate::types::Product;

/// A sidebar filter dimension.
///
/// The wire token is what query strings carry (`ideal_for=men`); the display
/// name is what the sidebar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterId {
    /// Who the product is intended for. The only dimension with real
    /// matching logic against the upstream catalog.
    IdealFor,
    /// Whether the product can be customized. Matches on title/description.
    Customizable,
    Occasion,
    Work,
    Fabric,
    Segment,
    SuitableFor,
    RawMaterials,
    Pattern,
}

impl FilterId {
    /// Every dimension, in sidebar display order (customizable renders as a
    /// standalone checkbox above the categories).
    pub const ALL: [Self; 9] = [
        Self::Customizable,
        Self::IdealFor,
        Self::Occasion,
        Self::Work,
        Self::Fabric,
        Self::Segment,
        Self::SuitableFor,
        Self::RawMaterials,
        Self::Pattern,
    ];

    /// Stable token used in query strings and form field names.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::IdealFor => "ideal_for",
            Self::Customizable => "customizable",
            Self::Occasion => "occasion",
            Self::Work => "work",
            Self::Fabric => "fabric",
            Self::Segment => "segment",
            Self::SuitableFor => "suitable_for",
            Self::RawMaterials => "raw_materials",
            Self::Pattern => "pattern",
        }
    }

    /// Sidebar heading for the dimension.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::IdealFor => "IDEAL FOR",
            Self::Customizable => "CUSTOMIZABLE",
            Self::Occasion => "OCCASION",
            Self::Work => "WORK",
            Self::Fabric => "FABRIC",
            Self::Segment => "SEGMENT",
            Self::SuitableFor => "SUITABLE FOR",
            Self::RawMaterials => "RAW MATERIALS",
            Self::Pattern => "PATTERN",
        }
    }

    /// Parse a wire token. Unknown tokens yield `None`; query noise is
    /// ignored rather than rejected.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.token() == token)
    }
}

/// The set of currently selected filter values, keyed by dimension.
///
/// Invariant: no key maps to an empty list. Inserting an empty selection
/// removes the key, so "no selection" and "absent" are the same state and
/// `is_empty()` means "no filtering at all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilterSet {
    selections: BTreeMap<FilterId, Vec<String>>,
}

impl ActiveFilterSet {
    /// An empty set: filtering returns the catalog unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selections: BTreeMap::new(),
        }
    }

    /// Build from repeated `(token, value)` query pairs.
    ///
    /// Unknown tokens are skipped; duplicate values within a dimension are
    /// kept once, in first-seen order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = Self::new();
        for (token, value) in pairs {
            let Some(id) = FilterId::from_token(token) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let values = set.selections.entry(id).or_default();
            if !values.iter().any(|v| v == value) {
                values.push(value.to_owned());
            }
        }
        set
    }

    /// Replace the selection for a dimension. An empty selection removes
    /// the key (the no-empty-lists invariant).
    pub fn insert(&mut self, id: FilterId, values: Vec<String>) {
        if values.is_empty() {
            self.selections.remove(&id);
        } else {
            self.selections.insert(id, values);
        }
    }

    /// Selected values for a dimension, if any are selected.
    #[must_use]
    pub fn get(&self, id: FilterId) -> Option<&[String]> {
        self.selections.get(&id).map(Vec::as_slice)
    }

    /// Whether a specific value is selected within a dimension.
    #[must_use]
    pub fn contains(&self, id: FilterId, value: &str) -> bool {
        self.get(id).is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// True when no dimension has a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Number of dimensions with at least one selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Iterate `(dimension, selected values)` in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterId, &[String])> {
        self.selections
            .iter()
            .map(|(id, values)| (*id, values.as_slice()))
    }
}

/// Apply the active filters to a product list.
///
/// Dimensions combine by intersection: a product must pass every active
/// dimension. Within a dimension, selected values combine by union. An empty
/// set returns the input as a new vector.
#[must_use]
pub fn apply(products: &[Product], active: &ActiveFilterSet) -> Vec<Product> {
    if active.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|product| {
            active
                .iter()
                .all(|(id, values)| retains(id, values, product))
        })
        .cloned()
        .collect()
}

/// Per-dimension predicate: does `product` survive this dimension's
/// selection?
fn retains(id: FilterId, selected: &[String], product: &Product) -> bool {
    match id {
        FilterId::IdealFor => {
            let category = product.category.to_lowercase();
            selected.iter().any(|value| match value.as_str() {
                // "electronics" and "jewelery" are coupled to men/women in
                // the upstream catalog's category vocabulary. Kept verbatim;
                // the listing tests pin this behavior.
                "men" => category.contains("men") || category == "electronics",
                "women" => category.contains("women") || category == "jewelery",
                "kids" => category.contains("kid"),
                _ => false,
            })
        }
        FilterId::Customizable => {
            if selected.iter().any(|value| value == "yes") {
                let title = product.title.to_lowercase();
                let description = product.description.to_lowercase();
                title.contains("custom") || description.contains("custom")
            } else {
                true
            }
        }
        // Declared in the sidebar but inert: the upstream catalog carries no
        // data for these dimensions, so selecting them never narrows the
        // result. Inert on purpose, visible at the match site.
        FilterId::Occasion
        | FilterId::Work
        | FilterId::Fabric
        | FilterId::Segment
        | FilterId::SuitableFor
        | FilterId::RawMaterials
        | FilterId::Pattern => true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{ProductId, Rating};

    fn product(id: i64, title: &str, category: &str, description: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            price: Decimal::new(1000, 2),
            description: description.to_owned(),
            category: category.to_owned(),
            image: String::new(),
            rating: Some(Rating {
                rate: 4.0,
                count: 10,
            }),
            in_stock: None,
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            product(1, "Backpack", "men's clothing", "everyday pack"),
            product(2, "Bracelet", "jewelery", "gold plated"),
            product(3, "Monitor", "electronics", "ultrawide screen"),
            product(4, "Dress", "women's clothing", "custom tailored fit"),
            product(5, "Romper", "kids wear", "soft cotton"),
            product(6, "Custom Mug", "home", "printed to order"),
        ]
    }

    fn selection(id: FilterId, values: &[&str]) -> ActiveFilterSet {
        let mut set = ActiveFilterSet::new();
        set.insert(id, values.iter().map(|&v| v.to_owned()).collect());
        set
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_empty_set_returns_full_catalog() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &ActiveFilterSet::new());
        assert_eq!(result, catalog, "empty filter set must be a no-op copy");
    }

    #[test]
    fn test_empty_catalog_stays_empty() {
        let active = selection(FilterId::IdealFor, &["men"]);
        assert!(apply(&[], &active).is_empty());
    }

    #[test]
    fn test_ideal_for_men_includes_electronics() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::IdealFor, &["men"]));
        // "women's clothing" contains "men" as a substring, so the dress
        // passes too. The substring match is intentional.
        assert_eq!(ids(&result), vec![1, 3, 4]);
    }

    #[test]
    fn test_ideal_for_women_includes_jewelery() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::IdealFor, &["women"]));
        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn test_ideal_for_kids_matches_kid_substring() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::IdealFor, &["kids"]));
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn test_ideal_for_values_union() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::IdealFor, &["women", "kids"]));
        assert_eq!(ids(&result), vec![2, 4, 5]);
    }

    #[test]
    fn test_ideal_for_unknown_value_matches_nothing() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::IdealFor, &["pets"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_customizable_yes_scans_title_and_description() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::Customizable, &["yes"]));
        assert_eq!(ids(&result), vec![4, 6]);
    }

    #[test]
    fn test_customizable_other_value_is_inert() {
        let catalog = sample_catalog();
        let result = apply(&catalog, &selection(FilterId::Customizable, &["no"]));
        assert_eq!(ids(&result), ids(&catalog));
    }

    #[test]
    fn test_dimensions_intersect() {
        let catalog = sample_catalog();
        let mut active = selection(FilterId::IdealFor, &["women"]);
        active.insert(FilterId::Customizable, vec!["yes".to_owned()]);
        assert_eq!(ids(&apply(&catalog, &active)), vec![4]);
    }

    #[test]
    fn test_inert_dimensions_keep_everything() {
        let catalog = sample_catalog();
        for id in [
            FilterId::Occasion,
            FilterId::Work,
            FilterId::Fabric,
            FilterId::Segment,
            FilterId::SuitableFor,
            FilterId::RawMaterials,
            FilterId::Pattern,
        ] {
            let result = apply(&catalog, &selection(id, &["anything"]));
            assert_eq!(
                ids(&result),
                ids(&catalog),
                "{id:?} must not narrow the result"
            );
        }
    }

    #[test]
    fn test_insert_empty_selection_removes_key() {
        let mut active = selection(FilterId::IdealFor, &["men"]);
        active.insert(FilterId::IdealFor, Vec::new());
        assert!(active.is_empty(), "empty selections must be omitted");
    }

    #[test]
    fn test_from_pairs_groups_and_dedupes() {
        let active = ActiveFilterSet::from_pairs([
            ("ideal_for", "men"),
            ("ideal_for", "kids"),
            ("ideal_for", "men"),
            ("customizable", "yes"),
            ("sort", "newest"),
            ("bogus", "value"),
            ("fabric", ""),
        ]);

        assert_eq!(
            active.get(FilterId::IdealFor),
            Some(["men".to_owned(), "kids".to_owned()].as_slice())
        );
        assert!(active.contains(FilterId::Customizable, "yes"));
        assert_eq!(active.get(FilterId::Fabric), None, "empty values are skipped");
        assert_eq!(active.len(), 2, "unknown tokens must be ignored");
    }

    #[test]
    fn test_filter_id_token_roundtrip() {
        for id in FilterId::ALL {
            assert_eq!(FilterId::from_token(id.token()), Some(id));
        }
        assert_eq!(FilterId::from_token("idealFor"), None);
    }
}
