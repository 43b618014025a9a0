//! Listing page: the gated product grid with its filter sidebar and sort
//! dropdown.
//!
//! The page is a pure pipeline per request: parse the query, fetch the
//! catalog, filter, sort, render. All links on the page (sort options,
//! select-all/clear, the filter toggle) are plain hrefs back into this
//! handler with an adjusted query string; the sidebar checkboxes submit as
//! one GET form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::Uri};
use rust_decimal::Decimal;

use copper_fern_core::catalog::{filter, sort};
use copper_fern_core::{ActiveFilterSet, FilterPanel, Product, SortKey};

use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Message shown in place of the grid when the catalog cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

// =============================================================================
// Query Model
// =============================================================================

/// The listing page's full query-string state.
///
/// Repeated filter pairs (`ideal_for=men&ideal_for=kids`) cannot be
/// expressed with `serde` query structs, so the raw query is parsed with
/// `form_urlencoded`. Unknown keys and unknown tokens are ignored; query
/// noise never 400s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Requested ordering; unknown tokens fall back to recommended.
    pub sort: SortKey,
    /// Active filter selections.
    pub active: ActiveFilterSet,
    /// Whether the sidebar is open.
    pub show_filters: bool,
}

impl ListingQuery {
    /// Parse the raw query string.
    #[must_use]
    pub fn parse(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> =
            url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
                .into_owned()
                .collect();

        let sort = pairs
            .iter()
            .rev()
            .find(|(key, _)| key == "sort")
            .map_or_else(SortKey::default, |(_, value)| SortKey::from_token(value));
        let show_filters = pairs
            .iter()
            .any(|(key, value)| key == "filters" && value == "open");
        let active = ActiveFilterSet::from_pairs(
            pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())),
        );

        Self {
            sort,
            active,
            show_filters,
        }
    }

    /// Build the listing href for a query state.
    ///
    /// Defaults are omitted, so the unfiltered recommended listing is
    /// plain `/`.
    #[must_use]
    pub fn href(sort: SortKey, active: &ActiveFilterSet, show_filters: bool) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if sort != SortKey::Recommended {
            serializer.append_pair("sort", sort.token());
        }
        for (id, values) in active.iter() {
            for value in values {
                serializer.append_pair(id.token(), value);
            }
        }
        if show_filters {
            serializer.append_pair("filters", "open");
        }

        let query = serializer.finish();
        if query.is_empty() {
            "/".to_owned()
        } else {
            format!("/?{query}")
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Product display data for the grid.
pub struct ProductCardView {
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub image: String,
    pub out_of_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price,
            image: product.image.clone(),
            out_of_stock: product.is_out_of_stock(),
        }
    }
}

/// One entry in the sort dropdown.
pub struct SortOptionView {
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
    /// The recommended entry drops the active filters; the dropdown marks it.
    pub clears_filters: bool,
}

/// One collapsible sidebar group.
pub struct CategoryView {
    pub name: &'static str,
    pub token: &'static str,
    pub open: bool,
    pub summary: String,
    pub options: Vec<OptionView>,
    pub select_all_href: String,
    pub clear_href: String,
}

/// One checkbox within a group.
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub display_name: String,
    pub item_count: usize,
    pub products: Vec<ProductCardView>,
    pub sort_label: &'static str,
    pub sort_token: &'static str,
    pub sort_options: Vec<SortOptionView>,
    pub categories: Vec<CategoryView>,
    pub customizable_checked: bool,
    pub show_filters: bool,
    pub filter_toggle_href: String,
    pub filter_toggle_label: &'static str,
    pub has_active_filters: bool,
    pub load_error: Option<&'static str>,
}

// =============================================================================
// Handler
// =============================================================================

/// Display the product listing page.
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    uri: Uri,
) -> ListingTemplate {
    let query = ListingQuery::parse(uri.query());

    let (products, load_error) = match state.catalog().products().await {
        Ok(catalog) => {
            let filtered = filter::apply(&catalog, &query.active);
            (sort::apply(&filtered, query.sort), None)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load catalog");
            (Vec::new(), Some(LOAD_ERROR_MESSAGE))
        }
    };

    build_template(&query, &products, user.display_name().to_owned(), load_error)
}

/// Assemble the view model for a parsed query and filtered product list.
fn build_template(
    query: &ListingQuery,
    products: &[Product],
    display_name: String,
    load_error: Option<&'static str>,
) -> ListingTemplate {
    let panel = FilterPanel::from_selection(&query.active);

    let no_filters = ActiveFilterSet::new();
    let sort_options = SortKey::ALL
        .into_iter()
        .map(|key| {
            // Recommended clears the filters, so its link carries none.
            let clears_filters = key == SortKey::Recommended;
            let active = if clears_filters { &no_filters } else { &query.active };
            SortOptionView {
                label: key.label(),
                href: ListingQuery::href(key, active, query.show_filters),
                selected: key == query.sort,
                clears_filters,
            }
        })
        .collect();

    let categories = panel
        .categories()
        .iter()
        .map(|category| {
            let mut all_selected = query.active.clone();
            all_selected.insert(
                category.id,
                category.options.iter().map(|o| o.value.to_owned()).collect(),
            );
            let mut none_selected = query.active.clone();
            none_selected.insert(category.id, Vec::new());

            CategoryView {
                name: category.name(),
                token: category.id.token(),
                open: category.open,
                summary: category.selection_summary(),
                options: category
                    .options
                    .iter()
                    .map(|option| OptionView {
                        value: option.value,
                        label: option.label,
                        checked: option.checked,
                    })
                    .collect(),
                select_all_href: ListingQuery::href(query.sort, &all_selected, true),
                clear_href: ListingQuery::href(query.sort, &none_selected, true),
            }
        })
        .collect();

    ListingTemplate {
        display_name,
        item_count: products.len(),
        products: products.iter().map(ProductCardView::from).collect(),
        sort_label: query.sort.label(),
        sort_token: query.sort.token(),
        sort_options,
        categories,
        customizable_checked: panel.customizable(),
        show_filters: query.show_filters,
        filter_toggle_href: ListingQuery::href(query.sort, &query.active, !query.show_filters),
        filter_toggle_label: if query.show_filters {
            "HIDE FILTER"
        } else {
            "SHOW FILTER"
        },
        has_active_filters: !query.active.is_empty(),
        load_error,
    }
}
