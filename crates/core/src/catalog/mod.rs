//! Catalog logic: filtering, sorting, and the sidebar panel model.
//!
//! Everything in this module is pure. The functions take product slices and
//! return new vectors; the only state is the [`FilterPanel`] builder the
//! sidebar renders from.

pub mod filter;
pub mod panel;
pub mod sort;

pub use filter::{ActiveFilterSet, FilterId};
pub use panel::{FilterCategory, FilterOption, FilterPanel};
pub use sort::SortKey;
