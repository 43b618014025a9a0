//! Sidebar panel model.
//!
//! The panel is the view-side state behind the filter sidebar: which
//! categories are open, which options are checked, and the standalone
//! CUSTOMIZABLE checkbox. Its sole output contract is
//! [`FilterPanel::active_filters`], which derives the [`ActiveFilterSet`]
//! the catalog filter consumes.

use crate::catalog::filter::{ActiveFilterSet, FilterId};

/// A single checkbox within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Stable value carried in query strings.
    pub value: &'static str,
    /// Label rendered next to the checkbox.
    pub label: &'static str,
    /// Whether the checkbox is checked.
    pub checked: bool,
}

impl FilterOption {
    const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            checked: false,
        }
    }
}

/// A collapsible option group in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCategory {
    /// Which dimension this group selects for.
    pub id: FilterId,
    /// The group's checkboxes, in display order.
    pub options: Vec<FilterOption>,
    /// Whether the group is expanded.
    pub open: bool,
}

impl FilterCategory {
    fn new(id: FilterId, options: Vec<FilterOption>) -> Self {
        Self {
            id,
            options,
            open: false,
        }
    }

    /// Sidebar heading.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Values of the checked options, in display order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.value.to_owned())
            .collect()
    }

    /// Summary line under the heading: "All" when nothing or everything is
    /// selected, otherwise the selected labels joined with commas.
    #[must_use]
    pub fn selection_summary(&self) -> String {
        let selected: Vec<&str> = self
            .options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.label)
            .collect();

        if selected.is_empty() || selected.len() == self.options.len() {
            "All".to_owned()
        } else {
            selected.join(", ")
        }
    }
}

/// The whole sidebar: the CUSTOMIZABLE checkbox plus the option groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    customizable: bool,
    categories: Vec<FilterCategory>,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPanel {
    /// The default catalog sidebar: nothing checked, every group closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            customizable: false,
            categories: vec![
                FilterCategory::new(
                    FilterId::IdealFor,
                    vec![
                        FilterOption::new("men", "Men"),
                        FilterOption::new("women", "Women"),
                        FilterOption::new("kids", "Baby & Kids"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::Occasion,
                    vec![
                        FilterOption::new("casual", "Casual"),
                        FilterOption::new("formal", "Formal"),
                        FilterOption::new("party", "Party"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::Work,
                    vec![
                        FilterOption::new("office", "Office"),
                        FilterOption::new("field", "Field Work"),
                        FilterOption::new("home", "Work from Home"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::Fabric,
                    vec![
                        FilterOption::new("cotton", "Cotton"),
                        FilterOption::new("polyester", "Polyester"),
                        FilterOption::new("silk", "Silk"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::Segment,
                    vec![
                        FilterOption::new("premium", "Premium"),
                        FilterOption::new("value", "Value"),
                        FilterOption::new("budget", "Budget"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::SuitableFor,
                    vec![
                        FilterOption::new("winter", "Winter"),
                        FilterOption::new("summer", "Summer"),
                        FilterOption::new("allseason", "All Season"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::RawMaterials,
                    vec![
                        FilterOption::new("organic", "Organic"),
                        FilterOption::new("synthetic", "Synthetic"),
                        FilterOption::new("mixed", "Mixed"),
                    ],
                ),
                FilterCategory::new(
                    FilterId::Pattern,
                    vec![
                        FilterOption::new("solid", "Solid"),
                        FilterOption::new("printed", "Printed"),
                        FilterOption::new("striped", "Striped"),
                    ],
                ),
            ],
        }
    }

    /// A panel rehydrated from a previously derived selection.
    #[must_use]
    pub fn from_selection(active: &ActiveFilterSet) -> Self {
        let mut panel = Self::new();
        panel.apply_selection(active);
        panel
    }

    /// The option groups, in display order.
    #[must_use]
    pub fn categories(&self) -> &[FilterCategory] {
        &self.categories
    }

    /// State of the standalone CUSTOMIZABLE checkbox.
    #[must_use]
    pub const fn customizable(&self) -> bool {
        self.customizable
    }

    /// Set the CUSTOMIZABLE checkbox.
    pub const fn set_customizable(&mut self, checked: bool) {
        self.customizable = checked;
    }

    /// Expand or collapse a group.
    pub fn toggle_category(&mut self, id: FilterId) {
        if let Some(category) = self.category_mut(id) {
            category.open = !category.open;
        }
    }

    /// Flip one checkbox within a group.
    pub fn toggle_option(&mut self, id: FilterId, value: &str) {
        if let Some(option) = self
            .category_mut(id)
            .and_then(|category| category.options.iter_mut().find(|o| o.value == value))
        {
            option.checked = !option.checked;
        }
    }

    /// Check every option in a group.
    pub fn select_all(&mut self, id: FilterId) {
        self.set_all(id, true);
    }

    /// Uncheck every option in a group.
    pub fn unselect_all(&mut self, id: FilterId) {
        self.set_all(id, false);
    }

    /// Derive the active filter set: groups with at least one checked option
    /// map to their checked values, the CUSTOMIZABLE checkbox maps to
    /// `["yes"]`, and empty selections are omitted entirely.
    #[must_use]
    pub fn active_filters(&self) -> ActiveFilterSet {
        let mut active = ActiveFilterSet::new();
        if self.customizable {
            active.insert(FilterId::Customizable, vec!["yes".to_owned()]);
        }
        for category in &self.categories {
            active.insert(category.id, category.selected_values());
        }
        active
    }

    /// Rehydrate checked state from an active filter set.
    ///
    /// Groups with a selection are opened so a rendered sidebar shows what
    /// is driving the current result.
    pub fn apply_selection(&mut self, active: &ActiveFilterSet) {
        self.customizable = active.contains(FilterId::Customizable, "yes");
        for category in &mut self.categories {
            for option in &mut category.options {
                option.checked = active.contains(category.id, option.value);
            }
            category.open = category.options.iter().any(|option| option.checked);
        }
    }

    fn category_mut(&mut self, id: FilterId) -> Option<&mut FilterCategory> {
        self.categories
            .iter_mut()
            .find(|category| category.id == id)
    }

    fn set_all(&mut self, id: FilterId, checked: bool) {
        if let Some(category) = self.category_mut(id) {
            for option in &mut category.options {
                option.checked = checked;
            }
        }
    }
}
