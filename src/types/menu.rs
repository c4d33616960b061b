//! Menu types
//!
//! A menu is loaded once per run and never mutated afterwards. Items are
//! grouped by category, keeping the order in which categories and items
//! first appear in the source.

use rust_decimal::Decimal;

/// Category holding optional extras, excluded from main item selection
pub const ADD_ON_CATEGORY: &str = "Add-Ons";

/// A single purchasable menu entry
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Display name, e.g. "Espresso"
    pub name: String,

    /// Category the item is listed under, e.g. "Coffee"
    pub category: String,

    /// Unit price in INR, never negative
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Decimal) -> Self {
        MenuItem {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

/// Menu items grouped by category
///
/// Categories are kept in first-occurrence order; items within a category
/// follow source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuByCategory {
    categories: Vec<(String, Vec<MenuItem>)>,
}

impl MenuByCategory {
    /// Group an ordered list of items by category
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        let mut menu = MenuByCategory::default();
        for item in items {
            menu.push(item);
        }
        menu
    }

    fn push(&mut self, item: MenuItem) {
        match self
            .categories
            .iter_mut()
            .find(|(name, _)| *name == item.category)
        {
            Some((_, items)) => items.push(item),
            None => self.categories.push((item.category.clone(), vec![item])),
        }
    }

    /// Category names in first-occurrence order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Items of a category, or an empty slice if the category is unknown
    pub fn items(&self, category: &str) -> &[MenuItem] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    /// Categories eligible for main item selection (everything but `add_on_category`)
    pub fn main_categories(&self, add_on_category: &str) -> Vec<&str> {
        self.categories()
            .filter(|name| *name != add_on_category)
            .collect()
    }

    /// Items of `add_on_category`, offered as optional extras
    pub fn add_ons(&self, add_on_category: &str) -> &[MenuItem] {
        self.items(add_on_category)
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
