//! # Category Lookup
//!
//! Read-only table of the signed-in user's categories, loaded once per session.
//! Used for transaction badges and for the category picker in the add form.

use shared::Category;

/// Shown when a transaction has no category or one that cannot be resolved
pub const PLACEHOLDER_NAME: &str = "—";
pub const PLACEHOLDER_COLOR: &str = "#888";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLookup {
    categories: Vec<Category>,
}

impl CategoryLookup {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: Option<&str>) -> Option<&Category> {
        let id = id?;
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name, falling back to the placeholder
    pub fn name_for(&self, id: Option<&str>) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(PLACEHOLDER_NAME)
    }

    /// Badge color, falling back to the placeholder for missing categories or colors
    pub fn color_for(&self, id: Option<&str>) -> &str {
        self.get(id)
            .and_then(|c| c.color.as_deref())
            .unwrap_or(PLACEHOLDER_COLOR)
    }

    /// Categories of the given type, in backend order
    pub fn of_type(&self, is_income: bool) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_income == is_income).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::category;

    fn lookup() -> CategoryLookup {
        let mut fuel = category("c3", "Fuel", false);
        fuel.color = Some("#e67e22".to_string());
        CategoryLookup::new(vec![
            category("c1", "Groceries", false),
            category("c2", "Salary", true),
            fuel,
        ])
    }

    #[test]
    fn test_name_resolves_known_category() {
        let lookup = CategoryLookup::new(vec![category("c1", "Groceries", false)]);
        assert_eq!(lookup.name_for(Some("c1")), "Groceries");
    }

    #[test]
    fn test_unknown_or_missing_category_uses_placeholder() {
        let lookup = lookup();
        assert_eq!(lookup.name_for(Some("unknown-id")), PLACEHOLDER_NAME);
        assert_eq!(lookup.name_for(None), PLACEHOLDER_NAME);
        assert_eq!(lookup.color_for(Some("unknown-id")), PLACEHOLDER_COLOR);
        assert_eq!(lookup.color_for(None), PLACEHOLDER_COLOR);
    }

    #[test]
    fn test_color_falls_back_when_category_has_none() {
        let lookup = lookup();
        assert_eq!(lookup.color_for(Some("c3")), "#e67e22");
        assert_eq!(lookup.color_for(Some("c1")), PLACEHOLDER_COLOR);
    }

    #[test]
    fn test_of_type_splits_income_and_expense() {
        let lookup = lookup();
        let expense: Vec<&str> = lookup.of_type(false).iter().map(|c| c.id.as_str()).collect();
        let income: Vec<&str> = lookup.of_type(true).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(expense, vec!["c1", "c3"]);
        assert_eq!(income, vec!["c2"]);
    }
}
