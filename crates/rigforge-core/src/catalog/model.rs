//! Catalog of purchasable components.

use super::filter::CategoryFilter;
use crate::component::Component;

/// Read-only reference list of purchasable components.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> &'static Catalog {
        super::builtin::builtin()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Returns the components whose name contains `term` (case-insensitive)
    /// and whose category passes `selector`, in catalog order.
    ///
    /// An empty term matches every name.
    pub fn filter(&self, term: &str, selector: CategoryFilter) -> Vec<&Component> {
        let needle = term.to_lowercase();
        self.components
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .filter(|c| selector.matches(c.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentCategory;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 22);
        let cpu = catalog.get("cpu1").unwrap();
        assert_eq!(cpu.name, "Intel Core i9-14900K");
        assert_eq!(cpu.price.to_string(), "$589");
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter("", CategoryFilter::All).len(), catalog.len());
    }

    #[test]
    fn test_filter_by_term_and_category() {
        let catalog = Catalog::builtin();
        let selector: CategoryFilter = "Tarjeta Gráfica".parse().unwrap();
        let found = catalog.filter("rtx", selector);

        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["gpu1", "gpu2", "gpu3"]);
        assert!(found.iter().all(|c| c.category == ComponentCategory::Gpu));
    }

    #[test]
    fn test_filter_category_excludes_matching_names() {
        let catalog = Catalog::builtin();
        let found = catalog.filter("corsair", CategoryFilter::Only(ComponentCategory::Psu));
        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["psu1"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.filter("zzzznomatch", CategoryFilter::All).is_empty());
    }
}
