//! Build domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::component::{Component, Price};
use crate::error::{Result, RigForgeError};

/// Identifier of the transient, unsaved build being edited.
pub const CURRENT_BUILD_ID: &str = "temp";

/// Name given to a fresh current build.
pub const DEFAULT_BUILD_NAME: &str = "My Custom PC";

/// Identifies one added instance of a component inside a build.
///
/// Catalog ids repeat when the same part is added twice; line ids never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(u32);

impl LineId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One component instance within a build.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub line_id: LineId,
    pub component: Component,
}

/// A named, ordered collection of components with a derived total price.
///
/// The total is recomputed on every mutation of the component list and can
/// only be read through [`Build::total_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub id: String,
    pub name: String,
    /// Local date the snapshot was saved (`YYYY-MM-DD`); `None` while unsaved.
    pub saved_date: Option<String>,
    items: Vec<LineItem>,
    total_price: Price,
    next_line: u32,
}

impl Default for Build {
    fn default() -> Self {
        Self::new(CURRENT_BUILD_ID, DEFAULT_BUILD_NAME)
    }
}

impl Build {
    /// Creates an empty build.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            saved_date: None,
            items: Vec::new(),
            total_price: Price::ZERO,
            next_line: 1,
        }
    }

    /// Rebuilds a build from a stored component list, recomputing the total.
    pub fn from_components(
        id: impl Into<String>,
        name: impl Into<String>,
        components: impl IntoIterator<Item = Component>,
        saved_date: Option<String>,
    ) -> Self {
        let mut build = Self::new(id, name);
        build.saved_date = saved_date;
        for component in components {
            build.push(component);
        }
        build.recompute_total();
        build
    }

    /// Like [`Build::from_components`], but fails when the component prices
    /// cannot be summed without overflow.
    pub fn try_from_components(
        id: impl Into<String>,
        name: impl Into<String>,
        components: Vec<Component>,
        saved_date: Option<String>,
    ) -> Result<Self> {
        let id = id.into();
        components
            .iter()
            .try_fold(Price::ZERO, |total, c| total.checked_add(c.price))
            .ok_or_else(|| {
                RigForgeError::invalid_input(format!("total price of build '{id}' overflows"))
            })?;
        Ok(Self::from_components(id, name, components, saved_date))
    }

    /// Appends a component and returns the line id of the new instance.
    pub fn add_component(&mut self, component: Component) -> LineId {
        let line_id = self.push(component);
        self.recompute_total();
        line_id
    }

    /// Removes one instance of the component with the given catalog id.
    ///
    /// The earliest added instance goes first. Returns `None` if no instance
    /// matches.
    pub fn remove_component(&mut self, component_id: &str) -> Option<Component> {
        let index = self
            .items
            .iter()
            .position(|item| item.component.id == component_id)?;
        Some(self.remove_at(index))
    }

    /// Removes the instance with the given line id.
    pub fn remove_line(&mut self, line_id: LineId) -> Option<Component> {
        let index = self.items.iter().position(|item| item.line_id == line_id)?;
        Some(self.remove_at(index))
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_total();
    }

    pub fn total_price(&self) -> Price {
        self.total_price
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.items.iter().map(|item| &item.component)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Component names joined with `", "`.
    pub fn component_names(&self) -> String {
        self.components()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Copies this build under a new identity, keeping its components.
    pub fn snapshot(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        saved_date: Option<String>,
    ) -> Build {
        Build {
            id: id.into(),
            name: name.into(),
            saved_date,
            ..self.clone()
        }
    }

    fn push(&mut self, component: Component) -> LineId {
        let line_id = LineId::new(self.next_line);
        self.next_line += 1;
        self.items.push(LineItem { line_id, component });
        line_id
    }

    fn remove_at(&mut self, index: usize) -> Component {
        let removed = self.items.remove(index).component;
        self.recompute_total();
        removed
    }

    fn recompute_total(&mut self) {
        self.total_price = self.items.iter().map(|item| item.component.price).sum();
    }
}
