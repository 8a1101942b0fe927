//! Component domain models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::price::Price;

/// Hardware category of a component.
///
/// Serialized by its upper-case name (`GPU`). Deserialization also accepts
/// the English and Spanish display labels used by older saved documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentCategory {
    #[serde(alias = "Processor", alias = "Procesador")]
    #[strum(to_string = "Processor")]
    Cpu,
    #[serde(alias = "Graphics Card", alias = "Tarjeta Gráfica")]
    #[strum(to_string = "Graphics Card")]
    Gpu,
    #[serde(alias = "Motherboard", alias = "Placa Madre")]
    #[strum(to_string = "Motherboard")]
    Motherboard,
    #[serde(alias = "Memory", alias = "Memoria RAM")]
    #[strum(to_string = "Memory")]
    Ram,
    #[serde(alias = "Storage", alias = "Almacenamiento")]
    #[strum(to_string = "Storage")]
    Storage,
    #[serde(alias = "Power Supply", alias = "Fuente de Poder")]
    #[strum(to_string = "Power Supply")]
    Psu,
    #[serde(alias = "Case", alias = "Gabinete")]
    #[strum(to_string = "Case")]
    Case,
}

impl ComponentCategory {
    /// Short upper-case code (`CPU`, `GPU`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Motherboard => "MOTHERBOARD",
            Self::Ram => "RAM",
            Self::Storage => "STORAGE",
            Self::Psu => "PSU",
            Self::Case => "CASE",
        }
    }

    fn spanish_label(self) -> &'static str {
        match self {
            Self::Cpu => "Procesador",
            Self::Gpu => "Tarjeta Gráfica",
            Self::Motherboard => "Placa Madre",
            Self::Ram => "Memoria RAM",
            Self::Storage => "Almacenamiento",
            Self::Psu => "Fuente de Poder",
            Self::Case => "Gabinete",
        }
    }

    /// Matches a free-form category label.
    ///
    /// Accepts the code, the display label and the Spanish label, ignoring
    /// case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        Self::iter().find(|category| {
            category.code().to_lowercase() == wanted
                || category.to_string().to_lowercase() == wanted
                || category.spanish_label().to_lowercase() == wanted
        })
    }
}

impl FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown component category: '{s}'"))
    }
}

/// A purchasable hardware component.
///
/// Catalog entries are immutable once defined; builds hold their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Catalog identifier. Not unique inside a build.
    pub id: String,
    pub name: String,
    pub category: ComponentCategory,
    pub price: Price,
    /// Short human-readable specification (e.g. "LGA1700, 24 Cores").
    pub spec_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ComponentCategory,
        price: Price,
        spec_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            price,
            spec_text: spec_text.into(),
            image_ref: None,
        }
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_accepts_all_spellings() {
        assert_eq!(ComponentCategory::from_label("GPU"), Some(ComponentCategory::Gpu));
        assert_eq!(
            ComponentCategory::from_label("graphics card"),
            Some(ComponentCategory::Gpu)
        );
        assert_eq!(
            ComponentCategory::from_label("Tarjeta Gráfica"),
            Some(ComponentCategory::Gpu)
        );
        assert_eq!(
            ComponentCategory::from_label(" fuente de poder "),
            Some(ComponentCategory::Psu)
        );
        assert_eq!(ComponentCategory::from_label("toaster"), None);
        assert_eq!(ComponentCategory::from_label(""), None);
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(
            serde_json::to_string(&ComponentCategory::Motherboard).unwrap(),
            "\"MOTHERBOARD\""
        );
        let parsed: ComponentCategory = serde_json::from_str("\"Memoria RAM\"").unwrap();
        assert_eq!(parsed, ComponentCategory::Ram);
    }

    #[test]
    fn test_component_serializes_camel_case() {
        let component = Component::new(
            "psu1",
            "Corsair RM1000x",
            ComponentCategory::Psu,
            Price::from_dollars(189),
            "1000W Gold",
        );
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["specText"], "1000W Gold");
        assert_eq!(json["price"], 189);
        assert!(json.get("imageRef").is_none());
    }
}
