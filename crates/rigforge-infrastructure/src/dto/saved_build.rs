//! Stored representation of saved builds.
//!
//! The document is a JSON array of builds, newest first. Field aliases accept
//! documents written by the earlier browser version of the app (`type`,
//! `specs`, `image`, `date`).

use serde::{Deserialize, Serialize};

use rigforge_core::RigForgeError;
use rigforge_core::build::Build;
use rigforge_core::component::{Component, ComponentCategory, Price};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDto {
    pub id: String,
    pub name: String,
    #[serde(alias = "type")]
    pub category: ComponentCategory,
    pub price: Price,
    #[serde(default, alias = "specs")]
    pub spec_text: String,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl From<&Component> for ComponentDto {
    fn from(component: &Component) -> Self {
        Self {
            id: component.id.clone(),
            name: component.name.clone(),
            category: component.category,
            price: component.price,
            spec_text: component.spec_text.clone(),
            image_ref: component.image_ref.clone(),
        }
    }
}

impl From<ComponentDto> for Component {
    fn from(dto: ComponentDto) -> Self {
        Component {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            price: dto.price,
            spec_text: dto.spec_text,
            image_ref: dto.image_ref,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBuildDto {
    pub id: String,
    pub name: String,
    pub components: Vec<ComponentDto>,
    /// Written for readers of the raw file; recomputed on load.
    #[serde(default)]
    pub total_price: Price,
    #[serde(default, alias = "date", skip_serializing_if = "Option::is_none")]
    pub saved_date: Option<String>,
}

impl From<&Build> for SavedBuildDto {
    fn from(build: &Build) -> Self {
        Self {
            id: build.id.clone(),
            name: build.name.clone(),
            components: build.components().map(ComponentDto::from).collect(),
            total_price: build.total_price(),
            saved_date: build.saved_date.clone(),
        }
    }
}

impl TryFrom<SavedBuildDto> for Build {
    type Error = RigForgeError;

    fn try_from(dto: SavedBuildDto) -> Result<Self, Self::Error> {
        let build = Build::try_from_components(
            dto.id,
            dto.name,
            dto.components.into_iter().map(Component::from).collect(),
            dto.saved_date,
        )?;
        if build.total_price() != dto.total_price {
            tracing::debug!(
                build_id = %build.id,
                stored = %dto.total_price,
                computed = %build.total_price(),
                "stored total differs from component sum; using the sum"
            );
        }
        Ok(build)
    }
}
