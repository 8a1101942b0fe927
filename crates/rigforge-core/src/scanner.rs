//! Component scanner: camera access and turning identifications into parts.

use async_trait::async_trait;
use thiserror::Error;

use crate::component::{Component, ComponentCategory, Price};
use crate::gateway::Identification;

/// Category used when the reported type matches nothing we know.
pub const FALLBACK_SCAN_CATEGORY: ComponentCategory = ComponentCategory::Case;

/// Camera could not deliver a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied; enable camera access and retry")]
    PermissionDenied,

    #[error("could not access a camera: {0}")]
    Unavailable(String),
}

/// A device that can capture a still image.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Captures one frame as encoded image bytes (PNG, JPEG, ...).
    async fn capture(&self) -> Result<Vec<u8>, CameraError>;
}

/// What the scanner screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScannerStatus {
    #[default]
    Ready,
    /// Dedicated error screen with retry and back actions.
    CameraError(CameraError),
}

/// Builds the component added to the build after a successful scan.
///
/// Scanned parts carry no price; the id is derived from `captured_at_millis`.
pub fn scanned_component(identification: &Identification, captured_at_millis: i64) -> Component {
    let category = ComponentCategory::from_label(&identification.component_type)
        .or_else(|| guess_category(&identification.component_type))
        .unwrap_or(FALLBACK_SCAN_CATEGORY);
    let short: String = identification.name.chars().take(3).collect();

    Component::new(
        format!("scan-{captured_at_millis}"),
        identification.name.clone(),
        category,
        Price::ZERO,
        identification.specs.clone(),
    )
    .with_image_ref(format!(
        "https://placehold.co/100x100?text={}",
        short.replace(' ', "+")
    ))
}

fn guess_category(reported: &str) -> Option<ComponentCategory> {
    let lower = reported.to_lowercase();
    let table: [(&[&str], ComponentCategory); 7] = [
        (&["graphics", "video", "gpu", "gráfica"], ComponentCategory::Gpu),
        (&["processor", "cpu", "procesador"], ComponentCategory::Cpu),
        (&["motherboard", "mainboard", "placa"], ComponentCategory::Motherboard),
        (&["memory", "ram", "dimm"], ComponentCategory::Ram),
        (&["ssd", "nvme", "hdd", "drive", "storage"], ComponentCategory::Storage),
        (&["power", "psu", "fuente"], ComponentCategory::Psu),
        (&["case", "chassis", "tower", "gabinete"], ComponentCategory::Case),
    ];
    table
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identification(name: &str, kind: &str) -> Identification {
        Identification {
            name: name.to_string(),
            component_type: kind.to_string(),
            specs: "16GB".to_string(),
        }
    }

    #[test]
    fn test_scanned_component_from_code() {
        let part = scanned_component(&identification("RTX 3060", "GPU"), 1_700_000_000_000);
        assert_eq!(part.id, "scan-1700000000000");
        assert_eq!(part.category, ComponentCategory::Gpu);
        assert_eq!(part.price, Price::ZERO);
        assert_eq!(part.spec_text, "16GB");
        assert_eq!(
            part.image_ref.as_deref(),
            Some("https://placehold.co/100x100?text=RTX")
        );
    }

    #[test]
    fn test_scanned_component_guesses_category() {
        let part = scanned_component(&identification("Vengeance", "DDR4 memory module"), 1);
        assert_eq!(part.category, ComponentCategory::Ram);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let part = scanned_component(&identification("Mystery", "gizmo"), 1);
        assert_eq!(part.category, FALLBACK_SCAN_CATEGORY);
    }
}
