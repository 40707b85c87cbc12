use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::geometry::Viewport;

/// A sticker the host offers in the catalog popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerCatalogEntry {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Placed by default on first visit
    #[serde(default)]
    pub enabled: bool,
}

impl StickerCatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            enabled: false,
        }
    }
}

/// Size category, cycled with shift-click or a two finger touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StickerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl StickerSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            StickerSize::Small => "small",
            StickerSize::Medium => "medium",
            StickerSize::Large => "large",
        }
    }

    /// Rendered edge length in pixels
    pub fn pixels(&self) -> f64 {
        match self {
            StickerSize::Small => 60.0,
            StickerSize::Medium => 80.0,
            StickerSize::Large => 120.0,
        }
    }

    pub fn next(&self) -> StickerSize {
        match self {
            StickerSize::Small => StickerSize::Medium,
            StickerSize::Medium => StickerSize::Large,
            StickerSize::Large => StickerSize::Small,
        }
    }
}

impl FromStr for StickerSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(StickerSize::Small),
            "large" => Ok(StickerSize::Large),
            _ => Ok(StickerSize::Medium),
        }
    }
}

impl From<String> for StickerSize {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// `x` is a percentage of the viewport width, `y` is absolute pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickerPosition {
    pub x: f64,
    pub y: f64,
}

impl StickerPosition {
    /// Top-left corner in client pixels for the given viewport
    pub fn to_pixels(&self, viewport: &Viewport) -> (f64, f64) {
        (viewport.percent_to_x(self.x), self.y)
    }
}

/// A catalog entry dropped onto the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSticker {
    #[serde(flatten)]
    pub entry: StickerCatalogEntry,
    pub position: StickerPosition,
    /// Missing in older saves; filled in from the counter on load
    #[serde(default)]
    pub z_index: Option<u32>,
    #[serde(default)]
    pub size: StickerSize,
    #[serde(skip)]
    pub is_dragging: bool,
}

impl PlacedSticker {
    pub fn new(entry: StickerCatalogEntry, position: StickerPosition, z_index: u32) -> Self {
        Self {
            entry: StickerCatalogEntry {
                enabled: true,
                ..entry
            },
            position,
            z_index: Some(z_index),
            size: StickerSize::default(),
            is_dragging: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn z(&self) -> u32 {
        self.z_index.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_cycle() {
        assert_eq!(StickerSize::Small.next(), StickerSize::Medium);
        assert_eq!(StickerSize::Medium.next(), StickerSize::Large);
        assert_eq!(StickerSize::Large.next(), StickerSize::Small);
    }

    #[test]
    fn test_size_from_str_falls_back_to_medium() {
        assert_eq!("small".parse::<StickerSize>(), Ok(StickerSize::Small));
        assert_eq!("huge".parse::<StickerSize>(), Ok(StickerSize::Medium));
    }

    #[test]
    fn test_placed_sticker_json_shape() {
        let sticker = PlacedSticker::new(
            StickerCatalogEntry::new("1", "Shmoob", "/shmoob.webp"),
            StickerPosition { x: 12.5, y: 300.0 },
            1001,
        );
        let json = serde_json::to_value(&sticker).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["zIndex"], 1001);
        assert_eq!(json["size"], "medium");
        assert_eq!(json["position"]["x"], 12.5);
        assert!(json.get("isDragging").is_none());
    }

    #[test]
    fn test_placed_sticker_missing_fields_default() {
        let raw = r#"{"id":"2","name":"Old","image":"/old.png","enabled":true,"position":{"x":40,"y":10}}"#;
        let sticker: PlacedSticker = serde_json::from_str(raw).unwrap();
        assert_eq!(sticker.size, StickerSize::Medium);
        assert_eq!(sticker.z_index, None);
        assert!(!sticker.is_dragging);
    }
}
