use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::constants::{DEFAULT_PICKUP_SOUND, DEFAULT_PLACE_SOUND};

/// Sticker board behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickerSettings {
    pub enable_sounds: bool,
    /// Maximum spawn distance (px) beyond the fixed clearance
    pub spawn_radius: f64,
    pub max_stickers: usize,
    /// Render the board on viewports narrower than the small-screen breakpoint
    pub sticker_box_on_mobile: bool,
    pub pickup_sound: String,
    pub place_sound: String,
}

impl Default for StickerSettings {
    fn default() -> Self {
        Self {
            enable_sounds: true,
            spawn_radius: 150.0,
            max_stickers: 20,
            sticker_box_on_mobile: false,
            pickup_sound: DEFAULT_PICKUP_SOUND.to_string(),
            place_sound: DEFAULT_PLACE_SOUND.to_string(),
        }
    }
}

impl StickerSettings {
    /// Defaults overlaid with a host-supplied settings object
    pub fn from_overrides(overrides: &Value) -> Self {
        super::merge_onto_defaults(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = StickerSettings::default();
        assert!(settings.enable_sounds);
        assert_eq!(settings.spawn_radius, 150.0);
        assert_eq!(settings.max_stickers, 20);
        assert!(!settings.sticker_box_on_mobile);
    }

    #[test]
    fn test_from_overrides() {
        let settings = StickerSettings::from_overrides(&json!({
            "enableSounds": false,
            "spawnRadius": 90,
            "stickerBoxOnMobile": true,
        }));
        assert!(!settings.enable_sounds);
        assert_eq!(settings.spawn_radius, 90.0);
        assert!(settings.sticker_box_on_mobile);
        assert_eq!(settings.max_stickers, 20);
    }
}
