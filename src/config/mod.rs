//! Component configuration
//!
//! Every controller receives its settings explicitly at construction.
//! Hosts that change settings at runtime call the controller's
//! `reload_settings` instead of relying on a process-wide cache.

pub mod navbar;
pub mod sticker;

pub use navbar::{
    FitMetrics, NavbarAlignment, NavbarConfig, NavbarPosition, NavbarSettings, NavbarStyle,
    SlideoverStyle,
};
pub use sticker::StickerSettings;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Overlay `overrides` onto the serialized defaults of `T`.
///
/// Only object keys are merged; a non-object override leaves the defaults untouched.
/// Values that fail to deserialize fall back to the defaults as a whole.
pub fn merge_onto_defaults<T>(overrides: &Value) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut base = match serde_json::to_value(T::default()) {
        Ok(value) => value,
        Err(_) => return T::default(),
    };

    if let (Value::Object(base_map), Value::Object(override_map)) = (&mut base, overrides) {
        for (key, value) in override_map {
            base_map.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(base).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load settings, using defaults");
        T::default()
    })
}

/// Accept strings, numbers and booleans for text fields.
///
/// The markup adapter coerces numeric-looking attributes (`data-logo-text="2024"`)
/// to numbers, so text fields turn them back into strings.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_unspecified_defaults() {
        let settings: StickerSettings = merge_onto_defaults(&json!({ "maxStickers": 5 }));
        assert_eq!(settings.max_stickers, 5);
        assert_eq!(settings.spawn_radius, 150.0);
        assert!(settings.enable_sounds);
    }

    #[test]
    fn test_merge_invalid_value_falls_back() {
        let settings: StickerSettings = merge_onto_defaults(&json!({ "maxStickers": "lots" }));
        assert_eq!(settings, StickerSettings::default());
    }

    #[test]
    fn test_merge_non_object_override() {
        let settings: StickerSettings = merge_onto_defaults(&json!(null));
        assert_eq!(settings, StickerSettings::default());
    }
}
