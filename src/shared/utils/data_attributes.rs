//! Markup adapter: `data-*` attributes to configuration objects.
//!
//! `data-logo-text="Home"` becomes `"logoText": "Home"`. Booleans and numbers
//! are coerced, and the named palette colours are translated to hex.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Number, Value};
use std::str::FromStr;

use crate::shared::constants::{INITIALIZED_ATTRIBUTE, MARKER_ATTRIBUTE};

static KEBAB_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([a-z])").unwrap());

/// Values of the `data-shmoobium` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Navbar,
    StickerContainer,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Navbar => "navbar",
            ComponentKind::StickerContainer => "sticker-container",
        }
    }

    /// Configuration used when the markup leaves a key out
    pub fn default_config(&self) -> Map<String, Value> {
        let defaults = match self {
            ComponentKind::Navbar => json!({
                "position": "top",
                "style": "default",
                "slideover": "default",
                "alignment": "right",
                "logoText": "Shmoobium",
                "logoHref": "index.html",
                "fontColor": "#ffffff",
                "backgroundColor": "#141414",
                "displayShmoobiumVersion": false,
                "iconAlt": "Logo",
            }),
            ComponentKind::StickerContainer => json!({
                "maxStickers": 15,
                "enableSounds": true,
                "spawnRadius": 150,
                "stickerBoxOnMobile": true,
            }),
        };
        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "navbar" => Ok(ComponentKind::Navbar),
            "sticker-container" => Ok(ComponentKind::StickerContainer),
            _ => Err(format!("Unknown component type: {}", s)),
        }
    }
}

/// `logo-text` -> `logoText`
pub fn to_camel_case(name: &str) -> String {
    KEBAB_SEGMENT
        .replace_all(name, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Named palette tokens to hex; anything else passes through
pub fn convert_palette_color(value: &str) -> &str {
    match value {
        "shm-blue" => "#4485ca",
        "shm-red" => "#ab3031",
        "shm-green" => "#52cd7d",
        "shm-pink" => "#bd63d0",
        other => other,
    }
}

/// Interpret an attribute value: booleans, then numbers, then (palette) strings
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(number) = parse_number(raw) {
        return Value::Number(number);
    }

    Value::String(convert_palette_color(raw).to_string())
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok().filter(|v: &f64| v.is_finite())?;
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

/// Build a component's configuration from its element attributes
pub fn parse_data_attributes<I, K, V>(attributes: I, kind: ComponentKind) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = kind.default_config();
    for (name, value) in attributes {
        let name = name.as_ref();
        if name == MARKER_ATTRIBUTE || name == INITIALIZED_ATTRIBUTE {
            continue;
        }
        let Some(key) = name.strip_prefix("data-") else {
            continue;
        };
        config.insert(to_camel_case(key), coerce_value(value.as_ref()));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavbarConfig, NavbarPosition, StickerSettings};

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("logo-text"), "logoText");
        assert_eq!(to_camel_case("display-shmoobium-version"), "displayShmoobiumVersion");
        assert_eq!(to_camel_case("position"), "position");
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value("true"), Value::Bool(true));
        assert_eq!(coerce_value("false"), Value::Bool(false));
        assert_eq!(coerce_value("15"), json!(15));
        assert_eq!(coerce_value("2.5"), json!(2.5));
        assert_eq!(coerce_value(""), json!(""));
        assert_eq!(coerce_value("shm-pink"), json!("#bd63d0"));
        assert_eq!(coerce_value("#123abc"), json!("#123abc"));
        assert_eq!(coerce_value("NaN"), json!("NaN"));
    }

    #[test]
    fn test_component_kind() {
        assert_eq!("navbar".parse::<ComponentKind>(), Ok(ComponentKind::Navbar));
        assert_eq!(
            "sticker-container".parse::<ComponentKind>(),
            Ok(ComponentKind::StickerContainer)
        );
        assert!("carousel".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_navbar_attributes() {
        let attrs = vec![
            ("data-shmoobium", "navbar"),
            ("data-position", "left"),
            ("data-background-color", "shm-blue"),
            ("data-display-shmoobium-version", "true"),
            ("class", "site-nav"),
        ];
        let map = parse_data_attributes(attrs, ComponentKind::Navbar);
        assert!(!map.contains_key("shmoobium"));
        assert!(!map.contains_key("class"));
        assert_eq!(map["logoText"], "Shmoobium");

        let config = NavbarConfig::from_overrides(&Value::Object(map));
        assert_eq!(config.position, NavbarPosition::Left);
        assert_eq!(config.background_color.as_deref(), Some("#4485ca"));
        assert!(config.display_shmoobium_version);
        assert_eq!(config.logo_href, "index.html");
    }

    #[test]
    fn test_sticker_container_attributes() {
        let attrs = [("data-max-stickers", "4"), ("data-enable-sounds", "false")];
        let map = parse_data_attributes(attrs, ComponentKind::StickerContainer);
        let settings = StickerSettings::from_overrides(&Value::Object(map));
        assert_eq!(settings.max_stickers, 4);
        assert!(!settings.enable_sounds);
        assert_eq!(settings.spawn_radius, 150.0);
        assert!(settings.sticker_box_on_mobile);
    }
}
