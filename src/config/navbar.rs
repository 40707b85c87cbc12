use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::{lenient_opt_string, lenient_string};

/// Edge of the viewport the navbar is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NavbarPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl NavbarPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavbarPosition::Top => "top",
            NavbarPosition::Bottom => "bottom",
            NavbarPosition::Left => "left",
            NavbarPosition::Right => "right",
        }
    }

    /// Left and right bars stack their items vertically
    pub fn is_vertical(&self) -> bool {
        matches!(self, NavbarPosition::Left | NavbarPosition::Right)
    }
}

impl FromStr for NavbarPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(NavbarPosition::Bottom),
            "left" => Ok(NavbarPosition::Left),
            "right" => Ok(NavbarPosition::Right),
            _ => Ok(NavbarPosition::Top), // Default to top
        }
    }
}

impl From<String> for NavbarPosition {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NavbarStyle {
    #[default]
    Default,
    Floating,
    Clear,
}

impl NavbarStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavbarStyle::Default => "default",
            NavbarStyle::Floating => "floating",
            NavbarStyle::Clear => "clear",
        }
    }
}

impl FromStr for NavbarStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "floating" => Ok(NavbarStyle::Floating),
            "clear" => Ok(NavbarStyle::Clear),
            _ => Ok(NavbarStyle::Default),
        }
    }
}

impl From<String> for NavbarStyle {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// Mobile menu presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SlideoverStyle {
    #[default]
    Default,
    Bubble,
}

impl SlideoverStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideoverStyle::Default => "default",
            SlideoverStyle::Bubble => "bubble",
        }
    }
}

impl FromStr for SlideoverStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bubble" => Ok(SlideoverStyle::Bubble),
            _ => Ok(SlideoverStyle::Default),
        }
    }
}

impl From<String> for SlideoverStyle {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// Where the items sit along the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NavbarAlignment {
    Top,
    Bottom,
    Left,
    #[default]
    Right,
}

impl NavbarAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavbarAlignment::Top => "top",
            NavbarAlignment::Bottom => "bottom",
            NavbarAlignment::Left => "left",
            NavbarAlignment::Right => "right",
        }
    }

    /// Map the configured alignment onto the axis of the bar.
    ///
    /// Vertical bars only know top/bottom, horizontal bars only left/right.
    pub fn effective(&self, position: NavbarPosition) -> NavbarAlignment {
        let leading = matches!(self, NavbarAlignment::Top | NavbarAlignment::Left);
        match (position.is_vertical(), leading) {
            (true, true) => NavbarAlignment::Top,
            (true, false) => NavbarAlignment::Bottom,
            (false, true) => NavbarAlignment::Left,
            (false, false) => NavbarAlignment::Right,
        }
    }
}

impl FromStr for NavbarAlignment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(NavbarAlignment::Top),
            "bottom" => Ok(NavbarAlignment::Bottom),
            "left" => Ok(NavbarAlignment::Left),
            _ => Ok(NavbarAlignment::Right),
        }
    }
}

impl From<String> for NavbarAlignment {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// Cost model for estimating whether the items fit on one line.
///
/// Empirical values; exact fit is approximate by nature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitMetrics {
    pub char_width: f64,
    pub icon_width: f64,
    pub icon_gap: f64,
    pub dropdown_arrow_width: f64,
    /// Horizontal padding inside one item
    pub item_padding: f64,
    /// Gap between two items
    pub item_spacing: f64,
    /// Container padding plus the mobile toggle button
    pub reserved_space: f64,
    pub overflow_tolerance: f64,
    pub mobile_breakpoint: f64,
    pub mobile_menu_min_width: f64,
    pub mobile_menu_max_width: f64,
    /// Padding and close-button room added to the longest label
    pub mobile_menu_allowance: f64,
}

impl Default for FitMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            icon_width: 24.0,
            icon_gap: 6.0,
            dropdown_arrow_width: 16.0,
            item_padding: 32.0,
            item_spacing: 8.0,
            reserved_space: 70.0,
            overflow_tolerance: 50.0,
            mobile_breakpoint: 768.0,
            mobile_menu_min_width: 200.0,
            mobile_menu_max_width: 320.0,
            mobile_menu_allowance: 48.0,
        }
    }
}

/// Page-wide navbar colours, normally provided once by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarSettings {
    pub navbar_color: String,
    pub navbar_text_color: String,
    pub display_shmoobium_version: bool,
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self {
            navbar_color: "#141414".to_string(),
            navbar_text_color: "#ffffff".to_string(),
            display_shmoobium_version: false,
        }
    }
}

impl NavbarSettings {
    pub fn from_overrides(overrides: &Value) -> Self {
        super::merge_onto_defaults(overrides)
    }
}

/// Everything a navbar instance needs apart from its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarConfig {
    pub position: NavbarPosition,
    pub style: NavbarStyle,
    pub slideover: SlideoverStyle,
    pub alignment: NavbarAlignment,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub logo_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub logo_href: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub font: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub font_color: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub background_color: Option<String>,
    pub display_shmoobium_version: bool,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub icon_src: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub icon_alt: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub icon_href: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub class_name: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub item_class_name: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub icon_class_name: Option<String>,
    pub fit: FitMetrics,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            position: NavbarPosition::default(),
            style: NavbarStyle::default(),
            slideover: SlideoverStyle::default(),
            alignment: NavbarAlignment::default(),
            logo_text: None,
            logo_href: "/".to_string(),
            font: None,
            font_color: None,
            background_color: None,
            display_shmoobium_version: false,
            icon_src: None,
            icon_alt: None,
            icon_href: None,
            class_name: None,
            item_class_name: None,
            icon_class_name: None,
            fit: FitMetrics::default(),
        }
    }
}

impl NavbarConfig {
    pub fn from_overrides(overrides: &Value) -> Self {
        super::merge_onto_defaults(overrides)
    }

    /// Inline style for the `<nav>` element; explicit colours win over page settings
    pub fn inline_style(&self, settings: &NavbarSettings) -> String {
        let mut style = String::new();
        if let Some(font) = &self.font {
            style.push_str(&format!("font-family: {};", font));
        }
        let color = self.font_color.as_deref().unwrap_or(&settings.navbar_text_color);
        style.push_str(&format!("color: {};", color));
        let background = self
            .background_color
            .as_deref()
            .unwrap_or(&settings.navbar_color);
        style.push_str(&format!("background-color: {};", background));
        style
    }

    pub fn shows_version(&self, settings: &NavbarSettings) -> bool {
        self.display_shmoobium_version || settings.display_shmoobium_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_position_falls_back_to_top() {
        assert_eq!("diagonal".parse::<NavbarPosition>(), Ok(NavbarPosition::Top));
        let config = NavbarConfig::from_overrides(&json!({ "position": "diagonal" }));
        assert_eq!(config.position, NavbarPosition::Top);
    }

    #[test]
    fn test_enum_values_parse() {
        let config = NavbarConfig::from_overrides(&json!({
            "position": "left",
            "style": "floating",
            "slideover": "bubble",
            "alignment": "bottom",
        }));
        assert_eq!(config.position, NavbarPosition::Left);
        assert_eq!(config.style, NavbarStyle::Floating);
        assert_eq!(config.slideover, SlideoverStyle::Bubble);
        assert_eq!(config.alignment, NavbarAlignment::Bottom);
    }

    #[test]
    fn test_effective_alignment() {
        use NavbarAlignment::*;
        assert_eq!(Left.effective(NavbarPosition::Left), Top);
        assert_eq!(Right.effective(NavbarPosition::Right), Bottom);
        assert_eq!(Top.effective(NavbarPosition::Top), Left);
        assert_eq!(Bottom.effective(NavbarPosition::Bottom), Right);
    }

    #[test]
    fn test_numeric_logo_text_is_kept_as_text() {
        let config = NavbarConfig::from_overrides(&json!({ "logoText": 2024 }));
        assert_eq!(config.logo_text.as_deref(), Some("2024"));
    }

    #[test]
    fn test_inline_style_prefers_explicit_colors() {
        let settings = NavbarSettings::default();
        let config = NavbarConfig {
            font_color: Some("#4485ca".to_string()),
            ..Default::default()
        };
        let style = config.inline_style(&settings);
        assert!(style.contains("color: #4485ca;"));
        assert!(style.contains("background-color: #141414;"));
    }

    #[test]
    fn test_fit_metrics_are_configurable() {
        let config = NavbarConfig::from_overrides(&json!({ "fit": { "charWidth": 10 } }));
        assert_eq!(config.fit.char_width, 10.0);
        assert_eq!(config.fit.reserved_space, 70.0);
    }
}
