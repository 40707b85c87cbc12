//! Fixed values shared by the sticker board and the navbar.

/// Local storage key holding the JSON array of placed stickers
pub const STICKER_STORAGE_KEY: &str = "shmoobium-stickers";

/// Stacking order floor; the first sticker placed gets `BASE_Z_INDEX + 1`
pub const BASE_Z_INDEX: u32 = 1000;

/// CSS z-index is a signed 32-bit integer; larger stored values are reassigned
pub const MAX_Z_INDEX: u32 = i32::MAX as u32;

/// Minimum distance between the viewport centre and a freshly spawned sticker
pub const SPAWN_CLEARANCE: f64 = 50.0;

/// Half the default sticker extent, so spawns are centred on the sampled point
pub const STICKER_HALF_EXTENT: f64 = 40.0;

/// Stored x values above this are legacy absolute pixels
pub const LEGACY_X_THRESHOLD: f64 = 100.0;

/// Viewports narrower than this count as small screens
pub const SMALL_SCREEN_BREAKPOINT: f64 = 768.0;

pub const SOUND_VOLUME: f64 = 0.3;
pub const DEFAULT_PICKUP_SOUND: &str = "/assets/StickerPeel.mp3";
pub const DEFAULT_PLACE_SOUND: &str = "/assets/StickerPlace.mp3";

/// Fallback logo when no icon is configured or the configured one fails to load
pub const DEFAULT_LOGO_SRC: &str = "/assets/shmoobium.webp";

/// Marker attribute naming the component type of a host element
pub const MARKER_ATTRIBUTE: &str = "data-shmoobium";
pub const INITIALIZED_ATTRIBUTE: &str = "data-shmoobium-initialized";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clicking an element carrying this attribute opens the sticker box popup
pub const OPEN_TRIGGER_ATTRIBUTE: &str = "data-shmoobium-open";

/// Navbar fragment to fetch at startup, declared on any element
pub const NAVBAR_SRC_ATTRIBUTE: &str = "data-shmoobium-navbar-src";
/// Optional selector the declared fragment is injected into
pub const NAVBAR_TARGET_ATTRIBUTE: &str = "data-shmoobium-navbar-target";
