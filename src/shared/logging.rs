//! Structured logging module for shmoobium
//!
//! Provides consistent, contextual logging across the components.
//! Uses tracing with an `operation` field so browser and native
//! subscribers can filter by subsystem.

/// Log operations for the different subsystems
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    StickerToggle,
    StickerDrag,
    StickerPersist,
    NavbarLayout,
    FragmentLoad,
    Bootstrap,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::StickerToggle => "sticker_toggle",
            LogOperation::StickerDrag => "sticker_drag",
            LogOperation::StickerPersist => "sticker_persist",
            LogOperation::NavbarLayout => "navbar_layout",
            LogOperation::FragmentLoad => "fragment_load",
            LogOperation::Bootstrap => "bootstrap",
        }
    }
}

/// Log a sticker placement or removal
pub fn log_sticker_toggled(sticker_id: &str, enabled: bool, placed_count: usize) {
    tracing::debug!(
        operation = LogOperation::StickerToggle.as_str(),
        sticker_id = sticker_id,
        enabled = enabled,
        placed_count = placed_count,
        "Sticker toggled"
    );
}

/// Log a rejected placement (limit reached)
pub fn log_sticker_limit(sticker_id: &str, max: usize) {
    tracing::info!(
        operation = LogOperation::StickerToggle.as_str(),
        sticker_id = sticker_id,
        max_stickers = max,
        "Sticker limit reached, placement rejected"
    );
}

/// Log the end of a drag with the final position
pub fn log_sticker_moved(sticker_id: &str, x_percent: f64, y: f64) {
    tracing::debug!(
        operation = LogOperation::StickerDrag.as_str(),
        sticker_id = sticker_id,
        x_percent = x_percent,
        y = y,
        "Sticker moved"
    );
}

/// Log restored sticker state
pub fn log_stickers_restored(count: usize, migrated: usize) {
    tracing::info!(
        operation = LogOperation::StickerPersist.as_str(),
        restored = count,
        migrated_legacy_x = migrated,
        "Stickers restored from storage"
    );
}

/// Log a storage failure; the board keeps running on in-memory state
pub fn log_storage_error(action: &str, error: &str) {
    tracing::warn!(
        operation = LogOperation::StickerPersist.as_str(),
        action = action,
        error = error,
        "Sticker storage failed, continuing with in-memory state"
    );
}

/// Log a layout mode change
pub fn log_navbar_mode(is_mobile: bool, navbar_width: f64, viewport_width: f64) {
    tracing::debug!(
        operation = LogOperation::NavbarLayout.as_str(),
        is_mobile = is_mobile,
        navbar_width = navbar_width,
        viewport_width = viewport_width,
        "Navbar layout mode changed"
    );
}

/// Log fragment load result
pub fn log_fragment_loaded(src: &str, target: &str, initialized: usize) {
    tracing::info!(
        operation = LogOperation::FragmentLoad.as_str(),
        src = src,
        target = target,
        initialized = initialized,
        "Navbar fragment loaded"
    );
}

/// Log fragment load failure
pub fn log_fragment_error(src: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::FragmentLoad.as_str(),
        src = src,
        error = error,
        "Error loading navbar"
    );
}

/// Log a component mounted by the data-attribute bootstrap
pub fn log_component_initialized(kind: &str, item_count: usize) {
    tracing::info!(
        operation = LogOperation::Bootstrap.as_str(),
        component = kind,
        item_count = item_count,
        "Component initialized"
    );
}

/// Install the native subscriber (the browser build logs through the console layer of dioxus)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_native_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::StickerToggle.as_str(), "sticker_toggle");
        assert_eq!(LogOperation::StickerDrag.as_str(), "sticker_drag");
        assert_eq!(LogOperation::StickerPersist.as_str(), "sticker_persist");
        assert_eq!(LogOperation::NavbarLayout.as_str(), "navbar_layout");
        assert_eq!(LogOperation::FragmentLoad.as_str(), "fragment_load");
        assert_eq!(LogOperation::Bootstrap.as_str(), "bootstrap");
    }
}
