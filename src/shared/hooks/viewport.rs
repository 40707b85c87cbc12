use crate::domain::models::Viewport;

/// Current window inner size
#[cfg(target_arch = "wasm32")]
pub fn read_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default();
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or_default();
    Viewport::new(width, height)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_viewport() -> Viewport {
    Viewport::default()
}
