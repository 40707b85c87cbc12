//! Shmoobium - browser entry point
//!
//! Scans the page for `data-shmoobium` markers and mounts a component on each.

// WASM entry point (browser)
#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn main() {
    use wasm_bindgen::{closure::Closure, JsCast};

    dioxus::logger::initialize_default();
    web_sys::console::log_1(&format!("[WASM] Shmoobium {} loaded", shmoobium::shared::constants::VERSION).into());

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(initialize);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            tracing::error!(error = ?e, "Failed to wait for DOMContentLoaded");
        }
    } else {
        initialize();
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn initialize() {
    if let Err(e) = mount_components() {
        tracing::error!(error = ?e, "Failed to initialize components");
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn mount_components() -> anyhow::Result<()> {
    use anyhow::Context;
    use shmoobium::app::bootstrap::{bind_open_triggers, initialize_components, load_declared_navbars};

    let components = initialize_components().context("scanning data-shmoobium markers")?;
    let triggers = components.sticker_box().map(bind_open_triggers).unwrap_or_default();
    let fragments = load_declared_navbars();
    tracing::info!(
        count = components.count(),
        triggers = triggers,
        fragments = fragments,
        "Shmoobium components initialized"
    );
    Ok(())
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
fn main() {}

// Native build: nothing to mount, the library is exercised through its tests
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    shmoobium::shared::logging::init_native_logging();
    tracing::info!(
        version = shmoobium::shared::constants::VERSION,
        "Shmoobium renders in the browser; build for wasm32 to mount components"
    );
}
