use dioxus::prelude::*;

use crate::config::{FitMetrics, NavbarPosition};
use crate::domain::models::NavItem;
use crate::domain::services::{ItemAction, NavbarLayout};

/// Navbar layout state plus the mounted `<nav>` it measures
#[derive(Clone, Copy, PartialEq)]
pub struct UseNavbarLayout {
    pub layout: Signal<NavbarLayout>,
    #[cfg(target_arch = "wasm32")]
    root: Signal<Option<web_sys::Element>>,
}

impl UseNavbarLayout {
    /// Keep a handle on the rendered navbar and run the first fit check
    #[allow(unused_variables)]
    pub fn on_mounted(&mut self, event: MountedEvent) {
        #[cfg(target_arch = "wasm32")]
        if let Some(element) = event.data().downcast::<web_sys::Element>() {
            self.root.set(Some(element.clone()));
            self.measure();
        }
    }

    /// Re-run the fit check against the rendered sizes
    pub fn measure(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(measurements) = self.root.peek().as_ref().map(read_measurements) else {
                return;
            };
            self.layout.write().resolve_mode(measurements);
        }
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.layout.write().toggle_mobile_menu();
    }

    pub fn close(&mut self) {
        if self.layout.peek().state() != self.layout.peek().state().closed() {
            self.layout.write().close_on_outside_interaction();
        }
    }

    pub fn activate(&mut self, index: usize, sub_index: Option<usize>) -> ItemAction {
        let action = self.layout.write().activate_item(index, sub_index);
        if let ItemAction::Invoke(callback) = &action {
            callback.call();
        }
        action
    }
}

#[cfg(target_arch = "wasm32")]
fn read_measurements(root: &web_sys::Element) -> crate::domain::services::NavbarMeasurements {
    let viewport_width = super::read_viewport().width;
    let navbar_width = root.get_bounding_client_rect().width();
    let icon_width = root
        .query_selector(".navbar__brand")
        .ok()
        .flatten()
        .map(|brand| brand.get_bounding_client_rect().width())
        .unwrap_or_default();

    crate::domain::services::NavbarMeasurements {
        viewport_width,
        navbar_width,
        icon_width,
    }
}

/// Layout state for one navbar.
///
/// The fit check re-runs on mount and on resize. Pointer-down outside the
/// navbar and page scroll close any open menu.
pub fn use_navbar_layout(
    position: NavbarPosition,
    items: Vec<NavItem>,
    metrics: FitMetrics,
) -> UseNavbarLayout {
    let mut layout = use_signal(|| NavbarLayout::new(position, items.clone(), metrics));

    #[cfg(target_arch = "wasm32")]
    let root = use_signal(|| None::<web_sys::Element>);

    let mut hook = UseNavbarLayout {
        layout,
        #[cfg(target_arch = "wasm32")]
        root,
    };

    use_effect(use_reactive((&items,), move |(items,)| {
        if layout.peek().items() != items.as_slice() {
            layout.write().set_items(items);
            hook.measure();
        }
    }));

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        super::use_window_listener("resize", move |_| hook.measure());
        super::use_window_listener("scroll", move |_| hook.close());
        super::use_document_listener("pointerdown", move |event| {
            let inside = match (root.peek().as_ref(), event.target()) {
                (Some(root), Some(target)) => target
                    .dyn_ref::<web_sys::Node>()
                    .is_some_and(|node| root.contains(Some(node))),
                _ => false,
            };
            if !inside {
                hook.close();
            }
        });
    }

    hook
}
