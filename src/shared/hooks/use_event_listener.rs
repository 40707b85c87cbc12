//! Scoped DOM event subscriptions.
//!
//! A `ListenerGuard` owns both the JS closure and the registration; dropping
//! it removes the listener. Hooks keep guards inside hook state, so unmounting
//! a component always releases what it registered.

#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[cfg(target_arch = "wasm32")]
use crate::shared::errors::{js_err, Result, ShmoobiumError};

#[cfg(target_arch = "wasm32")]
pub struct ListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

#[cfg(target_arch = "wasm32")]
impl ListenerGuard {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        Self::register(target, event, handler, true)
    }

    /// Non-passive registration, so the handler may call `prevent_default`
    pub fn new_active(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        Self::register(target, event, handler, false)
    }

    fn register(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
        passive: bool,
    ) -> Result<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| ShmoobiumError::Dom(js_err(e)))?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listen on `window` for the lifetime of the component
#[cfg(target_arch = "wasm32")]
pub fn use_window_listener(event: &'static str, handler: impl FnMut(Event) + 'static) {
    use_hook(move || {
        let guard = web_sys::window().and_then(|window| {
            ListenerGuard::new(&window, event, handler)
                .map_err(|e| tracing::warn!(event = event, error = %e, "Failed to add window listener"))
                .ok()
        });
        Rc::new(guard)
    });
}

/// Listen on `document` for the lifetime of the component
#[cfg(target_arch = "wasm32")]
pub fn use_document_listener(event: &'static str, handler: impl FnMut(Event) + 'static) {
    use_hook(move || {
        let guard = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| {
                ListenerGuard::new(&document, event, handler)
                    .map_err(|e| tracing::warn!(event = event, error = %e, "Failed to add document listener"))
                    .ok()
            });
        Rc::new(guard)
    });
}
