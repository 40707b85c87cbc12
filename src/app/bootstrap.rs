//! Data-attribute auto-initialization.
//!
//! Host pages mark elements with `data-shmoobium="navbar"` or
//! `data-shmoobium="sticker-container"`. Each marked element is read once
//! (configuration from its `data-*` attributes, items and stickers from its
//! children), emptied, and used as the root of a Dioxus app.

use crate::domain::models::{NavItem, StickerCatalogEntry};

/// A `[data-nav-item]` element as found in host markup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkupNavItem {
    pub label: String,
    pub href: Option<String>,
    /// `data-icon`
    pub icon: Option<String>,
    /// `[data-dropdown-item]` children when `data-dropdown="true"`
    pub dropdown: Option<Vec<MarkupNavItem>>,
}

impl MarkupNavItem {
    pub fn into_nav_item(self) -> NavItem {
        let item = match self.dropdown {
            Some(children) if !children.is_empty() => {
                let label = if self.label.is_empty() {
                    "Dropdown".to_string()
                } else {
                    self.label
                };
                NavItem::dropdown(label, children.into_iter().map(Self::into_nav_item).collect())
            }
            _ => NavItem::link(self.label, self.href.unwrap_or_else(|| "#".to_string())),
        };
        match self.icon {
            Some(icon) if !icon.is_empty() => item.with_icon(icon),
            _ => item,
        }
    }
}

/// A `[data-sticker]` image as found in host markup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkupSticker {
    pub alt: Option<String>,
    pub src: String,
    /// `data-enabled`
    pub enabled: Option<String>,
}

/// Catalog entries in document order; ids are 1-based positions
pub fn sticker_catalog(images: impl IntoIterator<Item = MarkupSticker>) -> Vec<StickerCatalogEntry> {
    images
        .into_iter()
        .enumerate()
        .map(|(index, image)| {
            let number = index + 1;
            let name = image
                .alt
                .filter(|alt| !alt.trim().is_empty())
                .unwrap_or_else(|| format!("Sticker {}", number));
            let mut entry = StickerCatalogEntry::new(number.to_string(), name, image.src);
            entry.enabled = image.enabled.as_deref() == Some("true");
            entry
        })
        .collect()
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use dom::{
    bind_open_triggers, initialize_components, initialize_within, load_declared_navbars,
    load_navbar_into_page, DocumentHost, InitializedComponents,
};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod dom {
    use std::str::FromStr;

    use dioxus::prelude::*;
    use serde_json::Value;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Node};

    use super::{sticker_catalog, MarkupNavItem, MarkupSticker};
    use crate::app::components::sticker_box::{popup_channel, StickerBoxHandle};
    use crate::app::components::{StickerBox, StickerBoxProps};
    use crate::app::layouts::{Navbar, NavbarProps};
    use crate::config::{NavbarConfig, NavbarSettings, StickerSettings};
    use crate::shared::constants::{
        INITIALIZED_ATTRIBUTE, MARKER_ATTRIBUTE, NAVBAR_SRC_ATTRIBUTE, NAVBAR_TARGET_ATTRIBUTE,
        OPEN_TRIGGER_ATTRIBUTE,
    };
    use crate::shared::errors::{js_err, Result, ShmoobiumError};
    use crate::shared::logging::log_component_initialized;
    use crate::shared::services::{load_navbar, FragmentHost, FragmentRequest, GlooFetcher};
    use crate::shared::utils::{parse_data_attributes, ComponentKind};

    /// What one initialization pass mounted
    #[derive(Debug, Clone, Default)]
    pub struct InitializedComponents {
        pub navbars: usize,
        /// One per mounted sticker container, in document order
        pub sticker_boxes: Vec<StickerBoxHandle>,
    }

    impl InitializedComponents {
        pub fn count(&self) -> usize {
            self.navbars + self.sticker_boxes.len()
        }

        /// The first sticker box, which pages with a single board open from their own buttons
        pub fn sticker_box(&self) -> Option<&StickerBoxHandle> {
            self.sticker_boxes.first()
        }
    }

    /// Mount every uninitialized marker element in the document
    pub fn initialize_components() -> Result<InitializedComponents> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ShmoobiumError::Dom("no document".to_string()))?;
        let root = document
            .document_element()
            .ok_or_else(|| ShmoobiumError::Dom("no document element".to_string()))?;
        initialize_within(&root)
    }

    /// Mount every uninitialized marker element below `root`
    pub fn initialize_within(root: &Element) -> Result<InitializedComponents> {
        let mut initialized = InitializedComponents::default();

        for element in query_all(root, &format!("[{}]", MARKER_ATTRIBUTE))? {
            if element.has_attribute(INITIALIZED_ATTRIBUTE) {
                continue;
            }
            let Some(kind) = element
                .get_attribute(MARKER_ATTRIBUTE)
                .and_then(|value| ComponentKind::from_str(&value).ok())
            else {
                tracing::debug!("Skipping unknown component marker");
                continue;
            };

            match kind {
                ComponentKind::Navbar => {
                    mount_navbar(&element)?;
                    initialized.navbars += 1;
                }
                ComponentKind::StickerContainer => {
                    initialized.sticker_boxes.push(mount_sticker_container(&element)?);
                }
            }
        }

        Ok(initialized)
    }

    /// Wire `[data-shmoobium-open]` elements to open the given sticker box.
    ///
    /// Triggers live as long as the page, so their listeners are never removed.
    pub fn bind_open_triggers(handle: &StickerBoxHandle) -> usize {
        use wasm_bindgen::closure::Closure;

        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return 0;
        };
        let Ok(triggers) = query_all(&root, &format!("[{}]", OPEN_TRIGGER_ATTRIBUTE)) else {
            return 0;
        };

        for trigger in &triggers {
            let handle = handle.clone();
            let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                handle.open_popup();
            }) as Box<dyn FnMut(_)>);
            if let Err(e) =
                trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                tracing::warn!(error = %js_err(e), "Failed to bind sticker box trigger");
            }
            on_click.forget();
        }
        triggers.len()
    }

    /// Fetch a navbar fragment into `selector` and mount the markers it contains
    pub async fn load_navbar_into_page(src: &str, selector: &str) -> Result<usize> {
        load_navbar(&GlooFetcher, &DocumentHost, src, selector).await
    }

    /// Start loading every `[data-shmoobium-navbar-src]` fragment, returning how many were requested
    pub fn load_declared_navbars() -> usize {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return 0;
        };
        let Ok(elements) = query_all(&root, &format!("[{}]", NAVBAR_SRC_ATTRIBUTE)) else {
            return 0;
        };

        let requests: Vec<FragmentRequest> = elements
            .iter()
            .filter_map(|element| {
                FragmentRequest::from_attributes(
                    element.get_attribute(NAVBAR_SRC_ATTRIBUTE),
                    element.get_attribute(NAVBAR_TARGET_ATTRIBUTE),
                )
            })
            .collect();
        for request in requests.iter().cloned() {
            wasm_bindgen_futures::spawn_local(async move {
                // Failures are logged by the loader
                let _ = load_navbar_into_page(&request.src, &request.selector).await;
            });
        }
        requests.len()
    }

    /// The live page as a fragment target
    #[derive(Debug, Clone, Copy, Default)]
    pub struct DocumentHost;

    impl DocumentHost {
        fn target(&self, selector: &str) -> Option<Element> {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(selector).ok().flatten())
        }
    }

    impl FragmentHost for DocumentHost {
        fn has_target(&self, selector: &str) -> bool {
            self.target(selector).is_some()
        }

        fn inject(&self, selector: &str, html: &str) -> Result<()> {
            let target = self
                .target(selector)
                .ok_or_else(|| ShmoobiumError::TargetNotFound(selector.to_string()))?;
            target.set_inner_html(html);
            Ok(())
        }

        fn initialize_markers(&self, selector: &str) -> Result<usize> {
            let target = self
                .target(selector)
                .ok_or_else(|| ShmoobiumError::TargetNotFound(selector.to_string()))?;
            Ok(initialize_within(&target)?.count())
        }
    }

    fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>> {
        let nodes = root
            .query_selector_all(selector)
            .map_err(|e| ShmoobiumError::Dom(js_err(e)))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attributes(element: &Element) -> Vec<(String, String)> {
        let attributes = element.attributes();
        (0..attributes.length())
            .filter_map(|i| attributes.item(i))
            .map(|attr| (attr.name(), attr.value()))
            .collect()
    }

    fn config_of(element: &Element, kind: ComponentKind) -> Value {
        Value::Object(parse_data_attributes(attributes(element), kind))
    }

    fn trimmed_text(node: &Node) -> String {
        node.text_content().unwrap_or_default().trim().to_string()
    }

    fn read_nav_item(element: &Element) -> Result<MarkupNavItem> {
        let icon = element.get_attribute("data-icon");

        if element.get_attribute("data-dropdown").as_deref() != Some("true") {
            return Ok(MarkupNavItem {
                label: trimmed_text(element),
                href: element.get_attribute("href"),
                icon,
                dropdown: None,
            });
        }

        let children = query_all(element, "[data-dropdown-item]")?
            .iter()
            .map(|child| MarkupNavItem {
                label: trimmed_text(child),
                href: child.get_attribute("href"),
                icon: child.get_attribute("data-icon"),
                dropdown: None,
            })
            .collect();

        // The parent label is its leading text node, before the child links
        let label = element
            .first_child()
            .filter(|node| node.node_type() == Node::TEXT_NODE)
            .map(|node| trimmed_text(&node))
            .unwrap_or_default();

        Ok(MarkupNavItem {
            label,
            href: None,
            icon,
            dropdown: Some(children),
        })
    }

    fn read_sticker(element: &Element) -> MarkupSticker {
        MarkupSticker {
            alt: element.get_attribute("alt"),
            src: element.get_attribute("src").unwrap_or_default(),
            enabled: element.get_attribute("data-enabled"),
        }
    }

    fn launch(root: Element, vdom: VirtualDom) {
        let cfg = dioxus::web::Config::new().rootelement(root);
        wasm_bindgen_futures::spawn_local(async move {
            dioxus::web::run(vdom, cfg).await;
        });
    }

    fn mount_navbar(element: &Element) -> Result<()> {
        let config = NavbarConfig::from_overrides(&config_of(element, ComponentKind::Navbar));
        let items: Vec<_> = query_all(element, "[data-nav-item]")?
            .iter()
            .map(read_nav_item)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(MarkupNavItem::into_nav_item)
            .collect();
        let item_count = items.len();

        element.set_inner_html("");
        element
            .set_attribute(INITIALIZED_ATTRIBUTE, "true")
            .map_err(|e| ShmoobiumError::Dom(js_err(e)))?;

        let props = NavbarProps::builder()
            .config(config)
            .items(items)
            .settings(NavbarSettings::default())
            .build();
        launch(element.clone(), VirtualDom::new_with_props(Navbar, props));

        log_component_initialized(ComponentKind::Navbar.as_str(), item_count);
        Ok(())
    }

    fn mount_sticker_container(element: &Element) -> Result<StickerBoxHandle> {
        let settings =
            StickerSettings::from_overrides(&config_of(element, ComponentKind::StickerContainer));
        let stickers =
            sticker_catalog(query_all(element, "[data-sticker]")?.iter().map(read_sticker));
        let sticker_count = stickers.len();

        element.set_inner_html("");
        element
            .set_attribute(INITIALIZED_ATTRIBUTE, "true")
            .map_err(|e| ShmoobiumError::Dom(js_err(e)))?;

        let (handle, commands) = popup_channel();
        let props = StickerBoxProps::builder()
            .stickers(stickers)
            .settings(settings)
            .class("sticker-box".to_string())
            .commands(commands)
            .build();
        launch(element.clone(), VirtualDom::new_with_props(StickerBox, props));

        log_component_initialized(ComponentKind::StickerContainer.as_str(), sticker_count);
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_link_item() {
        let item = MarkupNavItem {
            label: "About".to_string(),
            href: Some("about.html".to_string()),
            icon: Some("/icons/info.svg".to_string()),
            dropdown: None,
        }
        .into_nav_item();

        assert_eq!(item.label, "About");
        assert_eq!(item.href.as_deref(), Some("about.html"));
        assert_eq!(item.icon.as_deref(), Some("/icons/info.svg"));
        assert!(!item.has_dropdown());
    }

    #[test]
    fn test_link_without_href_is_placeholder() {
        let item = MarkupNavItem {
            label: "Soon".to_string(),
            ..Default::default()
        }
        .into_nav_item();
        assert_eq!(item.href.as_deref(), Some("#"));
    }

    #[test]
    fn test_dropdown_item_and_label_fallback() {
        let child = MarkupNavItem {
            label: "Docs".to_string(),
            href: Some("docs.html".to_string()),
            ..Default::default()
        };
        let item = MarkupNavItem {
            label: String::new(),
            dropdown: Some(vec![child]),
            ..Default::default()
        }
        .into_nav_item();

        assert_eq!(item.label, "Dropdown");
        assert!(item.has_dropdown());
        assert_eq!(item.children().map(|c| c[0].label.as_str()), Some("Docs"));
    }

    #[test]
    fn test_empty_dropdown_becomes_link() {
        let item = MarkupNavItem {
            label: "Menu".to_string(),
            dropdown: Some(Vec::new()),
            ..Default::default()
        }
        .into_nav_item();
        assert!(!item.has_dropdown());
    }

    #[test]
    fn test_sticker_catalog_ids_and_names() {
        let catalog = sticker_catalog(vec![
            MarkupSticker {
                alt: Some("Cat".to_string()),
                src: "/s/cat.png".to_string(),
                enabled: Some("true".to_string()),
            },
            MarkupSticker {
                alt: None,
                src: "/s/dog.png".to_string(),
                enabled: Some("yes".to_string()),
            },
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, "1");
        assert_eq!(catalog[0].name, "Cat");
        assert!(catalog[0].enabled);
        assert_eq!(catalog[1].id, "2");
        assert_eq!(catalog[1].name, "Sticker 2");
        assert!(!catalog[1].enabled);
    }
}
