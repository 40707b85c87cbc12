use dioxus::prelude::*;

use crate::config::{NavbarConfig, NavbarSettings};
use crate::domain::models::NavItem;
use crate::domain::services::{is_active, CurrentLocation, ItemAction, MenuState, NavbarLayout};
use crate::shared::constants::{DEFAULT_LOGO_SRC, VERSION};
use crate::shared::hooks::{use_navbar_layout, UseNavbarLayout};
use crate::shared::utils::{cn, conditional_class, when};

fn current_location() -> CurrentLocation {
    #[cfg(target_arch = "wasm32")]
    {
        CurrentLocation::from_window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        CurrentLocation::default()
    }
}

/// The clicked item when the host should hear about it: enabled leaves that
/// navigate or run their own handler
fn host_notified_item(
    layout: &NavbarLayout,
    action: &ItemAction,
    index: usize,
    sub_index: Option<usize>,
) -> Option<NavItem> {
    match action {
        ItemAction::Follow(_) | ItemAction::Invoke(_) => layout.item_at(index, sub_index).cloned(),
        ItemAction::Ignored | ItemAction::ToggledDropdown => None,
    }
}

/// Click on item `index` (or its child `sub_index`); the browser only follows
/// links the layout says to follow
fn handle_item_click(
    mut layout: UseNavbarLayout,
    on_item_click: Option<EventHandler<NavItem>>,
    evt: MouseEvent,
    index: usize,
    sub_index: Option<usize>,
) {
    let action = layout.activate(index, sub_index);
    if let Some(handler) = on_item_click {
        let item = host_notified_item(&layout.layout.peek(), &action, index, sub_index);
        if let Some(item) = item {
            handler.call(item);
        }
    }
    if !matches!(action, ItemAction::Follow(_)) {
        evt.prevent_default();
    }
}

#[component]
pub fn Navbar(
    #[props(default)] config: NavbarConfig,
    items: Vec<NavItem>,
    #[props(default)] settings: NavbarSettings,
    on_icon_click: Option<EventHandler<MouseEvent>>,
    on_item_click: Option<EventHandler<NavItem>>,
) -> Element {
    let mut layout = use_navbar_layout(config.position, items, config.fit.clone());
    let location = use_hook(current_location);

    let state = layout.layout.read();
    let position = state.effective_position();
    let alignment = config.alignment.effective(position);
    let menu = state.state();

    let nav_class = cn([
        Some("navbar"),
        Some(format!("navbar--{}", position.as_str()).as_str()),
        Some(format!("navbar--{}", config.style.as_str()).as_str()),
        when(menu.is_mobile(), "navbar--mobile"),
        config.class_name.as_deref(),
    ]);
    let nav_style = config.inline_style(&settings);
    let mobile_menu_width = state.mobile_menu_width();

    rsx! {
        nav {
            class: "{nav_class}",
            style: "{nav_style}",
            onmounted: move |evt| layout.on_mounted(evt),
            div { class: "navbar__container",
                div { class: "navbar__brand",
                    Brand { config: config.clone(), on_icon_click }
                    if config.shows_version(&settings) {
                        span { class: "navbar__version", "v{VERSION}" }
                    }
                }

                if menu.is_mobile() {
                    button {
                        class: cn([Some("navbar__mobile-toggle"), when(menu.is_mobile_menu_open(), "navbar__mobile-toggle--open")]),
                        r#type: "button",
                        "aria-expanded": menu.is_mobile_menu_open(),
                        "aria-label": "Toggle navigation",
                        onclick: move |_| layout.toggle_mobile_menu(),
                        span { class: "navbar__mobile-toggle-bar" }
                        span { class: "navbar__mobile-toggle-bar" }
                        span { class: "navbar__mobile-toggle-bar" }
                    }
                } else {
                    div { class: "navbar__items navbar__items--{alignment.as_str()}",
                        for (index, item) in state.visible_items().into_iter().map(|(i, item)| (i, item.clone())) {
                            NavEntry {
                                key: "{index}",
                                layout,
                                item,
                                index,
                                open: menu.open_dropdown() == Some(index),
                                current: location.clone(),
                                item_class: config.item_class_name.clone(),
                                on_item_click,
                            }
                        }
                    }
                }
            }

            if menu.is_mobile_menu_open() {
                div {
                    class: "navbar__mobile-menu navbar__mobile-menu--{config.slideover.as_str()}",
                    style: "width: {mobile_menu_width}px;",
                    for (index, item) in state.visible_items().into_iter().map(|(i, item)| (i, item.clone())) {
                        NavEntry {
                            key: "{index}",
                            layout,
                            item,
                            index,
                            open: matches!(menu, MenuState::MobileSubmenuOpen(open) if open == index),
                            current: location.clone(),
                            item_class: config.item_class_name.clone(),
                            on_item_click,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Brand(config: NavbarConfig, on_icon_click: Option<EventHandler<MouseEvent>>) -> Element {
    let src = config.icon_src.clone().unwrap_or_else(|| DEFAULT_LOGO_SRC.to_string());
    let alt = config.icon_alt.clone().unwrap_or_else(|| "Shmoobium".to_string());
    let href = config.icon_href.clone().unwrap_or_else(|| config.logo_href.clone());

    let failed_src = src.clone();

    let content = rsx! {
        img {
            src: "{src}",
            alt: "{alt}",
            // Broken icon falls back to the bundled logo once
            onerror: move |_| fallback_logo(&failed_src),
        }
        if let Some(text) = config.logo_text.as_ref() {
            span { class: "navbar__logo-text", "{text}" }
        }
    };

    if let Some(handler) = on_icon_click {
        return rsx! {
            button {
                class: cn([Some("navbar__icon-button"), config.icon_class_name.as_deref()]),
                r#type: "button",
                onclick: move |evt| handler.call(evt),
                {content}
            }
        };
    }

    if href.is_empty() {
        return rsx! {
            div { class: cn([Some("navbar__icon"), config.icon_class_name.as_deref()]), {content} }
        };
    }

    rsx! {
        a {
            class: cn([Some("navbar__icon-link"), config.icon_class_name.as_deref()]),
            href: "{href}",
            {content}
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn fallback_logo(failed_src: &str) {
    if failed_src == DEFAULT_LOGO_SRC {
        return;
    }
    let selector = format!("img[src=\"{}\"]", failed_src.replace('"', "\\\""));
    let image = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&selector).ok().flatten());
    if let Some(image) = image {
        let _ = image.set_attribute("src", DEFAULT_LOGO_SRC);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fallback_logo(_failed_src: &str) {}

#[component]
fn NavEntry(
    layout: UseNavbarLayout,
    item: NavItem,
    index: usize,
    open: bool,
    current: CurrentLocation,
    item_class: Option<String>,
    on_item_click: Option<EventHandler<NavItem>>,
) -> Element {
    let active = is_active(item.href.as_deref(), &current);

    if let Some(children) = item.children() {
        let parent_class = cn([
            Some("navbar__item navbar__item--dropdown"),
            when(item.disabled, "navbar__item--disabled"),
            when(open, "navbar__item--open"),
            item_class.as_deref(),
        ]);
        return rsx! {
            div { class: "navbar__dropdown-container",
                button {
                    class: "{parent_class}",
                    r#type: "button",
                    "aria-expanded": open,
                    onclick: move |evt| handle_item_click(layout, on_item_click, evt, index, None),
                    ItemContent { item: item.clone() }
                    span { class: "navbar__dropdown-arrow", "▼" }
                }
                if open {
                    div { class: "navbar__dropdown",
                        for (sub_index, child) in children.iter().cloned().enumerate() {
                            a {
                                key: "{sub_index}",
                                class: cn([
                                    Some("navbar__dropdown-item"),
                                    when(child.disabled, "navbar__dropdown-item--disabled"),
                                    when(is_active(child.href.as_deref(), &current), "navbar__dropdown-item--active"),
                                ]),
                                href: child.href.clone().unwrap_or_default(),
                                onclick: move |evt| handle_item_click(layout, on_item_click, evt, index, Some(sub_index)),
                                ItemContent { item: child.clone() }
                            }
                        }
                    }
                }
            }
        };
    }

    let class = cn([
        Some("navbar__item"),
        when(item.disabled, "navbar__item--disabled"),
        when(active, "navbar__item--active"),
        item_class.as_deref(),
    ]);

    rsx! {
        a {
            class: "{class}",
            href: item.href.clone().unwrap_or_default(),
            "aria-current": conditional_class(active, "page", Some("false")),
            onclick: move |evt| handle_item_click(layout, on_item_click, evt, index, None),
            ItemContent { item: item.clone() }
        }
    }
}

#[component]
fn ItemContent(item: NavItem) -> Element {
    rsx! {
        if let Some(icon) = item.icon.as_ref() {
            span { class: "navbar__item-icon",
                img { src: "{icon}", alt: "" }
            }
        }
        span { class: "navbar__item-label", "{item.label}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FitMetrics, NavbarPosition};

    fn layout() -> NavbarLayout {
        NavbarLayout::new(
            NavbarPosition::Top,
            vec![
                NavItem::link("Docs", "/docs"),
                NavItem::dropdown("More", vec![NavItem::link("Blog", "/blog"), NavItem::link("Old", "/old").disabled()]),
                NavItem::link("Off", "/off").disabled(),
                NavItem::link("Search", "/search").with_on_click(|| {}),
            ],
            FitMetrics::default(),
        )
    }

    fn clicked(index: usize, sub_index: Option<usize>) -> Option<String> {
        let mut layout = layout();
        let action = layout.activate_item(index, sub_index);
        host_notified_item(&layout, &action, index, sub_index).map(|item| item.label)
    }

    #[test]
    fn test_host_hears_followed_links() {
        assert_eq!(clicked(0, None), Some("Docs".to_string()));
        assert_eq!(clicked(1, Some(0)), Some("Blog".to_string()));
    }

    #[test]
    fn test_host_hears_invoked_items() {
        assert_eq!(clicked(3, None), Some("Search".to_string()));
    }

    #[test]
    fn test_host_skips_dropdown_parents_and_disabled_items() {
        assert_eq!(clicked(1, None), None);
        assert_eq!(clicked(1, Some(1)), None);
        assert_eq!(clicked(2, None), None);
        assert_eq!(clicked(9, None), None);
    }
}
