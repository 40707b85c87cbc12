//! Navbar layout controller
//!
//! Decides between the desktop bar and the mobile menu from an estimate of
//! the items' width, and keeps the open/closed state of dropdowns. Only one
//! sub-menu can be open at a time: the state is a single `MenuState` value.

use crate::config::{FitMetrics, NavbarPosition};
use crate::domain::models::{NavCallback, NavItem};
use crate::shared::logging::log_navbar_mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    DesktopClosed,
    DesktopDropdownOpen(usize),
    MobileClosed,
    MobileMenuOpen,
    MobileSubmenuOpen(usize),
}

impl MenuState {
    pub fn is_mobile(&self) -> bool {
        matches!(
            self,
            MenuState::MobileClosed | MenuState::MobileMenuOpen | MenuState::MobileSubmenuOpen(_)
        )
    }

    /// Desktop dropdown currently open
    pub fn open_dropdown(&self) -> Option<usize> {
        match self {
            MenuState::DesktopDropdownOpen(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        matches!(self, MenuState::MobileMenuOpen | MenuState::MobileSubmenuOpen(_))
    }

    /// Mobile sub-menu currently expanded
    pub fn open_mobile_dropdown(&self) -> Option<usize> {
        match self {
            MenuState::MobileSubmenuOpen(index) => Some(*index),
            _ => None,
        }
    }

    /// Closed state of the same family
    pub fn closed(&self) -> MenuState {
        if self.is_mobile() {
            MenuState::MobileClosed
        } else {
            MenuState::DesktopClosed
        }
    }
}

/// Sizes read from the DOM
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavbarMeasurements {
    pub viewport_width: f64,
    pub navbar_width: f64,
    /// Rendered width of the logo block
    pub icon_width: f64,
}

/// What a click on an item should do once the layout has been updated
#[derive(Debug, Clone, PartialEq)]
pub enum ItemAction {
    /// Disabled item, or nothing to do
    Ignored,
    /// A dropdown parent was opened or closed
    ToggledDropdown,
    /// Run the item's own handler instead of navigating
    Invoke(NavCallback),
    /// Let the link navigate
    Follow(String),
}

pub struct NavbarLayout {
    position: NavbarPosition,
    metrics: FitMetrics,
    items: Vec<NavItem>,
    state: MenuState,
    viewport_width: f64,
    mobile_menu_width: f64,
    /// Sizes from the latest fit check
    measured: Option<NavbarMeasurements>,
}

impl NavbarLayout {
    pub fn new(position: NavbarPosition, items: Vec<NavItem>, metrics: FitMetrics) -> Self {
        let mut layout = Self {
            position,
            metrics,
            items,
            state: MenuState::DesktopClosed,
            viewport_width: f64::INFINITY,
            mobile_menu_width: 0.0,
            measured: None,
        };
        layout.mobile_menu_width = layout.compute_mobile_menu_width();
        layout
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn position(&self) -> NavbarPosition {
        self.position
    }

    pub fn metrics(&self) -> &FitMetrics {
        &self.metrics
    }

    pub fn is_mobile(&self) -> bool {
        self.state.is_mobile()
    }

    /// Replace the items; any open menu is closed since indices may have moved.
    /// The new items are fitted against the last known sizes.
    pub fn set_items(&mut self, items: Vec<NavItem>) {
        self.items = items;
        self.state = self.state.closed();
        self.mobile_menu_width = self.compute_mobile_menu_width();
        if let Some(measurements) = self.measured {
            self.resolve_mode(measurements);
        }
    }

    /// Left/right bars fall back to a top bar on narrow viewports
    pub fn effective_position(&self) -> NavbarPosition {
        if self.position.is_vertical() && self.is_narrow() {
            NavbarPosition::Top
        } else {
            self.position
        }
    }

    /// Estimated width of one item on the desktop bar
    pub fn estimate_item_width(&self, item: &NavItem) -> f64 {
        let m = &self.metrics;
        let mut width = item.label.chars().count() as f64 * m.char_width + m.item_padding;
        if item.icon.is_some() {
            width += m.icon_width + m.icon_gap;
        }
        if item.has_dropdown() {
            width += m.dropdown_arrow_width;
        }
        width
    }

    /// Estimated width of all items including the gaps between them
    pub fn required_width(&self) -> f64 {
        let items: f64 = self.items.iter().map(|i| self.estimate_item_width(i)).sum();
        let gaps = self.items.len().saturating_sub(1) as f64 * self.metrics.item_spacing;
        items + gaps
    }

    /// Whether the items fit on the bar. Vertical bars never reflow, so they always fit.
    pub fn fit_check(&self, navbar_width: f64, icon_width: f64) -> bool {
        if self.position.is_vertical() {
            return true;
        }
        let m = &self.metrics;
        let available = navbar_width - icon_width - m.reserved_space + m.overflow_tolerance;
        self.required_width() <= available
    }

    /// Recompute desktop/mobile mode from fresh measurements, returning whether it is mobile
    pub fn resolve_mode(&mut self, measurements: NavbarMeasurements) -> bool {
        self.measured = Some(measurements);
        self.viewport_width = measurements.viewport_width;
        self.mobile_menu_width = self.compute_mobile_menu_width();

        let mobile = (self.is_narrow() && self.position.is_vertical())
            || !self.fit_check(measurements.navbar_width, measurements.icon_width);

        if mobile != self.state.is_mobile() {
            self.state = if mobile {
                MenuState::MobileClosed
            } else {
                MenuState::DesktopClosed
            };
            log_navbar_mode(mobile, measurements.navbar_width, measurements.viewport_width);
        }
        mobile
    }

    /// Open or close a desktop dropdown; opening one closes any other
    pub fn toggle_dropdown(&mut self, index: usize) {
        if self.state.is_mobile() || !self.has_dropdown_at(index) {
            return;
        }
        self.state = match self.state {
            MenuState::DesktopDropdownOpen(open) if open == index => MenuState::DesktopClosed,
            _ => MenuState::DesktopDropdownOpen(index),
        };
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.state = match self.state {
            MenuState::MobileClosed => MenuState::MobileMenuOpen,
            MenuState::MobileMenuOpen | MenuState::MobileSubmenuOpen(_) => MenuState::MobileClosed,
            desktop => desktop,
        };
    }

    /// Expand or collapse a sub-menu inside the open mobile menu
    pub fn toggle_mobile_dropdown(&mut self, index: usize) {
        if !self.state.is_mobile_menu_open() || !self.has_dropdown_at(index) {
            return;
        }
        self.state = match self.state {
            MenuState::MobileSubmenuOpen(open) if open == index => MenuState::MobileMenuOpen,
            _ => MenuState::MobileSubmenuOpen(index),
        };
    }

    /// Pointer-down or scroll outside the menus
    pub fn close_on_outside_interaction(&mut self) {
        self.state = self.state.closed();
    }

    /// Click on item `index`, or on child `sub_index` of its dropdown
    pub fn activate_item(&mut self, index: usize, sub_index: Option<usize>) -> ItemAction {
        let Some(item) = self.item_at(index, sub_index) else {
            return ItemAction::Ignored;
        };

        if item.disabled {
            return ItemAction::Ignored;
        }

        if sub_index.is_none() && item.has_dropdown() {
            if self.state.is_mobile() {
                self.toggle_mobile_dropdown(index);
            } else {
                self.toggle_dropdown(index);
            }
            return ItemAction::ToggledDropdown;
        }

        let action = match (&item.on_click, &item.href) {
            (Some(callback), _) => ItemAction::Invoke(callback.clone()),
            (None, Some(href)) => ItemAction::Follow(href.clone()),
            (None, None) => ItemAction::Ignored,
        };
        // Navigation always ends with every menu closed
        self.state = self.state.closed();
        action
    }

    /// Item `index`, or its dropdown child `sub_index`
    pub fn item_at(&self, index: usize, sub_index: Option<usize>) -> Option<&NavItem> {
        let parent = self.items.get(index)?;
        match sub_index {
            Some(sub) => parent.children()?.get(sub),
            None => Some(parent),
        }
    }

    /// Items shown in the current mode, with their original indices
    pub fn visible_items(&self) -> Vec<(usize, &NavItem)> {
        let mobile = self.state.is_mobile();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !(mobile && item.hide_on_mobile))
            .collect()
    }

    pub fn mobile_menu_width(&self) -> f64 {
        self.mobile_menu_width
    }

    fn compute_mobile_menu_width(&self) -> f64 {
        let m = &self.metrics;
        let mobile_items = self.items.iter().filter(|i| !i.hide_on_mobile);

        let mut longest = 0usize;
        let mut any_icon = false;
        for item in mobile_items {
            let children = item.children().unwrap_or_default();
            for entry in std::iter::once(item).chain(children.iter()) {
                longest = longest.max(entry.label.chars().count());
                any_icon |= entry.icon.is_some();
            }
        }

        let mut width = longest as f64 * m.char_width + m.mobile_menu_allowance;
        if any_icon {
            width += m.icon_width + m.icon_gap;
        }
        width.clamp(m.mobile_menu_min_width, m.mobile_menu_max_width)
    }

    fn has_dropdown_at(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(NavItem::has_dropdown)
    }

    fn is_narrow(&self) -> bool {
        self.viewport_width <= self.metrics.mobile_breakpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn docs(count: usize) -> Vec<NavItem> {
        (0..count)
            .map(|i| NavItem::link("Documentation", format!("docs{}.html", i)))
            .collect()
    }

    fn with_dropdowns() -> Vec<NavItem> {
        vec![
            NavItem::dropdown("One", vec![NavItem::link("A", "a.html")]),
            NavItem::link("Two", "two.html"),
            NavItem::dropdown("Three", vec![NavItem::link("B", "b.html")]),
        ]
    }

    fn desktop(width: f64) -> NavbarMeasurements {
        NavbarMeasurements {
            viewport_width: 1024.0,
            navbar_width: width,
            icon_width: 40.0,
        }
    }

    #[test]
    fn test_item_width_cost_model() {
        let layout = NavbarLayout::new(NavbarPosition::Top, vec![], FitMetrics::default());
        assert_eq!(layout.estimate_item_width(&NavItem::link("Home", "/")), 64.0);
        let fancy = NavItem::dropdown("Home", vec![NavItem::link("A", "a")]).with_icon("/i.png");
        assert_eq!(layout.estimate_item_width(&fancy), 64.0 + 30.0 + 16.0);
    }

    #[test]
    fn test_overflow_resolves_to_mobile_and_back() {
        // Available: 400 - 40 - 70 + 50 = 340; three items need 3 * 136 + 2 * 8 = 424
        let mut layout = NavbarLayout::new(NavbarPosition::Top, docs(3), FitMetrics::default());
        assert!(!layout.fit_check(400.0, 40.0));
        assert!(layout.resolve_mode(desktop(400.0)));
        assert_eq!(layout.state(), MenuState::MobileClosed);

        layout.set_items(docs(2));
        assert_eq!(layout.required_width(), 280.0);
        assert!(!layout.resolve_mode(desktop(400.0)));
        assert_eq!(layout.state(), MenuState::DesktopClosed);
    }

    #[test]
    fn test_new_items_are_fitted_immediately() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, docs(2), FitMetrics::default());
        assert!(!layout.resolve_mode(desktop(400.0)));

        layout.set_items(docs(3));
        assert_eq!(layout.state(), MenuState::MobileClosed);
        layout.set_items(docs(1));
        assert_eq!(layout.state(), MenuState::DesktopClosed);
    }

    #[test]
    fn test_items_before_first_measure_stay_desktop() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, docs(1), FitMetrics::default());
        layout.set_items(docs(10));
        assert_eq!(layout.state(), MenuState::DesktopClosed);
    }

    #[test]
    fn test_fit_boundary_is_inclusive() {
        let layout = NavbarLayout::new(NavbarPosition::Top, docs(1), FitMetrics::default());
        // 136 required; available = width - 40 - 70 + 50
        assert!(layout.fit_check(196.0, 40.0));
        assert!(!layout.fit_check(195.0, 40.0));
    }

    #[test]
    fn test_vertical_bars_always_fit() {
        let mut layout = NavbarLayout::new(NavbarPosition::Left, docs(10), FitMetrics::default());
        assert!(layout.fit_check(100.0, 40.0));
        assert!(!layout.resolve_mode(desktop(100.0)));
        assert_eq!(layout.effective_position(), NavbarPosition::Left);
    }

    #[test]
    fn test_narrow_vertical_bar_is_mobile_on_top() {
        let mut layout = NavbarLayout::new(NavbarPosition::Right, docs(1), FitMetrics::default());
        let narrow = NavbarMeasurements {
            viewport_width: 768.0,
            navbar_width: 768.0,
            icon_width: 40.0,
        };
        assert!(layout.resolve_mode(narrow));
        assert_eq!(layout.effective_position(), NavbarPosition::Top);
    }

    #[test]
    fn test_narrow_horizontal_bar_that_fits_stays_desktop() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, docs(1), FitMetrics::default());
        let narrow = NavbarMeasurements {
            viewport_width: 500.0,
            navbar_width: 500.0,
            icon_width: 40.0,
        };
        assert!(!layout.resolve_mode(narrow));
    }

    #[test]
    fn test_single_open_dropdown() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, with_dropdowns(), FitMetrics::default());
        layout.resolve_mode(desktop(2000.0));

        layout.toggle_dropdown(0);
        assert_eq!(layout.state().open_dropdown(), Some(0));
        layout.toggle_dropdown(2);
        assert_eq!(layout.state().open_dropdown(), Some(2));
        layout.toggle_dropdown(2);
        assert_eq!(layout.state().open_dropdown(), None);

        // Index 1 has no dropdown, 7 does not exist
        layout.toggle_dropdown(0);
        layout.toggle_dropdown(1);
        layout.toggle_dropdown(7);
        assert_eq!(layout.state().open_dropdown(), Some(0));
    }

    #[test]
    fn test_repeated_toggles_keep_one_open() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, with_dropdowns(), FitMetrics::default());
        for step in 0..30 {
            layout.toggle_dropdown(if step % 3 == 0 { 0 } else { 2 });
            let open = layout.state().open_dropdown();
            assert!(open.is_none() || open == Some(0) || open == Some(2));
        }
    }

    #[test]
    fn test_mobile_menu_and_submenus() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, with_dropdowns(), FitMetrics::default());
        layout.resolve_mode(desktop(100.0));
        assert!(layout.is_mobile());

        // Sub-menus need the menu open
        layout.toggle_mobile_dropdown(0);
        assert_eq!(layout.state(), MenuState::MobileClosed);

        layout.toggle_mobile_menu();
        assert_eq!(layout.state(), MenuState::MobileMenuOpen);
        layout.toggle_mobile_dropdown(0);
        layout.toggle_mobile_dropdown(2);
        assert_eq!(layout.state(), MenuState::MobileSubmenuOpen(2));
        layout.toggle_mobile_dropdown(2);
        assert_eq!(layout.state(), MenuState::MobileMenuOpen);

        // Desktop dropdowns are inert in mobile mode
        layout.toggle_dropdown(0);
        assert_eq!(layout.state(), MenuState::MobileMenuOpen);

        layout.toggle_mobile_menu();
        assert_eq!(layout.state(), MenuState::MobileClosed);
    }

    #[test]
    fn test_mode_change_clears_open_menus() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, with_dropdowns(), FitMetrics::default());
        layout.resolve_mode(desktop(2000.0));
        layout.toggle_dropdown(0);
        layout.resolve_mode(desktop(100.0));
        assert_eq!(layout.state(), MenuState::MobileClosed);

        layout.toggle_mobile_menu();
        layout.toggle_mobile_dropdown(2);
        layout.resolve_mode(desktop(2000.0));
        assert_eq!(layout.state(), MenuState::DesktopClosed);
    }

    #[test]
    fn test_outside_interaction_closes() {
        let mut layout = NavbarLayout::new(NavbarPosition::Top, with_dropdowns(), FitMetrics::default());
        layout.toggle_dropdown(2);
        layout.close_on_outside_interaction();
        assert_eq!(layout.state(), MenuState::DesktopClosed);

        layout.resolve_mode(desktop(100.0));
        layout.toggle_mobile_menu();
        layout.toggle_mobile_dropdown(0);
        layout.close_on_outside_interaction();
        assert_eq!(layout.state(), MenuState::MobileClosed);
    }

    #[test]
    fn test_activate_item() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let items = vec![
            NavItem::dropdown("More", vec![NavItem::link("A", "a.html"), NavItem::link("B", "b.html").disabled()]),
            NavItem::link("Blog", "blog.html"),
            NavItem::link("Action", "#").with_on_click(move || counter.set(counter.get() + 1)),
            NavItem::link("Off", "off.html").disabled(),
        ];
        let mut layout = NavbarLayout::new(NavbarPosition::Top, items, FitMetrics::default());

        assert_eq!(layout.activate_item(0, None), ItemAction::ToggledDropdown);
        assert_eq!(layout.state().open_dropdown(), Some(0));
        assert_eq!(layout.activate_item(0, Some(1)), ItemAction::Ignored);
        assert_eq!(layout.state().open_dropdown(), Some(0));
        assert_eq!(layout.activate_item(0, Some(0)), ItemAction::Follow("a.html".to_string()));
        assert_eq!(layout.state(), MenuState::DesktopClosed);

        assert_eq!(layout.activate_item(1, None), ItemAction::Follow("blog.html".to_string()));
        assert_eq!(layout.activate_item(3, None), ItemAction::Ignored);
        assert_eq!(layout.activate_item(9, None), ItemAction::Ignored);

        match layout.activate_item(2, None) {
            ItemAction::Invoke(callback) => callback.call(),
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_hide_on_mobile() {
        let items = vec![NavItem::link("Home", "/"), NavItem::link("Desktop only", "/d").hidden_on_mobile()];
        let mut layout = NavbarLayout::new(NavbarPosition::Top, items, FitMetrics::default());
        layout.resolve_mode(desktop(2000.0));
        assert_eq!(layout.visible_items().len(), 2);
        layout.resolve_mode(desktop(50.0));
        let visible = layout.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].0, 0);
    }

    #[test]
    fn test_mobile_menu_width_clamped() {
        let short = NavbarLayout::new(NavbarPosition::Top, vec![NavItem::link("Hi", "/")], FitMetrics::default());
        assert_eq!(short.mobile_menu_width(), 200.0);

        let long_label = "A label that is far too long for a menu";
        let long = NavbarLayout::new(NavbarPosition::Top, vec![NavItem::link(long_label, "/")], FitMetrics::default());
        assert_eq!(long.mobile_menu_width(), 320.0);

        // 20 chars * 8 + 48 + icon 30
        let medium = NavbarLayout::new(
            NavbarPosition::Top,
            vec![NavItem::dropdown("Menu", vec![NavItem::link("Twenty characters!!!", "/x").with_icon("/i.png")])],
            FitMetrics::default(),
        );
        assert_eq!(medium.mobile_menu_width(), 238.0);
    }
}
