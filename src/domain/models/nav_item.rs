use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Click handler attached to a nav item; compared by identity so items stay `PartialEq`
#[derive(Clone)]
pub struct NavCallback(pub Rc<dyn Fn()>);

impl NavCallback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for NavCallback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NavCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NavCallback")
    }
}

/// A navbar entry. Dropdowns nest one level only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(skip)]
    pub on_click: Option<NavCallback>,
    /// Image URL rendered before the label
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub dropdown: Option<Vec<NavItem>>,
    #[serde(default)]
    pub hide_on_mobile: bool,
}

impl NavItem {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            ..Default::default()
        }
    }

    pub fn dropdown(label: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            dropdown: Some(children),
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(NavCallback::new(f));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden_on_mobile(mut self) -> Self {
        self.hide_on_mobile = true;
        self
    }

    /// Children of a non-empty dropdown
    pub fn children(&self) -> Option<&[NavItem]> {
        self.dropdown
            .as_deref()
            .filter(|children| !children.is_empty())
    }

    pub fn has_dropdown(&self) -> bool {
        self.children().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_empty_dropdown_is_not_a_dropdown() {
        let item = NavItem::dropdown("Empty", vec![]);
        assert!(!item.has_dropdown());
        let item = NavItem::dropdown("More", vec![NavItem::link("A", "a.html")]);
        assert!(item.has_dropdown());
    }

    #[test]
    fn test_callback_identity() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let item = NavItem::link("Home", "index.html").with_on_click(move || counter.set(counter.get() + 1));
        let copy = item.clone();
        assert_eq!(item, copy);
        copy.on_click.as_ref().unwrap().call();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let raw = r#"{"label":"Blog","href":"/blog","hideOnMobile":true}"#;
        let item: NavItem = serde_json::from_str(raw).unwrap();
        assert!(item.hide_on_mobile);
        assert_eq!(item.href.as_deref(), Some("/blog"));
        assert!(!item.disabled);
    }
}
