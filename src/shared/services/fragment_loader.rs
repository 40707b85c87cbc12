//! Remote navbar fragments
//!
//! A page can keep its navbar markup in one shared HTML file and pull it
//! in at runtime. The fragment is fetched, injected into a target
//! container and any marker elements inside it are initialized.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{Result, ShmoobiumError};
use crate::shared::logging::{log_fragment_error, log_fragment_loaded};

pub const DEFAULT_TARGET_SELECTOR: &str = "#navbar";

/// A fragment load declared in page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    pub src: String,
    pub selector: String,
}

impl FragmentRequest {
    /// Blank sources are skipped; a missing target means [`DEFAULT_TARGET_SELECTOR`]
    pub fn from_attributes(src: Option<String>, target: Option<String>) -> Option<Self> {
        let src = src.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        let selector = target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_SELECTOR.to_string());
        Some(Self { src, selector })
    }
}

/// Raw HTTP result of a fragment request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedFragment {
    pub status: u16,
    pub body: String,
}

impl FetchedFragment {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait FragmentFetcher {
    async fn fetch(&self, src: &str) -> Result<FetchedFragment>;
}

/// The document the fragment is injected into
pub trait FragmentHost {
    fn has_target(&self, selector: &str) -> bool;

    /// Replace the contents of the target
    fn inject(&self, selector: &str, html: &str) -> Result<()>;

    /// Initialize marker elements below the target, returning how many were mounted
    fn initialize_markers(&self, selector: &str) -> Result<usize>;
}

/// Fetch `src` and inject it into `selector`.
///
/// The target is untouched unless the request succeeded and the target exists.
pub async fn load_navbar(
    fetcher: &dyn FragmentFetcher,
    host: &dyn FragmentHost,
    src: &str,
    selector: &str,
) -> Result<usize> {
    let result = load_into(fetcher, host, src, selector).await;
    match &result {
        Ok(initialized) => log_fragment_loaded(src, selector, *initialized),
        Err(e) => log_fragment_error(src, &e.to_string()),
    }
    result
}

async fn load_into(
    fetcher: &dyn FragmentFetcher,
    host: &dyn FragmentHost,
    src: &str,
    selector: &str,
) -> Result<usize> {
    let fragment = fetcher.fetch(src).await?;
    if !fragment.ok() {
        return Err(ShmoobiumError::Http {
            status: fragment.status,
        });
    }

    if !host.has_target(selector) {
        return Err(ShmoobiumError::TargetNotFound(selector.to_string()));
    }

    host.inject(selector, &fragment.body)?;
    host.initialize_markers(selector)
}

/// `fetch()` through gloo-net
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooFetcher;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl FragmentFetcher for GlooFetcher {
    async fn fetch(&self, src: &str) -> Result<FetchedFragment> {
        let response = gloo_net::http::Request::get(src)
            .send()
            .await
            .map_err(|e| ShmoobiumError::Fetch(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShmoobiumError::Fetch(e.to_string()))?;
        Ok(FetchedFragment { status, body })
    }
}

/// Item of a generated navbar fragment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimpleNavItem {
    pub label: String,
    pub href: String,
    pub dropdown: Vec<SimpleNavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimpleNavbarConfig {
    pub items: Vec<SimpleNavItem>,
    pub logo_text: String,
    pub logo_href: String,
    pub background_color: String,
    pub font_color: String,
}

impl Default for SimpleNavbarConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            logo_text: "Shmoobium".to_string(),
            logo_href: "/".to_string(),
            background_color: "#141414".to_string(),
            font_color: "#ffffff".to_string(),
        }
    }
}

/// Render marker markup that the bootstrap turns into a navbar
pub fn create_simple_navbar(config: &SimpleNavbarConfig) -> String {
    let mut items = String::new();
    for item in &config.items {
        if item.dropdown.is_empty() {
            items.push_str(&format!(
                "<a href=\"{}\" data-nav-item>{}</a>",
                escape_html(&item.href),
                escape_html(&item.label)
            ));
            continue;
        }

        let children: String = item
            .dropdown
            .iter()
            .map(|child| {
                format!(
                    "<a href=\"{}\" data-dropdown-item>{}</a>",
                    escape_html(&child.href),
                    escape_html(&child.label)
                )
            })
            .collect();
        items.push_str(&format!(
            "<div data-nav-item data-dropdown=\"true\">{}{}</div>",
            escape_html(&item.label),
            children
        ));
    }

    let background = escape_html(&config.background_color);
    let color = escape_html(&config.font_color);
    format!(
        "<nav data-shmoobium=\"navbar\" data-background-color=\"{background}\" data-font-color=\"{color}\" data-logo-text=\"{}\" data-logo-href=\"{}\" style=\"background: {background}; color: {color};\">{items}</nav>",
        escape_html(&config.logo_text),
        escape_html(&config.logo_href),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct StaticFetcher {
        status: u16,
        body: &'static str,
    }

    #[async_trait(?Send)]
    impl FragmentFetcher for StaticFetcher {
        async fn fetch(&self, _src: &str) -> Result<FetchedFragment> {
            Ok(FetchedFragment {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait(?Send)]
    impl FragmentFetcher for FailingFetcher {
        async fn fetch(&self, _src: &str) -> Result<FetchedFragment> {
            Err(ShmoobiumError::Fetch("network down".to_string()))
        }
    }

    #[derive(Default)]
    struct FakeDocument {
        targets: RefCell<HashMap<String, String>>,
    }

    impl FakeDocument {
        fn with_target(selector: &str, html: &str) -> Self {
            let doc = Self::default();
            doc.targets
                .borrow_mut()
                .insert(selector.to_string(), html.to_string());
            doc
        }

        fn html(&self, selector: &str) -> Option<String> {
            self.targets.borrow().get(selector).cloned()
        }
    }

    impl FragmentHost for FakeDocument {
        fn has_target(&self, selector: &str) -> bool {
            self.targets.borrow().contains_key(selector)
        }

        fn inject(&self, selector: &str, html: &str) -> Result<()> {
            self.targets
                .borrow_mut()
                .insert(selector.to_string(), html.to_string());
            Ok(())
        }

        fn initialize_markers(&self, selector: &str) -> Result<usize> {
            Ok(self
                .html(selector)
                .map(|html| html.matches("data-shmoobium=").count())
                .unwrap_or(0))
        }
    }

    #[test]
    fn test_load_injects_and_initializes() {
        let fetcher = StaticFetcher {
            status: 200,
            body: "<nav data-shmoobium=\"navbar\"></nav>",
        };
        let doc = FakeDocument::with_target("#navbar", "old");
        let count = block_on(load_navbar(&fetcher, &doc, "/nav.html", "#navbar")).unwrap();
        assert_eq!(count, 1);
        assert!(doc.html("#navbar").unwrap().contains("data-shmoobium"));
    }

    #[test]
    fn test_http_error_leaves_target_untouched() {
        let fetcher = StaticFetcher {
            status: 404,
            body: "not found",
        };
        let doc = FakeDocument::with_target("#navbar", "old");
        let err = block_on(load_navbar(&fetcher, &doc, "/nav.html", "#navbar")).unwrap_err();
        assert!(matches!(err, ShmoobiumError::Http { status: 404 }));
        assert_eq!(err.to_string(), "Failed to load navbar: 404");
        assert_eq!(doc.html("#navbar").as_deref(), Some("old"));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let fetcher = StaticFetcher {
            status: 200,
            body: "<nav></nav>",
        };
        let doc = FakeDocument::default();
        let err = block_on(load_navbar(&fetcher, &doc, "/nav.html", "#header")).unwrap_err();
        assert_eq!(err.to_string(), "Target element \"#header\" not found");
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let doc = FakeDocument::with_target("#navbar", "old");
        let err = block_on(load_navbar(&FailingFetcher, &doc, "/nav.html", "#navbar")).unwrap_err();
        assert!(matches!(err, ShmoobiumError::Fetch(_)));
        assert_eq!(doc.html("#navbar").as_deref(), Some("old"));
    }

    #[test]
    fn test_declared_request_defaults_target() {
        let request = FragmentRequest::from_attributes(Some("/partials/nav.html".into()), None);
        assert_eq!(
            request,
            Some(FragmentRequest {
                src: "/partials/nav.html".to_string(),
                selector: DEFAULT_TARGET_SELECTOR.to_string(),
            })
        );

        let request = FragmentRequest::from_attributes(Some(" nav.html ".into()), Some("#top".into()));
        assert_eq!(request.map(|r| (r.src, r.selector)), Some(("nav.html".to_string(), "#top".to_string())));
    }

    #[test]
    fn test_declared_request_needs_src() {
        assert_eq!(FragmentRequest::from_attributes(None, Some("#top".into())), None);
        assert_eq!(FragmentRequest::from_attributes(Some("  ".into()), None), None);
    }

    #[test]
    fn test_create_simple_navbar() {
        let config = SimpleNavbarConfig {
            items: vec![
                SimpleNavItem {
                    label: "Home".to_string(),
                    href: "index.html".to_string(),
                    dropdown: vec![],
                },
                SimpleNavItem {
                    label: "More".to_string(),
                    href: "#".to_string(),
                    dropdown: vec![SimpleNavItem {
                        label: "Q&A".to_string(),
                        href: "qa.html".to_string(),
                        dropdown: vec![],
                    }],
                },
            ],
            ..Default::default()
        };
        let html = create_simple_navbar(&config);
        assert!(html.starts_with("<nav data-shmoobium=\"navbar\""));
        assert!(html.contains("<a href=\"index.html\" data-nav-item>Home</a>"));
        assert!(html.contains("<div data-nav-item data-dropdown=\"true\">More"));
        assert!(html.contains("data-dropdown-item>Q&amp;A</a>"));
        assert!(html.contains("data-logo-text=\"Shmoobium\""));
    }
}
