//! Matching nav item links against the page being shown.

/// The parts of `window.location` the matcher needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentLocation {
    /// Full URL
    pub href: String,
    /// Path component, e.g. `/docs/about.html`
    pub pathname: String,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
}

impl CurrentLocation {
    pub fn new(href: impl Into<String>, pathname: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            pathname: pathname.into(),
            hash: hash.into(),
        }
    }

    /// Split a full or relative URL the way `window.location` would report it
    pub fn from_href(href: &str) -> Self {
        let hash = href.find('#').map(|i| href[i..].to_string()).unwrap_or_default();
        let pathname = match path_of(href) {
            "" if origin_of(href).is_some() => "/".to_string(),
            path => path.to_string(),
        };
        Self {
            href: href.to_string(),
            pathname,
            hash,
        }
    }

    /// Read the browser location
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Self::default();
        };
        Self {
            href: location.href().unwrap_or_default(),
            pathname: location.pathname().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }
}

/// Whether a link points at the current page.
///
/// Rules, first match wins: exact URL, exact path, same file name,
/// root and `index` equivalence, fragment containment for hash links.
pub fn is_active(href: Option<&str>, location: &CurrentLocation) -> bool {
    let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
        return false;
    };

    if href == location.href {
        return true;
    }

    // Links to other sites never match on path
    let same_site = match (origin_of(href), origin_of(&location.href)) {
        (Some(item), Some(current)) => item == current,
        (Some(_), None) => false,
        _ => true,
    };

    if !href.starts_with('#') && same_site {
        let item_path = path_of(href);
        let current_path = location.pathname.as_str();

        if !item_path.is_empty() && trim_leading(item_path) == trim_leading(current_path) {
            return true;
        }

        let item_file = last_segment(item_path);
        let current_file = last_segment(current_path);
        if !current_file.is_empty() && item_file == current_file {
            return true;
        }

        if is_root(current_path) && is_index(item_file) {
            return true;
        }
        let links_to_root = item_path == "/" || (item_path.is_empty() && origin_of(href).is_some());
        if is_index(current_file) && links_to_root {
            return true;
        }
    }

    match fragment_of(href) {
        Some(fragment) => {
            let needle = format!("#{}", fragment);
            location.hash == needle || location.href.contains(&needle)
        }
        None => false,
    }
}

/// `scheme://host[:port]` of an absolute URL
fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let host_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&url[..scheme_end + 3 + host_len])
}

/// Path of a URL without origin, query or fragment
fn path_of(url: &str) -> &str {
    let without_origin = match origin_of(url) {
        Some(origin) => &url[origin.len()..],
        None => url,
    };
    let end = without_origin
        .find(['?', '#'])
        .unwrap_or(without_origin.len());
    &without_origin[..end]
}

/// Non-empty fragment without the `#`
fn fragment_of(url: &str) -> Option<&str> {
    let index = url.find('#')?;
    Some(&url[index + 1..]).filter(|f| !f.is_empty())
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

fn trim_leading(path: &str) -> &str {
    path.trim_start_matches("./").trim_start_matches('/')
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

fn is_index(file: &str) -> bool {
    file == "index" || file.starts_with("index.")
}
