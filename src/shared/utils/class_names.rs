/// Join the non-empty class names with single spaces
pub fn cn<'a>(classes: impl IntoIterator<Item = Option<&'a str>>) -> String {
    classes
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn conditional_class<'a>(condition: bool, true_class: &'a str, false_class: Option<&'a str>) -> &'a str {
    if condition {
        true_class
    } else {
        false_class.unwrap_or("")
    }
}

/// `base base--variant`, or just `base`
pub fn variant_class(base: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("{} {}--{}", base, base, variant),
        None => base.to_string(),
    }
}

pub fn size_class(base: &str, size: Option<&str>) -> String {
    variant_class(base, size)
}

/// `Some(class)` when the flag is set; reads naturally inside `cn([...])`
pub fn when(condition: bool, class: &str) -> Option<&str> {
    condition.then_some(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cn_skips_empty() {
        assert_eq!(cn([Some("navbar"), None, Some(""), Some("navbar--top")]), "navbar navbar--top");
        assert_eq!(cn([None, None]), "");
    }

    #[test]
    fn test_conditional_class() {
        assert_eq!(conditional_class(true, "on", Some("off")), "on");
        assert_eq!(conditional_class(false, "on", Some("off")), "off");
        assert_eq!(conditional_class(false, "on", None), "");
    }

    #[test]
    fn test_variant_and_size_class() {
        assert_eq!(variant_class("button", Some("ghost")), "button button--ghost");
        assert_eq!(variant_class("button", None), "button");
        assert_eq!(size_class("button", Some("lg")), "button button--lg");
    }

    #[test]
    fn test_when() {
        assert_eq!(cn([Some("item"), when(true, "item--active"), when(false, "item--disabled")]), "item item--active");
    }
}
