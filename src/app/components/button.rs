use dioxus::prelude::*;

use crate::shared::utils::{cn, variant_class, when};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Ghost => "ghost",
            ButtonVariant::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl ButtonSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonSize::Sm => "sm",
            ButtonSize::Md => "md",
            ButtonSize::Lg => "lg",
            ButtonSize::Xl => "xl",
        }
    }

    /// Spinner edge length in px
    pub fn spinner_size(&self) -> u32 {
        match self {
            ButtonSize::Sm => 14,
            ButtonSize::Md => 16,
            ButtonSize::Lg => 18,
            ButtonSize::Xl => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonShape {
    #[default]
    Rounded,
    Square,
    Pill,
}

impl ButtonShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonShape::Rounded => "rounded",
            ButtonShape::Square => "square",
            ButtonShape::Pill => "pill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub loading: bool,
    pub disabled: bool,
    pub full_width: bool,
}

impl ButtonState {
    /// Loading and disabled buttons swallow clicks
    pub fn is_interactive(&self) -> bool {
        !self.loading && !self.disabled
    }
}

/// Class list for a button element
pub fn button_classes(
    variant: ButtonVariant,
    size: ButtonSize,
    shape: ButtonShape,
    state: ButtonState,
    extra: Option<&str>,
) -> String {
    let base = variant_class("button", Some(variant.as_str()));
    let size = format!("button--{}", size.as_str());
    let shape = format!("button--{}", shape.as_str());
    cn([
        Some(base.as_str()),
        Some(size.as_str()),
        Some(shape.as_str()),
        when(state.loading, "button--loading"),
        when(state.disabled, "button--disabled"),
        when(state.full_width, "button--full-width"),
        extra,
    ])
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] size: ButtonSize,
    #[props(default)] shape: ButtonShape,
    #[props(default)] loading: bool,
    #[props(default)] disabled: bool,
    #[props(default)] full_width: bool,
    left_icon: Option<Element>,
    right_icon: Option<Element>,
    class: Option<String>,
    #[props(default = "button".to_string())] button_type: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let state = ButtonState {
        loading,
        disabled,
        full_width,
    };
    let classes = button_classes(variant, size, shape, state, class.as_deref());
    let spinner = size.spinner_size();
    // Icons give way to the spinner
    let left_icon = left_icon.filter(|_| !loading);
    let right_icon = right_icon.filter(|_| !loading);

    rsx! {
        button {
            class: "{classes}",
            r#type: "{button_type}",
            disabled: disabled || loading,
            "aria-busy": loading,
            onclick: move |evt| {
                if !state.is_interactive() {
                    return;
                }
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            if loading {
                span {
                    class: "button__spinner",
                    style: "width: {spinner}px; height: {spinner}px;",
                    "aria-hidden": true,
                }
            }
            {left_icon.map(|icon| rsx! {
                span { class: "button__icon button__icon--left", {icon} }
            })}
            span { class: "button__label", {children} }
            {right_icon.map(|icon| rsx! {
                span { class: "button__icon button__icon--right", {icon} }
            })}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classes() {
        let classes = button_classes(
            ButtonVariant::default(),
            ButtonSize::default(),
            ButtonShape::default(),
            ButtonState::default(),
            None,
        );
        assert_eq!(classes, "button button--primary button--md button--rounded");
    }

    #[test]
    fn test_state_modifiers_and_extra_class() {
        let state = ButtonState {
            loading: true,
            disabled: false,
            full_width: true,
        };
        let classes = button_classes(
            ButtonVariant::Ghost,
            ButtonSize::Xl,
            ButtonShape::Pill,
            state,
            Some("cta"),
        );
        assert_eq!(
            classes,
            "button button--ghost button--xl button--pill button--loading button--full-width cta"
        );
    }

    #[test]
    fn test_spinner_sizes() {
        let sizes: Vec<u32> = [ButtonSize::Sm, ButtonSize::Md, ButtonSize::Lg, ButtonSize::Xl]
            .iter()
            .map(ButtonSize::spinner_size)
            .collect();
        assert_eq!(sizes, vec![14, 16, 18, 20]);
    }

    #[test]
    fn test_clicks_suppressed() {
        assert!(ButtonState::default().is_interactive());
        assert!(!ButtonState { loading: true, ..Default::default() }.is_interactive());
        assert!(!ButtonState { disabled: true, ..Default::default() }.is_interactive());
    }
}
