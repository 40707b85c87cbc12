use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShmoobiumError {
    #[error("Target element \"{0}\" not found")]
    TargetNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to fetch fragment: {0}")]
    Fetch(String),

    #[error("Failed to load navbar: {status}")]
    Http { status: u16 },

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, ShmoobiumError>;

/// Render a JS exception (or anything debuggable) as an error message
#[cfg(target_arch = "wasm32")]
pub fn js_err(value: wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
