pub mod errors;
pub mod constants;
pub mod logging;
pub mod services;
pub mod utils;

// Dioxus hooks (browser-only listeners are gated inside)
pub mod hooks;
