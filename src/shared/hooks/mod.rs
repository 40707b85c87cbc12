// Custom Dioxus hooks
pub mod use_event_listener;
pub mod viewport;
pub mod use_sticker_board;
pub mod use_navbar_layout;

#[cfg(target_arch = "wasm32")]
pub use use_event_listener::{use_document_listener, use_window_listener, ListenerGuard};
pub use viewport::read_viewport;
pub use use_sticker_board::{use_sticker_board, StickerCallbacks, UseStickerBoard};
pub use use_navbar_layout::{use_navbar_layout, UseNavbarLayout};
