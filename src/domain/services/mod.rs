// Component controllers
// Platform independent: the Dioxus hooks feed them measurements and events

pub mod sticker_board;
pub mod navbar_layout;
pub mod active_link;

pub use sticker_board::{DragStart, NoopObserver, StickerBoard, StickerObserver, ToggleOutcome};
pub use navbar_layout::{ItemAction, MenuState, NavbarLayout, NavbarMeasurements};
pub use active_link::{is_active, CurrentLocation};
