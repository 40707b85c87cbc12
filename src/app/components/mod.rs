pub mod button;
pub mod sticker_box;

pub use button::{button_classes, Button, ButtonProps, ButtonShape, ButtonSize, ButtonState, ButtonVariant};
pub use sticker_box::{popup_channel, PopupCommand, PopupCommands, StickerBox, StickerBoxHandle, StickerBoxProps};
