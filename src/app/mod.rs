pub mod bootstrap;
pub mod components;
pub mod layouts;

pub use components::{Button, StickerBox, StickerBoxHandle};
pub use layouts::Navbar;
