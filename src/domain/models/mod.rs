// Domain models (component data)
// Pure Rust, no framework dependencies

pub mod geometry;
pub mod sticker;
pub mod nav_item;

pub use geometry::{Point, Viewport};
pub use sticker::{PlacedSticker, StickerCatalogEntry, StickerPosition, StickerSize};
pub use nav_item::{NavCallback, NavItem};
