// Browser collaborators behind traits, with in-memory stand-ins for native builds and tests

pub mod storage;
pub mod sound;
pub mod random;
pub mod fragment_loader;

pub use storage::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use sound::{MutedSoundPlayer, SoundCue, SoundPlayer};
#[cfg(target_arch = "wasm32")]
pub use sound::HtmlAudioPlayer;
pub use random::{RandomSource, SystemRandom};
pub use fragment_loader::{
    create_simple_navbar, load_navbar, FetchedFragment, FragmentRequest, DEFAULT_TARGET_SELECTOR, FragmentFetcher, FragmentHost,
    SimpleNavItem, SimpleNavbarConfig,
};
#[cfg(target_arch = "wasm32")]
pub use fragment_loader::GlooFetcher;
