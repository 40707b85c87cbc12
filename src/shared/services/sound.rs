//! Fire-and-forget sound effects.
//!
//! Playback never fails the interaction that triggered it: every error
//! is swallowed at this layer.

/// Which effect to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Sticker peeled off the sheet or picked up
    Pickup,
    /// Sticker dropped
    Place,
}

pub trait SoundPlayer {
    /// Prepare the audio backend; called from a user gesture
    fn prime(&self) {}

    fn play(&self, cue: SoundCue);
}

/// Player used when sounds are disabled or unsupported
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedSoundPlayer;

impl SoundPlayer for MutedSoundPlayer {
    fn play(&self, _cue: SoundCue) {}
}

/// Plays cues through detached `<audio>` elements
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HtmlAudioPlayer {
    pickup_src: String,
    place_src: String,
    /// Preloaded elements, held so the fetch is not dropped
    preloaded: std::cell::RefCell<Vec<web_sys::HtmlAudioElement>>,
}

#[cfg(target_arch = "wasm32")]
impl HtmlAudioPlayer {
    pub fn new(pickup_src: impl Into<String>, place_src: impl Into<String>) -> Self {
        Self {
            pickup_src: pickup_src.into(),
            place_src: place_src.into(),
            preloaded: std::cell::RefCell::new(Vec::new()),
        }
    }

    fn src(&self, cue: SoundCue) -> &str {
        match cue {
            SoundCue::Pickup => &self.pickup_src,
            SoundCue::Place => &self.place_src,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl SoundPlayer for HtmlAudioPlayer {
    /// Start fetching both cues so the first pickup plays without delay
    fn prime(&self) {
        let mut preloaded = self.preloaded.borrow_mut();
        if !preloaded.is_empty() {
            return;
        }
        for cue in [SoundCue::Pickup, SoundCue::Place] {
            match web_sys::HtmlAudioElement::new_with_src(self.src(cue)) {
                Ok(audio) => {
                    audio.set_preload("auto");
                    audio.load();
                    preloaded.push(audio);
                }
                Err(e) => tracing::debug!(error = ?e, "Audio not supported"),
            }
        }
    }

    fn play(&self, cue: SoundCue) {
        use crate::shared::constants::SOUND_VOLUME;

        let audio = match web_sys::HtmlAudioElement::new_with_src(self.src(cue)) {
            Ok(audio) => audio,
            Err(e) => {
                tracing::debug!(error = ?e, "Audio not supported");
                return;
            }
        };
        audio.set_volume(SOUND_VOLUME);
        if let Ok(promise) = audio.play() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::debug!(error = ?e, "Failed to play sound");
                }
            });
        }
    }
}
