//! Sticker board controller
//!
//! Owns the placed stickers, their stacking order and their persistence.
//! Browser concerns (storage, audio, randomness, host callbacks) come in
//! through traits so the whole state machine runs natively in tests.

use std::collections::HashSet;
use std::f64::consts::PI;

use crate::config::StickerSettings;
use crate::domain::models::{
    PlacedSticker, Point, StickerCatalogEntry, StickerPosition, StickerSize, Viewport,
};
use crate::shared::constants::{
    BASE_Z_INDEX, LEGACY_X_THRESHOLD, MAX_Z_INDEX, SMALL_SCREEN_BREAKPOINT, SPAWN_CLEARANCE,
    STICKER_HALF_EXTENT, STICKER_STORAGE_KEY,
};
use crate::shared::logging::{
    log_sticker_limit, log_sticker_moved, log_sticker_toggled, log_stickers_restored,
    log_storage_error,
};
use crate::shared::services::{
    KeyValueStore, MutedSoundPlayer, RandomSource, SoundCue, SoundPlayer, SystemRandom,
};

/// Host notifications
pub trait StickerObserver {
    fn on_toggle(&self, _sticker_id: &str, _enabled: bool) {}
    fn on_move(&self, _sticker_id: &str, _position: StickerPosition) {}
    /// A placement was rejected because the board is full
    fn on_limit_reached(&self, _max: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StickerObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Placed,
    Removed,
    /// Board is full; nothing changed
    LimitReached { max: usize },
    /// Id is not in the catalog
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    Dragging,
    /// Modifier press: the size was cycled and no drag started
    Resized(StickerSize),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    sticker_id: String,
    /// Pointer position relative to the sticker's top-left corner
    offset: Point,
}

pub struct StickerBoard {
    catalog: Vec<StickerCatalogEntry>,
    settings: StickerSettings,
    viewport: Viewport,
    placed: Vec<PlacedSticker>,
    next_z: u32,
    drag: Option<ActiveDrag>,
    popup_open: bool,
    /// Last serialization written to storage
    last_saved: Option<String>,
    store: Box<dyn KeyValueStore>,
    sound: Box<dyn SoundPlayer>,
    rng: Box<dyn RandomSource>,
    observer: Box<dyn StickerObserver>,
}

impl StickerBoard {
    pub fn new(
        catalog: Vec<StickerCatalogEntry>,
        settings: StickerSettings,
        viewport: Viewport,
        store: impl KeyValueStore + 'static,
    ) -> Self {
        Self {
            catalog,
            settings,
            viewport,
            placed: Vec::new(),
            next_z: BASE_Z_INDEX + 1,
            drag: None,
            popup_open: false,
            last_saved: None,
            store: Box::new(store),
            sound: Box::new(MutedSoundPlayer),
            rng: Box::new(SystemRandom),
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_sound(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_observer(mut self, observer: impl StickerObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn catalog(&self) -> &[StickerCatalogEntry] {
        &self.catalog
    }

    pub fn placed(&self) -> &[PlacedSticker] {
        &self.placed
    }

    pub fn settings(&self) -> &StickerSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_placed(&self, sticker_id: &str) -> bool {
        self.placed.iter().any(|p| p.id() == sticker_id)
    }

    /// Stacking value the next placement or pickup will receive
    pub fn next_z_index(&self) -> u32 {
        self.next_z
    }

    pub fn dragging_id(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.sticker_id.as_str())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Small screens hide the board unless the host opted in
    pub fn is_visible(&self) -> bool {
        self.viewport.width >= SMALL_SCREEN_BREAKPOINT || self.settings.sticker_box_on_mobile
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn open_popup(&mut self) {
        // Opening is a user gesture, the only moment browsers allow audio setup
        if self.settings.enable_sounds {
            self.sound.prime();
        }
        self.popup_open = true;
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Swap in new settings. A lower maximum only blocks new placements.
    pub fn reload_settings(&mut self, settings: StickerSettings) {
        self.settings = settings;
    }

    /// Restore placed stickers from storage, returning how many were restored.
    ///
    /// Unknown ids are dropped, missing fields defaulted and legacy absolute
    /// x values converted to percentages of the current viewport. Nothing
    /// stored yet places the catalog's default-enabled stickers.
    pub fn load(&mut self) -> usize {
        self.placed.clear();
        self.drag = None;
        self.next_z = BASE_Z_INDEX + 1;

        let raw = match self.store.get(STICKER_STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                log_storage_error("load", &e.to_string());
                return 0;
            }
        };

        let Some(raw) = raw else {
            self.place_default_enabled();
            return self.placed.len();
        };

        let stored: Vec<PlacedSticker> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load stickers from localStorage");
                return 0;
            }
        };

        let mut seen = HashSet::new();
        let mut migrated = 0;
        for mut sticker in stored {
            if self.placed.len() >= self.settings.max_stickers {
                break;
            }
            let Some(entry) = self.catalog.iter().find(|e| e.id == sticker.id()) else {
                continue;
            };
            if self.is_placed(&entry.id) {
                continue;
            }

            sticker.entry = StickerCatalogEntry {
                enabled: true,
                ..entry.clone()
            };
            sticker.is_dragging = false;
            // Duplicate or out of range values are handed out again below
            sticker.z_index = sticker
                .z_index
                .filter(|z| *z <= MAX_Z_INDEX && seen.insert(*z));
            if sticker.position.x > LEGACY_X_THRESHOLD {
                sticker.position.x = self.viewport.x_to_percent(sticker.position.x);
                migrated += 1;
            }
            self.placed.push(sticker);
        }

        let max_kept = seen.into_iter().max().unwrap_or(BASE_Z_INDEX);
        self.next_z = max_kept.max(BASE_Z_INDEX) + 1;
        for index in 0..self.placed.len() {
            if self.placed[index].z_index.is_none() {
                let z = self.take_z();
                self.placed[index].z_index = Some(z);
            }
        }

        self.last_saved = Some(raw);
        // Rewrites only when defaulting or migration changed something
        self.save();

        log_stickers_restored(self.placed.len(), migrated);
        self.placed.len()
    }

    /// Persist the placed stickers; an unchanged collection is not rewritten
    pub fn save(&mut self) {
        let serialized = match serde_json::to_string(&self.placed) {
            Ok(serialized) => serialized,
            Err(e) => {
                log_storage_error("serialize", &e.to_string());
                return;
            }
        };
        if self.last_saved.as_deref() == Some(serialized.as_str()) {
            return;
        }
        match self.store.set(STICKER_STORAGE_KEY, &serialized) {
            Ok(()) => self.last_saved = Some(serialized),
            Err(e) => log_storage_error("save", &e.to_string()),
        }
    }

    /// Remove every placed sticker and the stored state
    pub fn reset_all(&mut self) {
        self.placed.clear();
        self.drag = None;
        self.last_saved = None;
        if let Err(e) = self.store.remove(STICKER_STORAGE_KEY) {
            log_storage_error("reset", &e.to_string());
        }
    }

    /// Place a sticker near the viewport centre, or remove it if already placed
    pub fn toggle(&mut self, sticker_id: &str) -> ToggleOutcome {
        let Some(entry) = self.catalog.iter().find(|e| e.id == sticker_id).cloned() else {
            return ToggleOutcome::NotFound;
        };

        if let Some(index) = self.placed.iter().position(|p| p.id() == sticker_id) {
            self.placed.remove(index);
            if self.dragging_id() == Some(sticker_id) {
                self.drag = None;
            }
            self.save();
            log_sticker_toggled(sticker_id, false, self.placed.len());
            self.observer.on_toggle(sticker_id, false);
            return ToggleOutcome::Removed;
        }

        let max = self.settings.max_stickers;
        if self.placed.len() >= max {
            log_sticker_limit(sticker_id, max);
            self.observer.on_limit_reached(max);
            return ToggleOutcome::LimitReached { max };
        }

        let position = self.spawn_position();
        let z_index = self.take_z();
        self.placed.push(PlacedSticker::new(entry, position, z_index));
        self.save();
        self.play(SoundCue::Pickup);

        log_sticker_toggled(sticker_id, true, self.placed.len());
        self.observer.on_toggle(sticker_id, true);
        ToggleOutcome::Placed
    }

    /// Primary press on a placed sticker. With `modifier` (shift or a second
    /// touch point) the size is cycled instead of starting a drag.
    pub fn begin_drag(&mut self, sticker_id: &str, pointer: Point, modifier: bool) -> DragStart {
        let Some(index) = self.placed.iter().position(|p| p.id() == sticker_id) else {
            return DragStart::NotFound;
        };

        if modifier {
            let size = self.placed[index].size.next();
            self.placed[index].size = size;
            self.save();
            return DragStart::Resized(size);
        }

        let z_index = self.take_z();
        let viewport = self.viewport;
        for sticker in &mut self.placed {
            sticker.is_dragging = false;
        }

        let sticker = &mut self.placed[index];
        let (left, top) = sticker.position.to_pixels(&viewport);
        sticker.z_index = Some(z_index);
        sticker.is_dragging = true;
        self.drag = Some(ActiveDrag {
            sticker_id: sticker_id.to_string(),
            offset: Point::new(pointer.x - left, pointer.y - top),
        });

        self.play(SoundCue::Pickup);
        DragStart::Dragging
    }

    /// Follow the pointer. Returns false when no drag is active.
    ///
    /// Intermediate positions stay in memory; `end_drag` persists once.
    pub fn continue_drag(&mut self, pointer: Point) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let viewport = self.viewport;
        let Some(sticker) = self.placed.iter_mut().find(|p| p.entry.id == drag.sticker_id) else {
            return false;
        };

        sticker.position = StickerPosition {
            x: viewport.x_to_percent(pointer.x - drag.offset.x),
            y: pointer.y - drag.offset.y,
        };
        true
    }

    /// Drop the dragged sticker, returning its final position
    pub fn end_drag(&mut self) -> Option<StickerPosition> {
        let drag = self.drag.take()?;
        let sticker = self
            .placed
            .iter_mut()
            .find(|p| p.entry.id == drag.sticker_id)?;
        sticker.is_dragging = false;
        let position = sticker.position;

        self.save();
        self.play(SoundCue::Place);
        log_sticker_moved(&drag.sticker_id, position.x, position.y);
        self.observer.on_move(&drag.sticker_id, position);
        Some(position)
    }

    fn place_default_enabled(&mut self) {
        let defaults: Vec<StickerCatalogEntry> = self
            .catalog
            .iter()
            .filter(|e| e.enabled)
            .take(self.settings.max_stickers)
            .cloned()
            .collect();
        if defaults.is_empty() {
            return;
        }
        for entry in defaults {
            let position = self.spawn_position();
            let z_index = self.take_z();
            self.placed.push(PlacedSticker::new(entry, position, z_index));
        }
        self.save();
    }

    /// Random point on a ring around the viewport centre, x as a percentage
    fn spawn_position(&mut self) -> StickerPosition {
        let center = self.viewport.center();
        let angle = self.rng.next_f64() * PI * 2.0;
        let distance = self.rng.next_f64() * self.settings.spawn_radius + SPAWN_CLEARANCE;
        let x = center.x + angle.cos() * distance - STICKER_HALF_EXTENT;
        let y = center.y + angle.sin() * distance - STICKER_HALF_EXTENT;

        StickerPosition {
            x: self.viewport.x_to_percent(x),
            y,
        }
    }

    fn take_z(&mut self) -> u32 {
        if self.next_z > MAX_Z_INDEX {
            self.compact_z();
        }
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    /// Renumber placed stickers from the floor, keeping their stacking order
    fn compact_z(&mut self) {
        let mut order: Vec<usize> = (0..self.placed.len()).collect();
        order.sort_by_key(|&i| self.placed[i].z());
        self.next_z = BASE_Z_INDEX + 1;
        for i in order {
            self.placed[i].z_index = Some(self.next_z);
            self.next_z += 1;
        }
    }

    fn play(&self, cue: SoundCue) {
        if self.settings.enable_sounds {
            self.sound.play(cue);
        }
    }
}
