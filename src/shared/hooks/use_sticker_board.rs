//! Reactive wrapper around [`StickerBoard`].
//!
//! The board reports toggles and moves to its observer while it is being
//! mutated. Those notifications are queued and dispatched to the host's
//! handlers only after the signal write is released, so a handler may read
//! the board again without a borrow conflict.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::domain::models::{Point, StickerPosition, Viewport};
use crate::domain::services::{DragStart, StickerBoard, StickerObserver, ToggleOutcome};

#[derive(Debug, Clone, PartialEq)]
enum BoardEvent {
    Toggled { sticker_id: String, enabled: bool },
    Moved { sticker_id: String, position: StickerPosition },
    LimitReached { max: usize },
}

type EventQueue = Rc<RefCell<Vec<BoardEvent>>>;

struct QueuedObserver(EventQueue);

impl StickerObserver for QueuedObserver {
    fn on_toggle(&self, sticker_id: &str, enabled: bool) {
        self.0.borrow_mut().push(BoardEvent::Toggled {
            sticker_id: sticker_id.to_string(),
            enabled,
        });
    }

    fn on_move(&self, sticker_id: &str, position: StickerPosition) {
        self.0.borrow_mut().push(BoardEvent::Moved {
            sticker_id: sticker_id.to_string(),
            position,
        });
    }

    fn on_limit_reached(&self, max: usize) {
        self.0.borrow_mut().push(BoardEvent::LimitReached { max });
    }
}

/// Host handlers for board notifications
#[derive(Clone, Copy, PartialEq, Default)]
pub struct StickerCallbacks {
    pub on_toggle: Option<EventHandler<(String, bool)>>,
    pub on_move: Option<EventHandler<(String, StickerPosition)>>,
}

#[derive(Clone, Copy)]
pub struct UseStickerBoard {
    pub board: Signal<StickerBoard>,
    events: CopyValue<EventQueue>,
    callbacks: CopyValue<StickerCallbacks>,
}

impl UseStickerBoard {
    pub fn toggle(&mut self, sticker_id: &str) -> ToggleOutcome {
        let outcome = self.board.write().toggle(sticker_id);
        self.flush();
        outcome
    }

    pub fn begin_drag(&mut self, sticker_id: &str, pointer: Point, modifier: bool) -> DragStart {
        self.board.write().begin_drag(sticker_id, pointer, modifier)
    }

    pub fn continue_drag(&mut self, pointer: Point) -> bool {
        self.board.write().continue_drag(pointer)
    }

    pub fn end_drag(&mut self) -> Option<StickerPosition> {
        let position = self.board.write().end_drag();
        self.flush();
        position
    }

    pub fn reset_all(&mut self) {
        self.board.write().reset_all();
        self.flush();
    }

    pub fn open_popup(&mut self) {
        self.board.write().open_popup();
    }

    pub fn close_popup(&mut self) {
        self.board.write().close_popup();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.board.write().resize(viewport);
    }

    /// Dispatch everything the board reported during the last mutation
    fn flush(&self) {
        let queue = Rc::clone(&self.events.read());
        let events: Vec<BoardEvent> = queue.borrow_mut().drain(..).collect();
        let callbacks = *self.callbacks.read();

        for event in events {
            match event {
                BoardEvent::Toggled { sticker_id, enabled } => {
                    if let Some(handler) = callbacks.on_toggle {
                        handler.call((sticker_id, enabled));
                    }
                }
                BoardEvent::Moved { sticker_id, position } => {
                    if let Some(handler) = callbacks.on_move {
                        handler.call((sticker_id, position));
                    }
                }
                BoardEvent::LimitReached { max } => notify_limit(max),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn notify_limit(max: usize) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("Maximum {} stickers allowed!", max));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn notify_limit(_max: usize) {}

/// Build the board once, restore it from storage and keep it in a signal.
///
/// While a drag is active, document-level move and release listeners are
/// registered; they are released as soon as the drag ends or the component
/// unmounts.
pub fn use_sticker_board(
    init: impl FnOnce() -> StickerBoard,
    callbacks: StickerCallbacks,
) -> UseStickerBoard {
    let events = use_hook(|| CopyValue::new(EventQueue::default()));
    let mut callbacks_value = use_hook(|| CopyValue::new(callbacks));
    if *callbacks_value.peek() != callbacks {
        callbacks_value.set(callbacks);
    }

    let board = use_signal(|| {
        let queue = Rc::clone(&events.read());
        let mut board = init().with_observer(QueuedObserver(queue));
        board.load();
        board
    });

    let hook = UseStickerBoard {
        board,
        events,
        callbacks: callbacks_value,
    };

    #[cfg(target_arch = "wasm32")]
    {
        let mut hook = hook;
        super::use_window_listener("resize", move |_| hook.resize(super::read_viewport()));
        drag::use_drag_listeners(hook);
    }

    hook
}

#[cfg(target_arch = "wasm32")]
mod drag {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dioxus::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Event, MouseEvent, TouchEvent};

    use super::UseStickerBoard;
    use crate::domain::models::Point;
    use crate::shared::hooks::ListenerGuard;

    fn mouse_point(event: &Event) -> Option<Point> {
        let event = event.dyn_ref::<MouseEvent>()?;
        Some(Point::new(event.client_x() as f64, event.client_y() as f64))
    }

    fn touch_point(event: &Event) -> Option<Point> {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
    }

    pub(super) fn use_drag_listeners(hook: UseStickerBoard) {
        let guards = use_hook(|| Rc::new(RefCell::new(Vec::<ListenerGuard>::new())));
        let is_dragging = use_memo(move || hook.board.read().is_dragging());

        let registered_guards = Rc::clone(&guards);
        use_effect(move || {
            let dragging = is_dragging();
            let mut guards = registered_guards.borrow_mut();
            guards.clear();
            if !dragging {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let mut on_mouse_move = hook;
            let mut on_touch_move = hook;
            let mut on_mouse_up = hook;
            let mut on_touch_end = hook;

            let registered = [
                ListenerGuard::new(&document, "mousemove", move |event| {
                    if let Some(point) = mouse_point(&event) {
                        on_mouse_move.continue_drag(point);
                    }
                }),
                ListenerGuard::new_active(&document, "touchmove", move |event| {
                    event.prevent_default();
                    if let Some(point) = touch_point(&event) {
                        on_touch_move.continue_drag(point);
                    }
                }),
                ListenerGuard::new(&document, "mouseup", move |_| {
                    on_mouse_up.end_drag();
                }),
                ListenerGuard::new(&document, "touchend", move |_| {
                    on_touch_end.end_drag();
                }),
            ];

            for guard in registered {
                match guard {
                    Ok(guard) => guards.push(guard),
                    Err(e) => tracing::warn!(error = %e, "Failed to register drag listener"),
                }
            }
        });

        use_drop(move || guards.borrow_mut().clear());
    }
}
