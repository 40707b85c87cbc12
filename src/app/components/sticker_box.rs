//! Sticker box: the catalog popup plus the stickers placed on the page.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use crate::config::StickerSettings;
use crate::domain::models::{Point, StickerCatalogEntry, StickerPosition};
use crate::domain::services::StickerBoard;
use crate::shared::hooks::{read_viewport, use_sticker_board, StickerCallbacks};
use crate::shared::utils::{cn, size_class, when};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    Open,
    Close,
}

/// Opens and closes a mounted sticker box from outside the component tree
#[derive(Debug, Clone)]
pub struct StickerBoxHandle {
    sender: UnboundedSender<PopupCommand>,
}

impl StickerBoxHandle {
    pub fn open_popup(&self) {
        self.send(PopupCommand::Open);
    }

    pub fn close_popup(&self) {
        self.send(PopupCommand::Close);
    }

    fn send(&self, command: PopupCommand) {
        if self.sender.unbounded_send(command).is_err() {
            tracing::debug!(command = ?command, "Sticker box is no longer mounted");
        }
    }
}

/// Receiving end of a [`StickerBoxHandle`], consumed once by the component
#[derive(Clone, Default)]
pub struct PopupCommands(Rc<RefCell<Option<UnboundedReceiver<PopupCommand>>>>);

impl PopupCommands {
    fn take(&self) -> Option<UnboundedReceiver<PopupCommand>> {
        self.0.borrow_mut().take()
    }
}

impl PartialEq for PopupCommands {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

pub fn popup_channel() -> (StickerBoxHandle, PopupCommands) {
    let (sender, receiver) = unbounded();
    (
        StickerBoxHandle { sender },
        PopupCommands(Rc::new(RefCell::new(Some(receiver)))),
    )
}

fn build_board(catalog: Vec<StickerCatalogEntry>, settings: StickerSettings) -> StickerBoard {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::shared::services::{HtmlAudioPlayer, LocalStorage};

        let sound = HtmlAudioPlayer::new(settings.pickup_sound.clone(), settings.place_sound.clone());
        StickerBoard::new(catalog, settings, read_viewport(), LocalStorage).with_sound(sound)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use crate::shared::services::MemoryStore;

        StickerBoard::new(catalog, settings, read_viewport(), MemoryStore::new())
    }
}

/// First touch point, and whether a second finger turns the press into a resize
fn touch_press(points: &[Point]) -> Option<(Point, bool)> {
    points.first().map(|first| (*first, points.len() > 1))
}

#[component]
pub fn StickerBox(
    stickers: Vec<StickerCatalogEntry>,
    #[props(default)] settings: StickerSettings,
    class: Option<String>,
    commands: Option<PopupCommands>,
    on_sticker_toggle: Option<EventHandler<(String, bool)>>,
    on_sticker_move: Option<EventHandler<(String, StickerPosition)>>,
) -> Element {
    let callbacks = StickerCallbacks {
        on_toggle: on_sticker_toggle,
        on_move: on_sticker_move,
    };
    let initial_settings = settings.clone();
    let mut sticker_board = use_sticker_board(move || build_board(stickers, initial_settings), callbacks);

    use_effect(use_reactive((&settings,), move |(settings,)| {
        if *sticker_board.board.peek().settings() != settings {
            sticker_board.board.write().reload_settings(settings);
        }
    }));

    use_future(move || {
        let commands = commands.clone();
        async move {
            let Some(mut receiver) = commands.as_ref().and_then(PopupCommands::take) else {
                return;
            };
            while let Some(command) = receiver.next().await {
                match command {
                    PopupCommand::Open => sticker_board.open_popup(),
                    PopupCommand::Close => sticker_board.close_popup(),
                }
            }
        }
    });

    let board = sticker_board.board.read();
    if !board.is_visible() {
        return rsx! {};
    }

    let popup_class = cn([Some("sticker-box__popup sticker-box__popup--visible"), class.as_deref()]);

    rsx! {
        if board.is_popup_open() {
            div {
                class: "sticker-box__overlay sticker-box__overlay--visible",
                onclick: move |_| sticker_board.close_popup(),
            }
            div { class: "{popup_class}",
                div { class: "sticker-box__header",
                    h2 { class: "sticker-box__title", "Sticker Box" }
                    div { class: "sticker-box__header-buttons",
                        button {
                            class: "sticker-box__reset",
                            r#type: "button",
                            onclick: move |_| sticker_board.reset_all(),
                            "Reset All"
                        }
                        button {
                            class: "sticker-box__close",
                            r#type: "button",
                            onclick: move |_| sticker_board.close_popup(),
                            "×"
                        }
                    }
                }
                div { class: "sticker-box__grid",
                    for entry in board.catalog().iter().cloned() {
                        div {
                            key: "{entry.id}",
                            class: cn([
                                Some("sticker-box__item"),
                                when(board.is_placed(&entry.id), "sticker-box__item--enabled"),
                            ]),
                            onclick: {
                                let id = entry.id.clone();
                                move |_| {
                                    sticker_board.toggle(&id);
                                }
                            },
                            img {
                                class: "sticker-box__sticker-image",
                                src: "{entry.image}",
                                alt: "{entry.name}",
                            }
                            div { class: "sticker-box__sticker-name", "{entry.name}" }
                        }
                    }
                }
            }
        }

        for sticker in board.placed().iter().cloned() {
            div {
                key: "{sticker.entry.id}",
                class: cn([
                    Some(size_class("sticker-box__placed-sticker", Some(sticker.size.as_str())).as_str()),
                    when(sticker.is_dragging, "sticker-box__placed-sticker--dragging"),
                ]),
                style: "left: {sticker.position.x}%; top: {sticker.position.y}px; z-index: {sticker.z()}; width: {sticker.size.pixels()}px;",
                onmousedown: {
                    let id = sticker.entry.id.clone();
                    move |evt: MouseEvent| {
                        evt.prevent_default();
                        let pointer = evt.client_coordinates();
                        sticker_board.begin_drag(
                            &id,
                            Point::new(pointer.x, pointer.y),
                            evt.modifiers().shift(),
                        );
                    }
                },
                ontouchstart: {
                    let id = sticker.entry.id.clone();
                    move |evt: TouchEvent| {
                        // Keeps the browser from replaying the tap as mouse events
                        evt.prevent_default();
                        let points: Vec<Point> = evt
                            .touches()
                            .iter()
                            .map(|touch| {
                                let pointer = touch.client_coordinates();
                                Point::new(pointer.x, pointer.y)
                            })
                            .collect();
                        if let Some((pointer, modifier)) = touch_press(&points) {
                            sticker_board.begin_drag(&id, pointer, modifier);
                        }
                    }
                },
                img {
                    src: "{sticker.entry.image}",
                    alt: "{sticker.entry.name}",
                    draggable: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_delivers_commands_in_order() {
        let (handle, commands) = popup_channel();
        handle.open_popup();
        handle.close_popup();

        let mut receiver = commands.take().expect("receiver available once");
        assert!(commands.take().is_none());

        let received: Vec<PopupCommand> = futures::executor::block_on(async {
            drop(handle);
            receiver.by_ref().collect().await
        });
        assert_eq!(received, vec![PopupCommand::Open, PopupCommand::Close]);
    }

    #[test]
    fn test_handle_outliving_component_is_harmless() {
        let (handle, commands) = popup_channel();
        drop(commands);
        handle.open_popup();
    }

    #[test]
    fn test_touch_press() {
        assert_eq!(touch_press(&[]), None);
        assert_eq!(
            touch_press(&[Point::new(10.0, 20.0)]),
            Some((Point::new(10.0, 20.0), false))
        );
        assert_eq!(
            touch_press(&[Point::new(10.0, 20.0), Point::new(40.0, 20.0)]),
            Some((Point::new(10.0, 20.0), true))
        );
    }

    #[test]
    fn test_commands_compare_by_identity() {
        let (_, a) = popup_channel();
        let (_, b) = popup_channel();
        assert!(a == a.clone());
        assert!(a != b);
    }
}
