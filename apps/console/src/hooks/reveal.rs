use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

use crate::data::console;
use crate::models::ScenarioId;
use crate::reveal::{drive_reveal, Follow, RevealSettings, RevealTicket, RevealView, TranscriptRevealer};
use crate::APP_CONFIG;

fn reveal_settings() -> RevealSettings {
    APP_CONFIG
        .get()
        .map(|config| config.reveal_settings())
        .unwrap_or_default()
}

/// Plays the transcript of whichever scenario `scenario` points at.
///
/// The revealer follows `scenario` in the render path: a new identity cancels
/// the running driver and resets the script before the snapshot is taken.
/// Unmounting drops the driver with the scope.
pub fn use_transcript_reveal(scenario: ReadOnlySignal<ScenarioId>) -> RevealView {
    let settings = reveal_settings();
    let active = scenario();
    let progress = use_signal(|| 0u64);
    let pending = use_hook(|| Rc::new(Cell::new(None::<Task>)));
    let revealer = use_hook(|| {
        let revealer = Rc::new(RefCell::new(TranscriptRevealer::new(
            console().script(active),
            settings.initial_visible,
        )));
        let first = revealer.borrow().ticket();
        restart_driver(&pending, revealer.clone(), first, progress, settings.cadence_ms());
        revealer
    });

    let step = revealer
        .borrow_mut()
        .follow(active, |id| console().script(id));
    if let Follow::Switched(first) = step {
        debug!(scenario = %active, revealing = first.is_some(), "transcript reset");
        restart_driver(&pending, revealer.clone(), first, progress, settings.cadence_ms());
    }

    // Re-render on every firing.
    let _ = progress();
    let view = revealer.borrow().view();
    view
}

fn restart_driver(
    pending: &Cell<Option<Task>>,
    revealer: Rc<RefCell<TranscriptRevealer>>,
    first: Option<RevealTicket>,
    mut progress: Signal<u64>,
    cadence_ms: u32,
) {
    if let Some(task) = pending.take() {
        task.cancel();
    }
    let Some(first) = first else {
        return;
    };

    let task = spawn(async move {
        let fired = drive_reveal(
            first,
            |ticket| {
                let next = revealer.borrow_mut().fire(ticket);
                *progress.write() += 1;
                next
            },
            || TimeoutFuture::new(cadence_ms),
        )
        .await;
        debug!(scenario = %first.scenario(), fired, "transcript complete");
    });
    pending.set(Some(task));
}
