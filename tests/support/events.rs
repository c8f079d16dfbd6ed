//! Log capture for asserting on emitted tracing events.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Events seen while a closure ran, counted per level.
#[derive(Clone, Default)]
pub struct Events {
    counts: Arc<Mutex<HashMap<Level, usize>>>,
}

impl Events {
    pub fn count(&self, level: Level) -> usize {
        self.counts.lock().unwrap().get(&level).copied().unwrap_or(0)
    }

    pub fn warnings(&self) -> usize {
        self.count(Level::WARN)
    }

    pub fn errors(&self) -> usize {
        self.count(Level::ERROR)
    }
}

impl<S: Subscriber> Layer<S> for Events {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(*event.metadata().level())
            .or_default() += 1;
    }
}

/// Run `f` with a subscriber that counts events on this thread.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Events) {
    let events = Events::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, events)
}
