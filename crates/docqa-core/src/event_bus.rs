//! Results of background calls, queued for the next frame.
//!
//! Every queued event is stamped with the session generation that was
//! current when its call started. Logging in, logging out or switching
//! user in another tab advances the generation, and events stamped with
//! an older one are dropped instead of reaching the new session's views.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use docqa_types::event::AppEvent;

type Queue = Rc<RefCell<VecDeque<(u64, AppEvent)>>>;

#[derive(Clone)]
pub struct EventBus {
    queue: Queue,
    generation: Rc<Cell<u64>>,
}

/// Handle a spawned task posts its result through.
/// Bound to the generation current when it was taken.
pub struct EventSender {
    queue: Queue,
    generation: u64,
}

impl EventSender {
    pub fn emit(&self, event: AppEvent) {
        self.queue.borrow_mut().push_back((self.generation, event));
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Take a sender before starting a call.
    pub fn sender(&self) -> EventSender {
        EventSender {
            queue: self.queue.clone(),
            generation: self.generation.get(),
        }
    }

    /// Start a new session generation. Anything still queued or in flight
    /// from the previous one will be discarded.
    pub fn advance(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        let stale = self.queue.borrow_mut().drain(..).count();
        if stale > 0 {
            log::debug!("Dropped {} queued event(s) from the previous session", stale);
        }
        next
    }

    /// Drain events of the current generation, oldest first.
    pub fn drain(&self) -> Vec<AppEvent> {
        let current = self.generation.get();
        let mut stale = 0;
        let events = self
            .queue
            .borrow_mut()
            .drain(..)
            .filter_map(|(generation, event)| {
                if generation == current {
                    Some(event)
                } else {
                    stale += 1;
                    None
                }
            })
            .collect();
        if stale > 0 {
            log::debug!("Dropped {} late event(s) from a previous session", stale);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
