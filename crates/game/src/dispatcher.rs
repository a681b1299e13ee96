//! Ordered delivery of input events to the possessed pawn.

use std::collections::VecDeque;

use pawnmotion_physics::{InputEvent, InputReceiver};

/// FIFO of input events waiting for the next dispatch.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    queue: VecDeque<InputEvent>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.queue.extend(events);
    }

    /// Deliver every queued event to `receiver` in arrival order.
    ///
    /// Returns the number of events delivered.
    pub fn dispatch(&mut self, receiver: &mut dyn InputReceiver) -> usize {
        let count = self.queue.len();
        for event in self.queue.drain(..) {
            receiver.receive(event);
        }
        count
    }

    /// Drop pending events without delivering them.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
