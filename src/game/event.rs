//! Event System
//!
//! Components cannot reach the scene that owns them, so anything that has
//! to change the scene itself (new objects, a new editor cursor) is sent as
//! an event and applied by the scene once the update pass is over.

use super::object::GameObject;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all scene events.
#[derive(Debug, Default)]
pub struct Events {
    /// Objects to add to the scene (placed tiles)
    pub spawn: EventQueue<GameObject>,
    /// New editor cursor picked from the palette
    pub pick: EventQueue<GameObject>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}
