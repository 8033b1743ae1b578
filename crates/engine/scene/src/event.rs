//! Scene lifecycle events
//!
//! The scene runtime reports room and anchor changes as [`SceneEvent`]s. They
//! are queued as they arrive and drained once per frame by the application,
//! which forwards each event to a [`SceneEventListener`].

use crate::anchor::{Anchor, AnchorId, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A change in the tracked scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    RoomAdded { room: RoomId },
    RoomRemoved { room: RoomId },
    AnchorAdded { anchor: Anchor },
    /// Pose, labels or bounds of an existing anchor changed
    AnchorUpdated { anchor: Anchor },
    AnchorRemoved { room: RoomId, anchor: AnchorId },
}

impl SceneEvent {
    /// Room the event belongs to
    pub fn room(&self) -> RoomId {
        match self {
            SceneEvent::RoomAdded { room }
            | SceneEvent::RoomRemoved { room }
            | SceneEvent::AnchorRemoved { room, .. } => *room,
            SceneEvent::AnchorAdded { anchor } | SceneEvent::AnchorUpdated { anchor } => {
                anchor.room
            }
        }
    }

    /// Forward this event to the matching listener method
    pub fn dispatch<L: SceneEventListener + ?Sized>(&self, listener: &mut L) {
        match self {
            SceneEvent::RoomAdded { room } => listener.on_room_added(*room),
            SceneEvent::RoomRemoved { room } => listener.on_room_removed(*room),
            SceneEvent::AnchorAdded { anchor } => listener.on_anchor_added(anchor),
            SceneEvent::AnchorUpdated { anchor } => listener.on_anchor_updated(anchor),
            SceneEvent::AnchorRemoved { room, anchor } => listener.on_anchor_removed(*room, *anchor),
        }
    }
}

/// Receiver for scene events. All methods default to doing nothing.
pub trait SceneEventListener {
    fn on_room_added(&mut self, _room: RoomId) {}

    fn on_room_removed(&mut self, _room: RoomId) {}

    fn on_anchor_added(&mut self, _anchor: &Anchor) {}

    fn on_anchor_updated(&mut self, _anchor: &Anchor) {}

    fn on_anchor_removed(&mut self, _room: RoomId, _anchor: AnchorId) {}
}

/// FIFO of pending scene events
#[derive(Debug, Default)]
pub struct SceneEventQueue {
    events: VecDeque<SceneEvent>,
}

impl SceneEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SceneEvent) {
        self.events.push_back(event);
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<SceneEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return all pending events in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.events.drain(..)
    }

    /// Deliver all pending events to `listener`, returning how many were sent
    pub fn dispatch_all<L: SceneEventListener + ?Sized>(&mut self, listener: &mut L) -> usize {
        let mut count = 0;
        while let Some(event) = self.pop() {
            event.dispatch(listener);
            count += 1;
        }
        count
    }
}

impl Extend<SceneEvent> for SceneEventQueue {
    fn extend<T: IntoIterator<Item = SceneEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}
