use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{collision::contact::ContactInfo, utils::allocator::BodyHandle};

/// Receives contact state changes from [`crate::PhysicsWorld`].
///
/// Both bodies of a pair are notified, each with the other as partner.
/// Calls happen synchronously from inside `update()`; listeners must not
/// expect a return-value contract.
pub trait CollisionListener: Send {
    fn on_collide(&mut self, body: BodyHandle, contact: &ContactInfo);

    fn on_separate(&mut self, _body: BodyHandle, _partner: BodyHandle) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    Collide {
        body: BodyHandle,
        contact: ContactInfo,
    },
    Separate {
        body: BodyHandle,
        partner: BodyHandle,
    },
}

impl CollisionEvent {
    /// Body the event was delivered to.
    pub fn body(&self) -> BodyHandle {
        match self {
            CollisionEvent::Collide { body, .. } | CollisionEvent::Separate { body, .. } => *body,
        }
    }

    pub fn partner(&self) -> BodyHandle {
        match self {
            CollisionEvent::Collide { contact, .. } => contact.partner,
            CollisionEvent::Separate { partner, .. } => *partner,
        }
    }
}

/// Listener that buffers events for hosts that poll after each tick.
///
/// Clones share one buffer, so a clone can be installed in the world while
/// the host keeps another to drain.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl CollisionListener for EventRecorder {
    fn on_collide(&mut self, body: BodyHandle, contact: &ContactInfo) {
        self.events.lock().push(CollisionEvent::Collide {
            body,
            contact: *contact,
        });
    }

    fn on_separate(&mut self, body: BodyHandle, partner: BodyHandle) {
        self.events
            .lock()
            .push(CollisionEvent::Separate { body, partner });
    }
}
