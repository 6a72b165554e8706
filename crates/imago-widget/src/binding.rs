//! Target Binding Fan-Out
//!
//! One physical attachment point, multiple logical subscribers. The widget
//! and any caller-held reference both need to observe the same underlying
//! element; subscribers registered here are notified on every attach and
//! detach, and a late subscriber immediately sees the current target.

use imago_observe::TargetId;

type Subscriber = Box<dyn FnMut(Option<TargetId>)>;

/// Fan-out for element attach/detach notifications.
#[derive(Default)]
pub struct TargetBinding {
    current: Option<TargetId>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for TargetBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetBinding")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TargetBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently attached target.
    pub fn current(&self) -> Option<TargetId> {
        self.current
    }

    /// Register a subscriber. It is invoked immediately with the current
    /// target so late subscribers do not miss an attach.
    pub fn subscribe(&mut self, mut subscriber: impl FnMut(Option<TargetId>) + 'static) {
        subscriber(self.current);
        self.subscribers.push(Box::new(subscriber));
    }

    /// Attach to a target (or detach with `None`) and notify every
    /// subscriber.
    pub fn attach(&mut self, target: Option<TargetId>) {
        self.current = target;
        for subscriber in &mut self.subscribers {
            subscriber(target);
        }
    }
}
