//! Synchronous topic-filtered event bus.
//!
//! Listeners register once, before the loop starts, and receive events in
//! registration order within the same tick the event is raised. Delivery is
//! a plain method call on the single thread; the ordering guarantee falls
//! out of the loop structure rather than any synchronization.

use super::types::{GameEvent, Topic};

/// A presentation or audio collaborator observing game events.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

struct Registration {
    topics: Vec<Topic>,
    listener: Box<dyn EventListener>,
}

/// Topic-based event bus.
///
/// Consumers subscribe to the topics they care about and only receive
/// those.
#[derive(Default)]
pub struct EventBus {
    registrations: Vec<Registration>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to a set of topics.
    pub fn subscribe(&mut self, topics: &[Topic], listener: Box<dyn EventListener>) {
        self.registrations.push(Registration {
            topics: topics.to_vec(),
            listener,
        });
    }

    /// Subscribe a listener to every topic.
    pub fn subscribe_all(&mut self, listener: Box<dyn EventListener>) {
        self.subscribe(&[Topic::Battle, Topic::Scene], listener);
    }

    /// Deliver an event to matching listeners, in registration order.
    pub fn publish(&mut self, event: &GameEvent) {
        let topic = event.topic();
        if self.registrations.is_empty() {
            // No subscribers - normal during tests, not an error.
            tracing::trace!(?topic, "event with no subscribers");
            return;
        }
        for registration in &mut self.registrations {
            if registration.topics.contains(&topic) {
                registration.listener.on_event(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tagger {
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl EventListener for Tagger {
        fn on_event(&mut self, _event: &GameEvent) {
            self.log.borrow_mut().push(self.tag);
        }
    }

    #[test]
    fn delivery_follows_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second", "third"] {
            bus.subscribe_all(Box::new(Tagger {
                tag,
                log: Rc::clone(&log),
            }));
        }

        bus.publish(&GameEvent::GameSaved);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn topic_filter_skips_unrelated_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(
            &[Topic::Battle],
            Box::new(Tagger {
                tag: "battle-only",
                log: Rc::clone(&log),
            }),
        );

        bus.publish(&GameEvent::GameSaved);
        assert!(log.borrow().is_empty());

        bus.publish(&GameEvent::Battle(thornvale_core::BattleEvent::BattleStarted {
            enemies: 1,
        }));
        assert_eq!(*log.borrow(), vec!["battle-only"]);
    }
}
