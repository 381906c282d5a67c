//! Topic-based synchronous event delivery.

mod bus;
mod types;

pub use bus::{EventBus, EventListener};
pub use types::{GameEvent, Topic};
