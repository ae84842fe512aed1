//! Domain event trait.

use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate after a command was accepted.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable, dotted event name (e.g. `taxi.order.driver_assigned`).
    fn event_type(&self) -> &'static str;

    /// Time stamped onto the aggregate by this event, if the transition
    /// records one.
    fn occurred_at(&self) -> Option<DateTime<Utc>>;
}
