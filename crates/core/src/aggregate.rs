//! Aggregate root trait for command-driven domain models.

use crate::clock::Clock;

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented once per applied event.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics.
///
/// - **Decision logic**: `handle(&self, cmd, clock)` checks every guard and only
///   then reads the clock to stamp the resulting events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Because all guards run inside `handle`, a rejected command leaves the
/// aggregate untouched and never consumes a timestamp.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. The clock is read at most once, after the
    /// command has been accepted.
    fn handle(
        &self,
        command: &Self::Command,
        clock: &dyn Clock,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle a command and apply the resulting events in order.
    fn execute(
        &mut self,
        command: &Self::Command,
        clock: &dyn Clock,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(command, clock)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
