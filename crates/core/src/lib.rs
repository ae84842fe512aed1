//! `taxi-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the value-object equality engine, entity and aggregate traits, the clock
//! abstraction and the domain error model.

pub mod aggregate;
pub mod clock;
pub mod entity;
pub mod error;
pub mod event;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use value_object::ValueObject;
