//! `freightdesk-core` — shared building blocks for the freight back office.
//!
//! Everything here is **pure domain** (no storage, no transport). The cargo and
//! job crates build on these traits and identifiers.

pub mod aggregate;
pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CargoLineId, EventId, JobId};
pub use value_object::ValueObject;
