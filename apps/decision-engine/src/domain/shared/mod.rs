//! Shared Domain Types
//!
//! Value objects, errors and the injected clock shared across bounded contexts.

pub mod clock;
pub mod errors;
pub mod value_objects;

pub use clock::{Clock, FrozenClock, SystemClock};
pub use errors::DomainError;
pub use value_objects::{Symbol, Timestamp};
