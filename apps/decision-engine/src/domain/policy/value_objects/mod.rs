//! Policy value objects.

mod policy_result;

pub use policy_result::{PolicyAction, PolicyResult};
