//! Domain Layer
//!
//! Pure business logic with no I/O. Bounded contexts, leaves first:
//!
//! - `shared`: symbols, timestamps, the injected clock
//! - `decision`: market state, rules, decision kernel, market gate
//! - `policy`: authority hierarchy and pluggable permission policies
//! - `regime`: systemic monitor, recovery ramp, regime → directive table
//! - `execution`: ledger snapshots and the sizing engine

pub mod decision;
pub mod execution;
pub mod policy;
pub mod regime;
pub mod shared;
