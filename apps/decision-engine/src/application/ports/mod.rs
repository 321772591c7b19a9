//! Application Ports
//!
//! Driven ports: how the core reaches macro feeds, the audit log, the
//! decision store and the book. All are synchronous; adapters live in
//! `infrastructure`.

mod audit_sink;
mod decision_store;
mod macro_source;
mod position_closer;

pub use audit_sink::{AuditError, AuditSink, NoOpAuditSink};
pub use decision_store::{DecisionStore, DecisionStoreError};
pub use macro_source::{MacroSource, MacroSourceError};
pub use position_closer::{NoOpPositionCloser, PositionCloseError, PositionCloser};

#[cfg(test)]
pub use audit_sink::MockAuditSink;
#[cfg(test)]
pub use decision_store::MockDecisionStore;
#[cfg(test)]
pub use macro_source::MockMacroSource;
#[cfg(test)]
pub use position_closer::MockPositionCloser;
