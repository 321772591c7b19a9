//! Audit Adapters
//!
//! Implementations of the [`AuditSink`](crate::application::ports::AuditSink) port.

mod in_memory;
mod jsonl;

pub use in_memory::InMemoryAuditSink;
pub use jsonl::{JsonlAuditWriter, read_audit_log};
