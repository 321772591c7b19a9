//! Decision Store Adapters

mod in_memory;
mod json_file;

pub use in_memory::InMemoryDecisionStore;
pub use json_file::JsonFileDecisionStore;
