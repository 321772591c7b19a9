//! Macro Source Adapters
//!
//! Implementations of the [`MacroSource`](crate::application::ports::MacroSource)
//! port: operator-injected, recorded replay and live feed.

mod injected;
mod live;
mod replay;

pub use injected::InjectedMacroSource;
pub use live::LiveMacroSource;
pub use replay::ReplayMacroSource;
