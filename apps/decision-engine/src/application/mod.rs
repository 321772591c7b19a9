//! Application Layer
//!
//! Ports for the outside world and the services that drive the domain
//! through them.

pub mod ports;
pub mod services;
