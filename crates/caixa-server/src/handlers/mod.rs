//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod events;
pub mod messages;
pub mod status;

// Re-export all handlers for use in router
pub use events::*;
pub use messages::*;
pub use status::*;
