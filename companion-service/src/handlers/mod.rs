//! HTTP handlers for companion-service.

pub mod chat;
pub mod health;
pub mod resources;

pub use chat::{chat, start_chat};
pub use health::{health_check, readiness_check};
pub use resources::get_resources;
