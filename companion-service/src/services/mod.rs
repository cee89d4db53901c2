//! Domain services: the conversation relay, the crisis-resource table, and
//! the provider abstraction underneath them.

pub mod companion;
pub mod crisis_resources;
pub mod providers;

pub use companion::CompanionService;
