//! # Events Module
//!
//! Controller state-change events and the bus that distributes them.

pub mod event_bus;
pub mod model_events;

// Re-export all types for easy access
pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus};
pub use model_events::ModelEvent;
