//! In-memory persistence layer for the Brigade personnel system
//!
//! This crate implements the ports the personnel core consumes: the
//! persistence gateway, the schedule view used by the deactivation gate,
//! and the event receiver that writes announced changes through the store.
//! `PersonnelBackend` wires everything into a ready-to-use manager.

pub mod backend;
pub mod calendar;
pub mod memory;
pub mod persistence;

pub use backend::PersonnelBackend;
pub use calendar::MemoryCalendar;
pub use memory::MemoryStore;
pub use persistence::StorePersistence;

/// Re-export core types for convenience
pub use brigade_core as core;
