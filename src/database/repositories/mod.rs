//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod group;
pub mod event;

// Re-export repositories
pub use group::GroupRepository;
pub use event::EventRepository;
