//! Data models module
//!
//! This module contains all data structures shared by the service, the API
//! client and the views

pub mod event;
pub mod group;

// Re-export commonly used models
pub use event::{Event, CreateEventRequest, ListEventsQuery};
pub use group::{Group, GroupMember, GroupWithMembers, NewMember, CreateGroupRequest, UpdateGroupRequest, AddMemberRequest};
