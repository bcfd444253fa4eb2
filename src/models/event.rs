//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    /// Maximum number of members in a single group
    pub group_size_limit: i32,
    /// Maximum number of members across all groups of the event
    pub max_participants: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_event_capacity", skip_on_field_errors = false))]
pub struct CreateEventRequest {
    #[validate(length(min = 3, max = 100, message = "Event name must be between 3 and 100 characters long"))]
    pub name: String,
    pub date_time: DateTime<Utc>,
    #[validate(length(min = 3, max = 200, message = "Location must be between 3 and 200 characters long"))]
    pub location: String,
    #[validate(range(min = 1, max = 100, message = "Group size limit must be between 1 and 100"))]
    pub group_size_limit: i32,
    #[validate(range(min = 1, max = 1000, message = "Maximum participants must be between 1 and 1000"))]
    pub max_participants: i32,
}

/// Pagination query for event listings
#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ListEventsQuery {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 100;

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT)
    }
}

impl CreateEventRequest {
    /// Trim text fields so length rules apply to what gets stored
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.location = self.location.trim().to_string();
        self
    }
}

impl Event {
    /// Seats still available given the current participant total
    pub fn remaining_capacity(&self, participant_total: usize) -> usize {
        (self.max_participants.max(0) as usize).saturating_sub(participant_total)
    }

    /// Whether the participant total has reached the event cap
    pub fn is_full(&self, participant_total: usize) -> bool {
        participant_total >= self.max_participants.max(0) as usize
    }
}
