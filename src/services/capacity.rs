//! Capacity rules for group rosters
//!
//! Pure checks only. The registration service runs them while holding the
//! event row lock so the counts they see cannot change underneath them.

use crate::models::Event;
use crate::utils::errors::{Result, SignMeUpError};

/// Inputs of a single roster capacity decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityCheck {
    pub group_size_limit: i32,
    pub max_participants: i32,
}

impl CapacityCheck {
    pub fn for_event(event: &Event) -> Self {
        Self {
            group_size_limit: event.group_size_limit,
            max_participants: event.max_participants,
        }
    }

    /// Decide whether a roster of `roster_len` members fits next to `others_total`
    /// members already registered in the event's other groups
    pub fn evaluate(&self, roster_len: usize, others_total: i64) -> Result<()> {
        if roster_len == 0 {
            return Err(SignMeUpError::Validation("A group needs at least one member".to_string()));
        }

        if roster_len as i64 > i64::from(self.group_size_limit) {
            return Err(SignMeUpError::GroupSizeExceeded { limit: self.group_size_limit });
        }

        if others_total.max(0) + roster_len as i64 > i64::from(self.max_participants) {
            return Err(SignMeUpError::CapacityExceeded { limit: self.max_participants });
        }

        Ok(())
    }

    /// Seats left in the event after `total` participants
    pub fn remaining(&self, total: i64) -> i64 {
        (i64::from(self.max_participants) - total).max(0)
    }
}
