//! Registration service implementation
//!
//! This service owns events, groups and their rosters. Every roster change
//! runs in a transaction that first locks the owning event row, so the
//! participant count used by the capacity check stays accurate until commit.

use sqlx::PgConnection;
use tracing::{info, debug};
use uuid::Uuid;
use crate::database::DatabaseService;
use crate::middleware::PerformanceTracker;
use crate::models::{
    Event, CreateEventRequest, ListEventsQuery, GroupMember, GroupWithMembers,
    CreateGroupRequest, UpdateGroupRequest, AddMemberRequest,
};
use crate::services::capacity::CapacityCheck;
use crate::utils::errors::{SignMeUpError, Result};
use crate::utils::helpers::calculate_offset;
use crate::utils::logging::{log_capacity_rejection, log_event_action, log_group_action};
use crate::validation::ensure_valid;

/// Registration service for events, groups and members
#[derive(Debug, Clone)]
pub struct RegistrationService {
    db: DatabaseService,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseService {
        &self.db
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let request = request.trimmed();
        ensure_valid(&request)?;

        let event = self.db.events.create(request).await?;
        log_event_action(&event.id.to_string(), "created", Some(&event.name));

        Ok(event)
    }

    /// List events, one page at a time
    pub async fn list_events(&self, query: &ListEventsQuery) -> Result<Vec<Event>> {
        let limit = query.limit();
        let offset = calculate_offset(query.page(), limit);
        debug!(limit = limit, offset = offset, "Listing events");

        self.db.events.list(limit as i64, offset as i64).await
    }

    /// Get event by its path identifier
    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        let id = parse_event_id(event_id)?;
        self.db.events.find_by_id(id).await?
            .ok_or_else(|| SignMeUpError::EventNotFound { event_id: event_id.to_string() })
    }

    /// Delete an event together with its groups
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        let id = parse_event_id(event_id)?;
        if !self.db.events.delete(id).await? {
            return Err(SignMeUpError::EventNotFound { event_id: event_id.to_string() });
        }

        log_event_action(event_id, "deleted", None);
        Ok(())
    }

    /// Get all groups registered for an event
    pub async fn list_event_groups(&self, event_id: &str) -> Result<Vec<GroupWithMembers>> {
        let event = self.get_event(event_id).await?;
        self.db.groups.list_for_event_with_members(event.id).await
    }

    /// Register a new group with its full roster
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<GroupWithMembers> {
        let request = request.trimmed();
        ensure_valid(&request)?;
        let tracker = PerformanceTracker::new("create_group");

        let mut tx = self.db.begin().await?;
        let event = self.lock_event(&mut tx, request.event_id).await?;

        let others = self.db.events.count_participants(&mut tx, event.id, None).await?;
        check_roster(&event, request.members.len(), others)?;

        let group = self.db.groups.insert(&mut tx, &request).await?;
        let members = self.db.groups.replace_members(&mut tx, group.id, &request.members).await?;
        tx.commit().await?;
        tracker.complete(true);

        log_group_action(group.id, &event.id.to_string(), "created", members.len());
        Ok(GroupWithMembers { group, members })
    }

    /// Apply a partial update; a present member list replaces the roster
    pub async fn update_group(&self, group_id: i64, request: UpdateGroupRequest) -> Result<GroupWithMembers> {
        let request = request.trimmed();
        ensure_valid(&request)?;

        let existing = self.db.groups.find_by_id(group_id).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })?;

        let tracker = PerformanceTracker::new("update_group");
        let mut tx = self.db.begin().await?;
        let event = self.lock_event(&mut tx, existing.event_id).await?;

        if let Some(members) = &request.members {
            let others = self.db.events.count_participants(&mut tx, event.id, Some(group_id)).await?;
            check_roster(&event, members.len(), others)?;
        }

        self.db.groups.update(&mut tx, group_id, &request).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })?;

        if let Some(members) = &request.members {
            self.db.groups.replace_members(&mut tx, group_id, members).await?;
        }
        tx.commit().await?;
        tracker.complete(true);

        let updated = self.get_group(group_id).await?;
        log_group_action(group_id, &event.id.to_string(), "updated", updated.member_count());
        Ok(updated)
    }

    /// Get a group with its roster
    pub async fn get_group(&self, group_id: i64) -> Result<GroupWithMembers> {
        self.db.groups.find_with_members(group_id).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })
    }

    /// Delete a group and its members
    pub async fn delete_group(&self, group_id: i64) -> Result<()> {
        let group = self.db.groups.find_by_id(group_id).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })?;

        if !self.db.groups.delete(group_id).await? {
            return Err(SignMeUpError::GroupNotFound { group_id });
        }

        log_group_action(group_id, &group.event_id.to_string(), "deleted", 0);
        Ok(())
    }

    /// Get the roster of a group
    pub async fn list_group_members(&self, group_id: i64) -> Result<Vec<GroupMember>> {
        if self.db.groups.find_by_id(group_id).await?.is_none() {
            return Err(SignMeUpError::GroupNotFound { group_id });
        }
        self.db.groups.list_members(group_id).await
    }

    /// Add a single member to an open group
    pub async fn add_member(&self, request: AddMemberRequest) -> Result<GroupMember> {
        let request = request.trimmed();
        ensure_valid(&request)?;

        let group_id = request.group_id;
        let group = self.db.groups.find_by_id(group_id).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })?;

        let mut tx = self.db.begin().await?;
        let event = self.lock_event(&mut tx, group.event_id).await?;

        // re-read under the event lock; the group may have changed since
        let group = self.db.groups.lock_for_update(&mut tx, group_id).await?
            .ok_or(SignMeUpError::GroupNotFound { group_id })?;
        if !group.accepts_others {
            return Err(SignMeUpError::GroupClosed { group_id });
        }

        let current = self.db.groups.count_members(&mut tx, group_id).await?;
        let others = self.db.events.count_participants(&mut tx, event.id, Some(group_id)).await?;
        check_roster(&event, current as usize + 1, others)?;

        let member = self.db.groups.add_member(&mut tx, &request).await?;
        tx.commit().await?;

        info!(member_id = member.id, group_id = group_id, "Member added to group");
        Ok(member)
    }

    /// Remove a single member
    pub async fn remove_member(&self, member_id: i64) -> Result<()> {
        if !self.db.groups.delete_member(member_id).await? {
            return Err(SignMeUpError::MemberNotFound { member_id });
        }

        info!(member_id = member_id, "Member removed");
        Ok(())
    }

    async fn lock_event(&self, conn: &mut PgConnection, event_id: Uuid) -> Result<Event> {
        self.db.events.lock_for_update(conn, event_id).await?
            .ok_or_else(|| SignMeUpError::EventNotFound { event_id: event_id.to_string() })
    }
}

/// Event ids arrive as path strings; anything that is not a UUID cannot exist
pub fn parse_event_id(event_id: &str) -> Result<Uuid> {
    Uuid::parse_str(event_id.trim())
        .map_err(|_| SignMeUpError::EventNotFound { event_id: event_id.to_string() })
}

fn check_roster(event: &Event, roster_len: usize, others: i64) -> Result<()> {
    let result = CapacityCheck::for_event(event).evaluate(roster_len, others);

    match &result {
        Err(SignMeUpError::GroupSizeExceeded { limit }) => {
            log_capacity_rejection(&event.id.to_string(), "group_size_limit", roster_len, *limit);
        }
        Err(SignMeUpError::CapacityExceeded { limit }) => {
            log_capacity_rejection(&event.id.to_string(), "max_participants", others as usize + roster_len, *limit);
        }
        _ => {}
    }

    result
}
