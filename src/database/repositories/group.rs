//! Group repository implementation
//!
//! Writes that take part in a capacity check accept a `PgConnection` so the
//! caller can run them inside the transaction that holds the event lock.

use std::collections::HashMap;
use std::time::Instant;
use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use uuid::Uuid;
use crate::models::group::{Group, GroupMember, GroupWithMembers, CreateGroupRequest, UpdateGroupRequest, NewMember, AddMemberRequest};
use crate::utils::errors::SignMeUpError;
use crate::utils::helpers::non_blank;
use crate::utils::logging::log_database_operation;

const GROUP_COLUMNS: &str =
    "id, event_id, creator_name, creator_email, group_name, accepts_others, project_description, created_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, SignMeUpError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by ID together with its roster
    pub async fn find_with_members(&self, id: i64) -> Result<Option<GroupWithMembers>, SignMeUpError> {
        let Some(group) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let members = self.list_members(id).await?;

        Ok(Some(GroupWithMembers { group, members }))
    }

    /// Get all groups of an event with their members, oldest group first
    pub async fn list_for_event_with_members(&self, event_id: Uuid) -> Result<Vec<GroupWithMembers>, SignMeUpError> {
        let started = Instant::now();

        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE event_id = $1 ORDER BY created_at, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, GroupMember>(
            r#"
            SELECT m.id, m.group_id, m.name, m.email
            FROM group_members m
            JOIN groups g ON g.id = m.group_id
            WHERE g.event_id = $1
            ORDER BY m.id
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_group: HashMap<i64, Vec<GroupMember>> = HashMap::new();
        for member in members {
            by_group.entry(member.group_id).or_default().push(member);
        }

        let result = groups
            .into_iter()
            .map(|group| {
                let members = by_group.remove(&group.id).unwrap_or_default();
                GroupWithMembers { group, members }
            })
            .collect();

        log_database_operation("list_for_event", "groups", started.elapsed().as_millis() as u64, true);
        Ok(result)
    }

    /// Get members of a group in insertion order
    pub async fn list_members(&self, group_id: i64) -> Result<Vec<GroupMember>, SignMeUpError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT id, group_id, name, email FROM group_members WHERE group_id = $1 ORDER BY id"
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Lock a group row for the rest of the transaction
    pub async fn lock_for_update(&self, conn: &mut PgConnection, id: i64) -> Result<Option<Group>, SignMeUpError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(group)
    }

    /// Count members of a single group
    pub async fn count_members(&self, conn: &mut PgConnection, group_id: i64) -> Result<i64, SignMeUpError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    /// Insert the group row (without members)
    pub async fn insert(&self, conn: &mut PgConnection, request: &CreateGroupRequest) -> Result<Group, SignMeUpError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (event_id, creator_name, creator_email, group_name, accepts_others, project_description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.creator_name.trim())
        .bind(request.creator_email.trim())
        .bind(request.group_name.trim())
        .bind(request.accepts_others)
        .bind(request.project_description.as_deref().and_then(non_blank))
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(group)
    }

    /// Apply a partial update; absent fields keep their value and a blank description clears it
    pub async fn update(&self, conn: &mut PgConnection, id: i64, request: &UpdateGroupRequest) -> Result<Option<Group>, SignMeUpError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET creator_name = COALESCE($2, creator_name),
                creator_email = COALESCE($3, creator_email),
                group_name = COALESCE($4, group_name),
                accepts_others = COALESCE($5, accepts_others),
                project_description = CASE WHEN $6 THEN $7 ELSE project_description END
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.creator_name.as_deref().map(str::trim))
        .bind(request.creator_email.as_deref().map(str::trim))
        .bind(request.group_name.as_deref().map(str::trim))
        .bind(request.accepts_others)
        .bind(request.project_description.is_some())
        .bind(request.project_description.as_deref().and_then(non_blank))
        .fetch_optional(&mut *conn)
        .await?;

        Ok(group)
    }

    /// Replace the whole roster of a group, preserving the given order
    pub async fn replace_members(&self, conn: &mut PgConnection, group_id: i64, members: &[NewMember]) -> Result<Vec<GroupMember>, SignMeUpError> {
        sqlx::query("DELETE FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *conn)
            .await?;

        let mut stored = Vec::with_capacity(members.len());
        for member in members {
            stored.push(self.insert_member(conn, group_id, &member.name, member.email.as_deref()).await?);
        }

        Ok(stored)
    }

    /// Append one member to a group
    pub async fn add_member(&self, conn: &mut PgConnection, request: &AddMemberRequest) -> Result<GroupMember, SignMeUpError> {
        self.insert_member(conn, request.group_id, &request.name, request.email.as_deref()).await
    }

    async fn insert_member(&self, conn: &mut PgConnection, group_id: i64, name: &str, email: Option<&str>) -> Result<GroupMember, SignMeUpError> {
        let member = sqlx::query_as::<_, GroupMember>(
            r#"
            INSERT INTO group_members (group_id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, name, email
            "#
        )
        .bind(group_id)
        .bind(name.trim())
        .bind(email.and_then(non_blank))
        .fetch_one(&mut *conn)
        .await?;

        Ok(member)
    }

    /// Delete a single member
    pub async fn delete_member(&self, id: i64) -> Result<bool, SignMeUpError> {
        let result = sqlx::query("DELETE FROM group_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a group; its members cascade
    pub async fn delete(&self, id: i64) -> Result<bool, SignMeUpError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
