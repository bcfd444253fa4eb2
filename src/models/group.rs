//! Group model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub event_id: Uuid,
    pub creator_name: String,
    pub creator_email: String,
    pub group_name: String,
    /// Whether the group is open to additional members
    pub accepts_others: bool,
    pub project_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// A group together with its ordered roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupWithMembers {
    #[serde(flatten)]
    pub group: Group,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

/// A roster entry as submitted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_new_member_email", skip_on_field_errors = false))]
pub struct NewMember {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters long"))]
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    pub event_id: Uuid,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters long"))]
    pub creator_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub creator_email: String,
    #[validate(length(min = 2, max = 100, message = "Group name must be between 2 and 100 characters long"))]
    pub group_name: String,
    pub accepts_others: bool,
    #[validate(length(max = 500, message = "Project description must be at most 500 characters long"))]
    pub project_description: Option<String>,
    #[validate(nested)]
    pub members: Vec<NewMember>,
}

/// Partial update of a group; absent fields keep their stored value and a
/// present `members` list replaces the whole roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_update_members", skip_on_field_errors = false))]
pub struct UpdateGroupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters long"))]
    pub creator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub creator_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Group name must be between 2 and 100 characters long"))]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_others: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Project description must be at most 500 characters long"))]
    pub project_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<NewMember>>,
}

/// Request to add a single member to an existing group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "crate::validation::validate_added_member_email", skip_on_field_errors = false))]
pub struct AddMemberRequest {
    pub group_id: i64,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters long"))]
    pub name: String,
    pub email: Option<String>,
}

fn trim_in_place(text: &mut String) {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        *text = trimmed.to_string();
    }
}

impl NewMember {
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.name);
        self
    }
}

impl CreateGroupRequest {
    /// Trim names and contact fields so length rules apply to what gets stored
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.creator_name);
        trim_in_place(&mut self.creator_email);
        trim_in_place(&mut self.group_name);
        self.members = self.members.into_iter().map(NewMember::trimmed).collect();
        self
    }
}

impl UpdateGroupRequest {
    pub fn trimmed(mut self) -> Self {
        for field in [&mut self.creator_name, &mut self.creator_email, &mut self.group_name] {
            if let Some(text) = field.as_mut() {
                trim_in_place(text);
            }
        }
        self.members = self
            .members
            .map(|members| members.into_iter().map(NewMember::trimmed).collect());
        self
    }
}

impl AddMemberRequest {
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.name);
        self
    }
}

impl GroupWithMembers {
    pub fn id(&self) -> i64 {
        self.group.id
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl From<CreateGroupRequest> for UpdateGroupRequest {
    fn from(request: CreateGroupRequest) -> Self {
        Self {
            creator_name: Some(request.creator_name),
            creator_email: Some(request.creator_email),
            group_name: Some(request.group_name),
            accepts_others: Some(request.accepts_others),
            // blank clears the stored description
            project_description: Some(request.project_description.unwrap_or_default()),
            members: Some(request.members),
        }
    }
}
