//! Event page: event details, registered groups and the modals hosted on top
//!
//! Filtering is pure and recomputed from `search` and `status` on every call.
//! Every successful mutation refetches the group list from the API.

use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, warn};
use crate::client::ApiClient;
use crate::models::{Event, GroupWithMembers, UpdateGroupRequest};
use crate::utils::errors::{Result, SignMeUpError};
use crate::utils::helpers::{format_event_date, initial};
use super::delete_dialog::DeleteGroupDialog;
use super::group_form::{GroupForm, SubmitOutcome};

/// Number of member initials shown on a grid card
pub const GRID_PREVIEW_MEMBERS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl FromStr for StatusFilter {
    type Err = SignMeUpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            other => Err(SignMeUpError::InvalidInput(format!("Unknown status filter: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

/// Summary shown on a grid card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPreview {
    pub initials: Vec<String>,
    /// Members beyond the preview, rendered as "+N"
    pub overflow: Option<usize>,
}

impl GridPreview {
    pub fn of(group: &GroupWithMembers) -> Self {
        let initials = group
            .members
            .iter()
            .take(GRID_PREVIEW_MEMBERS)
            .map(|m| initial(&m.name))
            .collect();
        let overflow = group.member_count().checked_sub(GRID_PREVIEW_MEMBERS).filter(|n| *n > 0);

        Self { initials, overflow }
    }

    pub fn overflow_label(&self) -> Option<String> {
        self.overflow.map(|n| format!("+{}", n))
    }
}

/// Case-insensitive substring match over group name, creator name and project description
pub fn matches_search(group: &GroupWithMembers, query: &str) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    let g = &group.group;
    g.group_name.to_lowercase().contains(&query)
        || g.creator_name.to_lowercase().contains(&query)
        || g.project_description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
}

pub fn matches_status(group: &GroupWithMembers, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Open => group.group.accepts_others,
        StatusFilter::Closed => !group.group.accepts_others,
    }
}

pub fn filter_groups<'a>(groups: &'a [GroupWithMembers], query: &str, filter: StatusFilter) -> Vec<&'a GroupWithMembers> {
    groups
        .iter()
        .filter(|g| matches_search(g, query) && matches_status(g, filter))
        .collect()
}

pub fn total_participants(groups: &[GroupWithMembers]) -> usize {
    groups.iter().map(GroupWithMembers::member_count).sum()
}

/// Modal currently shown over the event page
#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    None,
    Register(GroupForm),
    Edit(GroupForm),
    Delete(DeleteGroupDialog),
}

#[derive(Debug, Clone)]
pub struct EventView {
    client: ApiClient,
    event: Event,
    groups: Vec<GroupWithMembers>,
    pub search: String,
    pub status: StatusFilter,
    pub view_mode: ViewMode,
    expanded: HashSet<i64>,
    modal: Modal,
}

impl EventView {
    /// Fetch the event, then its groups
    pub async fn load(client: ApiClient, event_id: &str) -> Result<Self> {
        let event = client.get_event(event_id).await?;
        let groups = client.get_groups(event_id).await?;
        debug!(event_id = %event.id, groups = groups.len(), "Event view loaded");

        Ok(Self::with_groups(client, event, groups))
    }

    pub fn with_groups(client: ApiClient, event: Event, groups: Vec<GroupWithMembers>) -> Self {
        Self {
            client,
            event,
            groups,
            search: String::new(),
            status: StatusFilter::All,
            view_mode: ViewMode::List,
            expanded: HashSet::new(),
            modal: Modal::None,
        }
    }

    /// Refetch groups; on failure the previous list stays in place
    pub async fn refresh_groups(&mut self) -> Result<()> {
        match self.client.get_groups(&self.event.id.to_string()).await {
            Ok(groups) => {
                self.groups = groups;
                Ok(())
            }
            Err(e) => {
                warn!(event_id = %self.event.id, error = %e, "Failed to fetch groups");
                Err(e)
            }
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn groups(&self) -> &[GroupWithMembers] {
        &self.groups
    }

    pub fn total_participants(&self) -> usize {
        total_participants(&self.groups)
    }

    pub fn date_label(&self) -> String {
        format_event_date(self.event.date_time)
    }

    pub fn remaining_seats(&self) -> usize {
        self.event.remaining_capacity(self.total_participants())
    }

    /// Registering is disabled once the event is full
    pub fn can_register(&self) -> bool {
        !self.event.is_full(self.total_participants())
    }

    pub fn visible_groups(&self) -> Vec<&GroupWithMembers> {
        filter_groups(&self.groups, &self.search, self.status)
    }

    pub fn empty_state_message(&self) -> Option<&'static str> {
        if self.groups.is_empty() {
            Some("No groups have registered yet. Be the first!")
        } else if self.visible_groups().is_empty() {
            Some("No groups match your search criteria.")
        } else {
            None
        }
    }

    pub fn toggle_expanded(&mut self, group_id: i64) {
        if !self.expanded.remove(&group_id) {
            self.expanded.insert(group_id);
        }
    }

    pub fn is_expanded(&self, group_id: i64) -> bool {
        self.expanded.contains(&group_id)
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    pub fn open_register(&mut self) -> bool {
        if !self.can_register() {
            return false;
        }
        let form = GroupForm::new(self.event.clone()).with_participants_elsewhere(self.total_participants());
        self.modal = Modal::Register(form);
        true
    }

    pub fn open_edit(&mut self, group_id: i64) -> bool {
        let Some(group) = self.groups.iter().find(|g| g.id() == group_id) else {
            return false;
        };
        let elsewhere = self.total_participants() - group.member_count();
        let form = GroupForm::for_existing(self.event.clone(), group).with_participants_elsewhere(elsewhere);
        self.modal = Modal::Edit(form);
        true
    }

    pub fn open_delete(&mut self, group_id: i64) -> bool {
        let Some(group) = self.groups.iter().find(|g| g.id() == group_id) else {
            return false;
        };
        self.modal = Modal::Delete(DeleteGroupDialog::open(group_id, group.group.group_name.clone()));
        true
    }

    /// Submit the register modal; closes it and refetches on success
    pub async fn submit_register(&mut self) -> Option<SubmitOutcome> {
        let Modal::Register(form) = &mut self.modal else {
            return None;
        };

        let client = self.client.clone();
        let outcome = form
            .submit(|request| async move { client.create_group(&request).await.map(|_| ()) })
            .await;

        self.after_submit(&outcome).await;
        Some(outcome)
    }

    /// Submit the edit modal; closes it and refetches on success
    pub async fn submit_edit(&mut self) -> Option<SubmitOutcome> {
        let Modal::Edit(form) = &mut self.modal else {
            return None;
        };
        let group_id = form.existing_group_id()?;

        let client = self.client.clone();
        let outcome = form
            .submit(|request| async move {
                client
                    .update_group(group_id, &UpdateGroupRequest::from(request))
                    .await
                    .map(|_| ())
            })
            .await;

        self.after_submit(&outcome).await;
        Some(outcome)
    }

    /// Run the delete dialog; on success the dialog closes and groups are refetched
    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::Delete(dialog) = &mut self.modal else {
            return false;
        };

        let client = self.client.clone();
        let deleted = dialog.confirm(|id| async move { client.delete_group(id).await }).await;

        if deleted {
            let group_id = dialog.group_id();
            self.expanded.remove(&group_id);
            self.modal = Modal::None;
            let _ = self.refresh_groups().await;
        }
        deleted
    }

    async fn after_submit(&mut self, outcome: &SubmitOutcome) {
        if matches!(outcome, SubmitOutcome::Completed(_)) {
            self.modal = Modal::None;
            let _ = self.refresh_groups().await;
        }
    }
}
