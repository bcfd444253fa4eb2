//! Edit-group page reached through `/event/{eventId}/edit?groupId=`

use tracing::warn;
use crate::client::ApiClient;
use crate::models::{Event, UpdateGroupRequest};
use super::group_form::{GroupForm, SubmitOutcome};
use super::routes::Route;

pub const MISSING_GROUP_ID: &str = "No group ID provided";
pub const LOAD_FAILED: &str = "Failed to load group or event data";

#[derive(Debug, Clone)]
pub enum EditGroupState {
    Ready { event: Event, group_id: i64, form: Box<GroupForm> },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EditGroupPage {
    client: ApiClient,
    event_id: String,
    state: EditGroupState,
}

impl EditGroupPage {
    /// Load the event, then the group being edited
    pub async fn load(client: ApiClient, event_id: &str, group_id: Option<i64>) -> Self {
        let state = match client.get_event(event_id).await {
            Err(e) => {
                warn!(event_id = event_id, error = %e, "Failed to fetch event for editing");
                EditGroupState::Failed(LOAD_FAILED.to_string())
            }
            Ok(event) => match group_id {
                None => EditGroupState::Failed(MISSING_GROUP_ID.to_string()),
                Some(group_id) => match client.get_group(group_id).await {
                    Ok(group) => {
                        let form = GroupForm::for_existing(event.clone(), &group);
                        EditGroupState::Ready { event, group_id, form: Box::new(form) }
                    }
                    Err(e) => {
                        warn!(group_id = group_id, error = %e, "Failed to fetch group for editing");
                        EditGroupState::Failed(LOAD_FAILED.to_string())
                    }
                },
            },
        };

        Self {
            client,
            event_id: event_id.to_string(),
            state,
        }
    }

    /// Load the page for a parsed route; other routes yield `None`
    pub async fn from_route(client: ApiClient, route: &Route) -> Option<Self> {
        match route {
            Route::EditGroup { event_id, group_id } => Some(Self::load(client, event_id, *group_id).await),
            _ => None,
        }
    }

    pub fn state(&self) -> &EditGroupState {
        &self.state
    }

    pub fn form_mut(&mut self) -> Option<&mut GroupForm> {
        match &mut self.state {
            EditGroupState::Ready { form, .. } => Some(form.as_mut()),
            EditGroupState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditGroupState::Failed(message) => Some(message),
            EditGroupState::Ready { .. } => None,
        }
    }

    pub fn back_route(&self) -> Route {
        Route::Event { event_id: self.event_id.clone() }
    }

    /// Send the update; on success the outcome carries the event page route
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let EditGroupState::Ready { group_id, form, .. } = &mut self.state else {
            return None;
        };

        let group_id = *group_id;
        let client = self.client.clone();
        let outcome = form
            .submit(|request| async move {
                client
                    .update_group(group_id, &UpdateGroupRequest::from(request))
                    .await
                    .map(|_| ())
            })
            .await;

        Some(outcome)
    }
}
