//! Group registration form
//!
//! Holds the editable roster for one event: the leader's contact fields plus
//! additional member rows. The leader counts as one member, so the counted
//! total is `1 + rows` and stays within `[1, group_size_limit]`. On submit
//! the leader is appended after the other rows.
//!
//! A stored roster may lack the leader's row when members were managed one by
//! one. Such a form edits the stored rows as they are and never appends the
//! leader.

use std::future::Future;
use tracing::{debug, info, warn};
use crate::models::{Event, GroupWithMembers, CreateGroupRequest, NewMember};
use crate::utils::errors::{Result, SignMeUpError};
use crate::utils::helpers::non_blank;
use crate::validation::{check, FieldError};
use super::routes::Route;

/// One additional member row as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub email: String,
}

/// Raw field values of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFormValues {
    pub creator_name: String,
    pub creator_email: String,
    pub group_name: String,
    pub accepts_others: bool,
    pub project_description: String,
    pub members: Vec<MemberRow>,
}

/// Which capacity rule a server rejection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionHint {
    ParticipantLimit,
    GroupSizeLimit,
    Other,
}

impl RejectionHint {
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("maximum participant limit") {
            RejectionHint::ParticipantLimit
        } else if message.contains("group size limit") {
            RejectionHint::GroupSizeLimit
        } else {
            RejectionHint::Other
        }
    }

    /// Explanation shown under the error message
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            RejectionHint::ParticipantLimit => Some(
                "This event has no room left for a group of this size. Try registering fewer members or ask the organizer about open seats.",
            ),
            RejectionHint::GroupSizeLimit => Some(
                "Your group has more members than this event allows per group. Remove members and submit again.",
            ),
            RejectionHint::Other => None,
        }
    }
}

/// Inline error panel shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
    pub hint: RejectionHint,
}

impl ErrorPanel {
    pub fn from_error(error: &SignMeUpError) -> Self {
        let message = error.user_message();
        Self {
            hint: RejectionHint::from_message(&message),
            message,
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid(Vec<FieldError>),
    /// Handler succeeded; navigate to the route
    Completed(Route),
    /// Handler failed; the panel is also kept on the form
    Rejected(ErrorPanel),
}

#[derive(Debug, Clone)]
pub struct GroupForm {
    event: Event,
    existing_group_id: Option<i64>,
    pub values: GroupFormValues,
    /// Whether the leader occupies a roster slot appended on submit
    leader_row: bool,
    participants_elsewhere: Option<usize>,
    field_errors: Vec<FieldError>,
    error: Option<ErrorPanel>,
    loading: bool,
    scroll_requested: bool,
}

impl GroupForm {
    /// Blank form for a new registration
    pub fn new(event: Event) -> Self {
        Self {
            event,
            existing_group_id: None,
            values: GroupFormValues::default(),
            leader_row: true,
            participants_elsewhere: None,
            field_errors: Vec::new(),
            error: None,
            loading: false,
            scroll_requested: false,
        }
    }

    /// Form prefilled from a stored group
    pub fn for_existing(event: Event, existing: &GroupWithMembers) -> Self {
        let group = &existing.group;
        let mut rows: Vec<MemberRow> = existing
            .members
            .iter()
            .map(|m| MemberRow {
                name: m.name.clone(),
                email: m.email.clone().unwrap_or_default(),
            })
            .collect();

        // the leader is edited through the creator fields
        let leader_position = rows
            .iter()
            .position(|row| row.name == group.creator_name && row.email == group.creator_email);
        if let Some(position) = leader_position {
            rows.remove(position);
        }
        let leader_row = leader_position.is_some() || rows.is_empty();
        if !leader_row {
            debug!(group_id = group.id, rows = rows.len(), "Stored roster has no leader row");
        }

        let max_rows = event.group_size_limit.max(1) as usize - usize::from(leader_row);
        if rows.len() > max_rows {
            warn!(
                group_id = group.id,
                rows = rows.len(),
                limit = event.group_size_limit,
                "Stored roster exceeds group size limit, truncating form rows"
            );
            rows.truncate(max_rows);
        }

        let mut form = Self::new(event);
        form.existing_group_id = Some(group.id);
        form.leader_row = leader_row;
        form.values = GroupFormValues {
            creator_name: group.creator_name.clone(),
            creator_email: group.creator_email.clone(),
            group_name: group.group_name.clone(),
            accepts_others: group.accepts_others,
            project_description: group.project_description.clone().unwrap_or_default(),
            members: rows,
        };
        form
    }

    /// Enable the client-side participant precheck, given the members registered in other groups
    pub fn with_participants_elsewhere(mut self, total: usize) -> Self {
        self.participants_elsewhere = Some(total);
        self
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn is_edit(&self) -> bool {
        self.existing_group_id.is_some()
    }

    pub fn existing_group_id(&self) -> Option<i64> {
        self.existing_group_id
    }

    /// Members counted against the limit, leader included
    pub fn member_count(&self) -> usize {
        usize::from(self.leader_row) + self.values.members.len()
    }

    pub fn can_add_member(&self) -> bool {
        (self.member_count() as i64) < i64::from(self.event.group_size_limit)
    }

    /// Append a blank row while below the group size limit
    pub fn add_member(&mut self) -> bool {
        if !self.can_add_member() {
            return false;
        }
        self.values.members.push(MemberRow::default());
        true
    }

    /// Remove a row; at least one member always remains
    pub fn remove_member(&mut self, index: usize) -> bool {
        if self.member_count() <= 1 || index >= self.values.members.len() {
            return false;
        }
        self.values.members.remove(index);
        true
    }

    pub fn members_label(&self) -> String {
        format!("{} / {} members", self.member_count(), self.event.group_size_limit)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Submitting..."
        } else if self.is_edit() {
            "Update Group"
        } else {
            "Register Group"
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// First error message for a field path such as `group_name` or `members[0].name`
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn error(&self) -> Option<&ErrorPanel> {
        self.error.as_ref()
    }

    /// Returns whether a scroll to the top was requested, clearing the request
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Payload sent to the API: rows in order, then the leader when it holds a slot
    pub fn to_request(&self) -> CreateGroupRequest {
        let values = &self.values;
        let mut members: Vec<NewMember> = values
            .members
            .iter()
            .map(|row| NewMember {
                name: row.name.trim().to_string(),
                email: non_blank(&row.email),
            })
            .collect();
        if self.leader_row {
            members.push(NewMember {
                name: values.creator_name.trim().to_string(),
                email: non_blank(&values.creator_email),
            });
        }

        CreateGroupRequest {
            event_id: self.event.id,
            creator_name: values.creator_name.trim().to_string(),
            creator_email: values.creator_email.trim().to_string(),
            group_name: values.group_name.trim().to_string(),
            accepts_others: values.accepts_others,
            project_description: non_blank(&values.project_description),
            members,
        }
    }

    /// Validate, then hand the payload to `handler`. Field values are kept on any failure.
    pub async fn submit<F, Fut>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(CreateGroupRequest) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let request = self.to_request();

        if let Err(errors) = check(&request) {
            self.field_errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.field_errors.clear();

        if let Some(panel) = self.participant_precheck(request.members.len()) {
            return self.reject(panel);
        }

        self.loading = true;
        self.error = None;
        let result = handler(request).await;
        self.loading = false;

        match result {
            Ok(()) => {
                info!(event_id = %self.event.id, edit = self.is_edit(), "Group form submitted");
                SubmitOutcome::Completed(Route::Event { event_id: self.event.id.to_string() })
            }
            Err(e) => {
                warn!(event_id = %self.event.id, error = %e, "Group submission rejected");
                self.reject(ErrorPanel::from_error(&e))
            }
        }
    }

    fn participant_precheck(&self, roster_len: usize) -> Option<ErrorPanel> {
        let elsewhere = self.participants_elsewhere?;
        let max = self.event.max_participants.max(0) as usize;
        if elsewhere + roster_len <= max {
            return None;
        }
        Some(ErrorPanel::from_error(&SignMeUpError::CapacityExceeded {
            limit: self.event.max_participants,
        }))
    }

    fn reject(&mut self, panel: ErrorPanel) -> SubmitOutcome {
        self.error = Some(panel.clone());
        self.scroll_requested = true;
        SubmitOutcome::Rejected(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, GroupMember};
    use assert_matches::assert_matches;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn event(group_size_limit: i32) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Game Jam".to_string(),
            date_time: Utc::now(),
            location: "Lab 3".to_string(),
            group_size_limit,
            max_participants: 50,
            created_at: Utc::now(),
        }
    }

    fn filled(limit: i32) -> GroupForm {
        let mut form = GroupForm::new(event(limit));
        form.values.creator_name = "Grace".to_string();
        form.values.creator_email = "grace@example.com".to_string();
        form.values.group_name = "Compilers".to_string();
        form
    }

    #[test]
    fn test_new_form_counts_leader() {
        let form = GroupForm::new(event(4));
        assert_eq!(form.member_count(), 1);
        assert_eq!(form.members_label(), "1 / 4 members");
        assert_eq!(form.submit_label(), "Register Group");
    }

    #[test]
    fn test_add_member_stops_at_limit() {
        let mut form = GroupForm::new(event(3));
        assert!(form.add_member());
        assert!(form.add_member());
        assert!(!form.add_member());
        assert_eq!(form.member_count(), 3);
        assert!(!form.can_add_member());
    }

    #[test]
    fn test_remove_last_member_is_noop() {
        let mut form = GroupForm::new(event(3));
        assert!(!form.remove_member(0));
        form.add_member();
        assert!(form.remove_member(0));
        assert_eq!(form.member_count(), 1);
    }

    #[test]
    fn test_existing_group_prefill() {
        let group = GroupWithMembers {
            group: Group {
                id: 7,
                event_id: Uuid::new_v4(),
                creator_name: "Grace".to_string(),
                creator_email: "grace@example.com".to_string(),
                group_name: "Compilers".to_string(),
                accepts_others: true,
                project_description: None,
                created_at: Utc::now(),
            },
            members: vec![
                GroupMember { id: 1, group_id: 7, name: "Alan".to_string(), email: None },
                GroupMember { id: 2, group_id: 7, name: "Grace".to_string(), email: Some("grace@example.com".to_string()) },
            ],
        };

        let form = GroupForm::for_existing(event(5), &group);
        assert_eq!(form.member_count(), 2);
        assert_eq!(form.values.members[0].name, "Alan");
        assert_eq!(form.submit_label(), "Update Group");
    }

    #[test]
    fn test_roster_without_leader_row_is_kept_whole() {
        let group = GroupWithMembers {
            group: Group {
                id: 9,
                event_id: Uuid::new_v4(),
                creator_name: "Grace".to_string(),
                creator_email: "grace@example.com".to_string(),
                group_name: "Compilers".to_string(),
                accepts_others: true,
                project_description: None,
                created_at: Utc::now(),
            },
            members: ["Alan", "Barbara", "Claude"]
                .iter()
                .enumerate()
                .map(|(i, name)| GroupMember { id: i as i64 + 1, group_id: 9, name: name.to_string(), email: None })
                .collect(),
        };

        let mut form = GroupForm::for_existing(event(3), &group);
        assert_eq!(form.member_count(), 3);
        assert!(!form.can_add_member());

        let names: Vec<_> = form.to_request().members.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Alan", "Barbara", "Claude"]);

        assert!(form.remove_member(2));
        assert!(form.remove_member(1));
        assert!(!form.remove_member(0));
        assert_eq!(form.member_count(), 1);
    }

    #[test]
    fn test_request_appends_leader_last() {
        let mut form = filled(4);
        form.add_member();
        form.values.members[0] = MemberRow { name: "Alan".to_string(), email: " ".to_string() };

        let request = form.to_request();
        assert_eq!(request.members.len(), 2);
        assert_eq!(request.members[0].email, None);
        assert_eq!(request.members[1].name, "Grace");
        assert_eq!(request.project_description, None);
    }

    #[tokio::test]
    async fn test_invalid_form_does_not_call_handler() {
        let mut form = GroupForm::new(event(3));
        let mut called = false;
        let outcome = form
            .submit(|_| {
                called = true;
                async { Ok::<(), SignMeUpError>(()) }
            })
            .await;
        assert!(!called);
        assert_matches!(outcome, SubmitOutcome::Invalid(errors) if !errors.is_empty());
        assert!(form.field_error("group_name").is_some());
    }

    #[tokio::test]
    async fn test_rejection_sets_panel_and_scroll() {
        let mut form = filled(3);
        let outcome = form
            .submit(|_| async {
                Err::<(), _>(SignMeUpError::Api { status: 409, message: "Group size limit of 3 exceeded".to_string() })
            })
            .await;

        assert_matches!(outcome, SubmitOutcome::Rejected(ErrorPanel { hint: RejectionHint::GroupSizeLimit, .. }));
        assert!(form.take_scroll_request());
        assert!(!form.take_scroll_request());
        assert_eq!(form.values.group_name, "Compilers");
    }

    #[tokio::test]
    async fn test_participant_precheck() {
        let mut form = filled(5).with_participants_elsewhere(50);
        let outcome = form.submit(|_| async { Ok::<(), SignMeUpError>(()) }).await;
        assert_matches!(outcome, SubmitOutcome::Rejected(ErrorPanel { hint: RejectionHint::ParticipantLimit, .. }));
    }

    #[test]
    fn test_hint_matching() {
        assert_eq!(
            RejectionHint::from_message("Event has reached its maximum participant limit of 10"),
            RejectionHint::ParticipantLimit
        );
        assert_eq!(RejectionHint::from_message("Group Size Limit of 3 exceeded"), RejectionHint::GroupSizeLimit);
        assert_eq!(RejectionHint::from_message("boom"), RejectionHint::Other);
        assert!(RejectionHint::Other.remediation().is_none());
    }

    proptest! {
        #[test]
        fn prop_member_count_stays_clamped(limit in 1i32..=10, ops in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut form = GroupForm::new(event(limit));
            for add in ops {
                if add { form.add_member(); } else { form.remove_member(0); }
                prop_assert!(form.member_count() >= 1);
                prop_assert!(form.member_count() <= limit as usize);
            }
        }
    }
}
