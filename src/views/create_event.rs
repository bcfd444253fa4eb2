//! Create-event form

use std::future::Future;
use chrono::Utc;
use tracing::{info, warn};
use crate::models::{CreateEventRequest, Event};
use crate::utils::errors::Result;
use crate::utils::helpers::{normalize_whitespace, parse_datetime_input};
use crate::validation::{check, FieldError};
use super::group_form::{ErrorPanel, SubmitOutcome};
use super::routes::Route;

pub const DEFAULT_GROUP_SIZE_LIMIT: i32 = 5;
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventValues {
    pub name: String,
    /// Date and time as typed, e.g. `2025-06-01T18:30`
    pub date_time: String,
    pub location: String,
    pub group_size_limit: i32,
    pub max_participants: i32,
}

impl Default for CreateEventValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            date_time: String::new(),
            location: String::new(),
            group_size_limit: DEFAULT_GROUP_SIZE_LIMIT,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateEventForm {
    pub values: CreateEventValues,
    field_errors: Vec<FieldError>,
    error: Option<ErrorPanel>,
    loading: bool,
}

impl CreateEventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn error(&self) -> Option<&ErrorPanel> {
        self.error.as_ref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Creating..."
        } else {
            "Create Event"
        }
    }

    /// Build the request, collecting every field error including an unparsable date
    pub fn to_request(&self) -> std::result::Result<CreateEventRequest, Vec<FieldError>> {
        let values = &self.values;
        let date_time = parse_datetime_input(&values.date_time);

        let request = CreateEventRequest {
            name: normalize_whitespace(&values.name),
            date_time: date_time.unwrap_or_else(Utc::now),
            location: normalize_whitespace(&values.location),
            group_size_limit: values.group_size_limit,
            max_participants: values.max_participants,
        };

        let mut errors = check(&request).err().unwrap_or_default();
        if date_time.is_none() {
            errors.push(FieldError {
                field: "date_time".to_string(),
                message: "Please enter a valid date and time".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }

    /// Validate and hand the request to `handler`; navigates to the new event on success
    pub async fn submit<F, Fut>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(CreateEventRequest) -> Fut,
        Fut: Future<Output = Result<Event>>,
    {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(errors) => {
                self.field_errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.field_errors.clear();

        self.loading = true;
        self.error = None;
        let result = handler(request).await;
        self.loading = false;

        match result {
            Ok(event) => {
                info!(event_id = %event.id, "Event created");
                SubmitOutcome::Completed(Route::Event { event_id: event.id.to_string() })
            }
            Err(e) => {
                warn!(error = %e, "Failed to create event");
                let panel = ErrorPanel::from_error(&e);
                self.error = Some(panel.clone());
                SubmitOutcome::Rejected(panel)
            }
        }
    }
}
