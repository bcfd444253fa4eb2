//! Request validation
//!
//! The request models derive `validator::Validate`; this module holds the
//! struct-level rules they reference and turns `ValidationErrors` into
//! readable per-field messages shared by the service and the forms.

use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors, ValidationErrorsKind};
use crate::models::{AddMemberRequest, CreateEventRequest, NewMember, UpdateGroupRequest};
use crate::utils::errors::{Result, SignMeUpError};

/// A single failed rule, addressed by a dotted/indexed field path such as `members[1].name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a request and flatten any failures into [`FieldError`]s
pub fn check<T: Validate>(request: &T) -> std::result::Result<(), Vec<FieldError>> {
    request.validate().map_err(|errors| flatten_errors(&errors))
}

/// Validate a request, mapping failures to [`SignMeUpError::Validation`]
pub fn ensure_valid<T: Validate>(request: &T) -> Result<()> {
    check(request).map_err(|errors| SignMeUpError::Validation(describe(&errors)))
}

/// Join field errors into one sentence list
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten nested validation errors, sorted by field path
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = BTreeMap::new();
    collect(errors, "", &mut collected);
    collected
        .into_iter()
        .flat_map(|(field, messages): (String, Vec<String>)| {
            messages
                .into_iter()
                .map(move |message| FieldError { field: field.clone(), message })
        })
        .collect()
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (name, kind) in errors.errors() {
        let path = join_path(prefix, name);
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let entry = out.entry(path).or_default();
                entry.extend(field_errors.iter().map(message_of));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name) {
        (true, name) => name.to_string(),
        // struct-level errors belong to the enclosing path
        (false, "__all__") => prefix.to_string(),
        (false, name) => format!("{}.{}", prefix, name),
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid value ({})", error.code))
}

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// An optional email passes when absent, blank, or well-formed
pub fn is_valid_optional_email(email: Option<&str>) -> bool {
    match email.map(str::trim) {
        None | Some("") => true,
        Some(email) => email.validate_email(),
    }
}

/// Event-wide cap must leave room for at least one full group
pub fn validate_event_capacity(request: &CreateEventRequest) -> std::result::Result<(), ValidationError> {
    if request.max_participants < request.group_size_limit {
        return Err(error_with_message(
            "capacity",
            "Maximum participants must be at least the group size limit".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_new_member_email(member: &NewMember) -> std::result::Result<(), ValidationError> {
    if is_valid_optional_email(member.email.as_deref()) {
        Ok(())
    } else {
        Err(error_with_message("email", "Please enter a valid email address".to_string()))
    }
}

pub fn validate_added_member_email(member: &AddMemberRequest) -> std::result::Result<(), ValidationError> {
    if is_valid_optional_email(member.email.as_deref()) {
        Ok(())
    } else {
        Err(error_with_message("email", "Please enter a valid email address".to_string()))
    }
}

/// Roster entries of a partial update follow the same rules as on creation
pub fn validate_update_members(request: &UpdateGroupRequest) -> std::result::Result<(), ValidationError> {
    let Some(members) = &request.members else {
        return Ok(());
    };

    for (index, member) in members.iter().enumerate() {
        if let Err(errors) = member.validate() {
            let detail = describe(&flatten_errors(&errors));
            return Err(error_with_message("members", format!("Member {}: {}", index + 1, detail)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateGroupRequest;
    use chrono::Utc;
    use uuid::Uuid;

    fn event_request() -> CreateEventRequest {
        CreateEventRequest {
            name: "Rust Hack Night".to_string(),
            date_time: Utc::now(),
            location: "Main Hall".to_string(),
            group_size_limit: 4,
            max_participants: 40,
        }
    }

    fn group_request() -> CreateGroupRequest {
        CreateGroupRequest {
            event_id: Uuid::new_v4(),
            creator_name: "Ada".to_string(),
            creator_email: "ada@example.com".to_string(),
            group_name: "Engines".to_string(),
            accepts_others: true,
            project_description: None,
            members: vec![NewMember { name: "Charles".to_string(), email: None }],
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert!(check(&event_request()).is_ok());
    }

    #[test]
    fn test_event_field_rules() {
        let mut request = event_request();
        request.name = "ab".to_string();
        request.group_size_limit = 0;
        let errors = check(&request).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"group_size_limit"));
    }

    #[test]
    fn test_event_cap_below_group_limit_is_rejected() {
        let mut request = event_request();
        request.group_size_limit = 10;
        request.max_participants = 5;
        let errors = check(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "__all__");
    }

    #[test]
    fn test_member_errors_are_indexed() {
        let mut request = group_request();
        request.members.push(NewMember { name: "B".to_string(), email: Some("nope".to_string()) });
        let errors = check(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "members[1].name"));
        assert!(errors
            .iter()
            .any(|e| e.field == "members[1]" && e.message == "Please enter a valid email address"));
    }

    #[test]
    fn test_blank_member_email_is_allowed() {
        let mut request = group_request();
        request.members[0].email = Some(String::new());
        assert!(check(&request).is_ok());
    }

    #[test]
    fn test_creator_email_is_required() {
        let mut request = group_request();
        request.creator_email = "not-an-email".to_string();
        let err = ensure_valid(&request).unwrap_err();
        assert!(err.to_string().contains("valid email"));
    }

    #[test]
    fn test_whitespace_only_names_fail_once_trimmed() {
        let mut request = group_request();
        request.creator_name = "    ".to_string();
        request.group_name = "   ".to_string();
        request.members[0].name = "   ".to_string();
        let errors = check(&request.trimmed()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"creator_name"));
        assert!(fields.contains(&"group_name"));
        assert!(fields.contains(&"members[0].name"));

        let added = AddMemberRequest { group_id: 1, name: "  x ".to_string(), email: None };
        assert!(ensure_valid(&added.trimmed()).is_err());

        let update = UpdateGroupRequest {
            group_name: Some("  ".to_string()),
            members: Some(vec![NewMember { name: " \t ".to_string(), email: None }]),
            ..Default::default()
        };
        assert!(ensure_valid(&update.trimmed()).is_err());

        let mut event = event_request();
        event.name = "  ab  ".to_string();
        assert!(ensure_valid(&event.trimmed()).is_err());
    }

    #[test]
    fn test_padded_names_are_stored_trimmed() {
        let mut request = group_request();
        request.creator_name = "  Ada  ".to_string();
        request.members[0].name = " Charles ".to_string();
        let request = request.trimmed();
        assert!(check(&request).is_ok());
        assert_eq!(request.creator_name, "Ada");
        assert_eq!(request.members[0].name, "Charles");
    }

    #[test]
    fn test_update_members_are_checked() {
        let update = UpdateGroupRequest {
            members: Some(vec![NewMember { name: "X".to_string(), email: None }]),
            ..Default::default()
        };
        let err = ensure_valid(&update).unwrap_err();
        assert!(err.to_string().starts_with("Member 1:"));
    }
}
