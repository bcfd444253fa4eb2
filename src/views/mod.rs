//! Headless view models for the registration client
//!
//! Each screen keeps its own state and talks to the API through
//! [`ApiClient`](crate::client::ApiClient). Nothing is shared between screens.

pub mod create_event;
pub mod delete_dialog;
pub mod edit_group;
pub mod event_view;
pub mod group_form;
pub mod register;
pub mod routes;

pub use create_event::{CreateEventForm, CreateEventValues};
pub use delete_dialog::DeleteGroupDialog;
pub use edit_group::{EditGroupPage, EditGroupState};
pub use event_view::{EventView, GridPreview, Modal, StatusFilter, ViewMode};
pub use group_form::{ErrorPanel, GroupForm, GroupFormValues, MemberRow, RejectionHint, SubmitOutcome};
pub use register::RegisterPage;
pub use routes::Route;
