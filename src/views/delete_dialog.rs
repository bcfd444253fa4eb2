//! Typed-name confirmation dialog for deleting a group

use std::future::Future;
use tracing::warn;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Default)]
pub struct DeleteGroupDialog {
    group_id: i64,
    group_name: String,
    open: bool,
    pub confirm_text: String,
    deleting: bool,
    error: Option<String>,
}

impl DeleteGroupDialog {
    /// Open the dialog for a group; any previous confirmation text and error are cleared
    pub fn open(group_id: i64, group_name: impl Into<String>) -> Self {
        Self {
            group_id,
            group_name: group_name.into(),
            open: true,
            ..Self::default()
        }
    }

    /// Reopen for the same group
    pub fn reopen(&mut self) {
        self.open = true;
        self.confirm_text.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        if !self.deleting {
            self.open = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enabled only when the typed text matches the group name exactly
    pub fn can_confirm(&self) -> bool {
        !self.deleting && self.confirm_text == self.group_name
    }

    pub fn delete_label(&self) -> &'static str {
        if self.deleting {
            "Deleting..."
        } else {
            "Delete Group"
        }
    }

    /// Run the delete callback; closes on success and keeps the message inline on failure
    pub async fn confirm<F, Fut>(&mut self, on_confirm: F) -> bool
    where
        F: FnOnce(i64) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if !self.can_confirm() {
            return false;
        }

        self.deleting = true;
        self.error = None;
        let result = on_confirm(self.group_id).await;
        self.deleting = false;

        match result {
            Ok(()) => {
                self.open = false;
                true
            }
            Err(e) => {
                warn!(group_id = self.group_id, error = %e, "Failed to delete group");
                self.error = Some(e.user_message());
                false
            }
        }
    }
}
