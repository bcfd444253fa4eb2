//! Register page reached through `/event/{eventId}/register`

use tracing::warn;
use crate::client::ApiClient;
use crate::utils::errors::Result;
use super::event_view::total_participants;
use super::group_form::{GroupForm, SubmitOutcome};

#[derive(Debug, Clone)]
pub struct RegisterPage {
    client: ApiClient,
    pub form: GroupForm,
}

impl RegisterPage {
    pub async fn load(client: ApiClient, event_id: &str) -> Result<Self> {
        let event = client.get_event(event_id).await?;

        let form = match client.get_groups(event_id).await {
            Ok(groups) => GroupForm::new(event).with_participants_elsewhere(total_participants(&groups)),
            Err(e) => {
                // the service still enforces the cap
                warn!(event_id = event_id, error = %e, "Could not load groups for participant precheck");
                GroupForm::new(event)
            }
        };

        Ok(Self { client, form })
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let client = self.client.clone();
        self.form
            .submit(|request| async move { client.create_group(&request).await.map(|_| ()) })
            .await
    }
}
