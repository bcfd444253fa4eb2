//! Event handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use crate::models::{Event, CreateEventRequest, ListEventsQuery, GroupWithMembers};
use crate::services::ServiceFactory;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::errors::Result;

pub async fn list_events(
    State(services): State<ServiceFactory>,
    ApiQuery(query): ApiQuery<ListEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let events = services.registration.list_events(&query).await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(services): State<ServiceFactory>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<Json<Event>> {
    let event = services.registration.create_event(request).await?;
    Ok(Json(event))
}

pub async fn get_event(
    State(services): State<ServiceFactory>,
    ApiPath(event_id): ApiPath<String>,
) -> Result<Json<Event>> {
    let event = services.registration.get_event(&event_id).await?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(services): State<ServiceFactory>,
    ApiPath(event_id): ApiPath<String>,
) -> Result<StatusCode> {
    services.registration.delete_event(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Groups of an event, each with its roster
pub async fn list_event_groups(
    State(services): State<ServiceFactory>,
    ApiPath(event_id): ApiPath<String>,
) -> Result<Json<Vec<GroupWithMembers>>> {
    let groups = services.registration.list_event_groups(&event_id).await?;
    Ok(Json(groups))
}
