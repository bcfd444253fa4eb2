//! Member handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use crate::models::{AddMemberRequest, GroupMember};
use crate::services::ServiceFactory;
use super::extract::{ApiJson, ApiPath};
use crate::utils::errors::Result;

pub async fn add_member(
    State(services): State<ServiceFactory>,
    ApiJson(request): ApiJson<AddMemberRequest>,
) -> Result<Json<GroupMember>> {
    let member = services.registration.add_member(request).await?;
    Ok(Json(member))
}

pub async fn remove_member(
    State(services): State<ServiceFactory>,
    ApiPath(member_id): ApiPath<i64>,
) -> Result<StatusCode> {
    services.registration.remove_member(member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
