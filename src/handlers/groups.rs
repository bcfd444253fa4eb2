//! Group handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use crate::models::{GroupMember, GroupWithMembers, CreateGroupRequest, UpdateGroupRequest};
use crate::services::ServiceFactory;
use super::extract::{ApiJson, ApiPath};
use crate::utils::errors::Result;

pub async fn create_group(
    State(services): State<ServiceFactory>,
    ApiJson(request): ApiJson<CreateGroupRequest>,
) -> Result<Json<GroupWithMembers>> {
    let group = services.registration.create_group(request).await?;
    Ok(Json(group))
}

pub async fn get_group(
    State(services): State<ServiceFactory>,
    ApiPath(group_id): ApiPath<i64>,
) -> Result<Json<GroupWithMembers>> {
    let group = services.registration.get_group(group_id).await?;
    Ok(Json(group))
}

pub async fn update_group(
    State(services): State<ServiceFactory>,
    ApiPath(group_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateGroupRequest>,
) -> Result<Json<GroupWithMembers>> {
    let group = services.registration.update_group(group_id, request).await?;
    Ok(Json(group))
}

pub async fn delete_group(
    State(services): State<ServiceFactory>,
    ApiPath(group_id): ApiPath<i64>,
) -> Result<StatusCode> {
    services.registration.delete_group(group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_group_members(
    State(services): State<ServiceFactory>,
    ApiPath(group_id): ApiPath<i64>,
) -> Result<Json<Vec<GroupMember>>> {
    let members = services.registration.list_group_members(group_id).await?;
    Ok(Json(members))
}
