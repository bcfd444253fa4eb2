//! Test data helpers for creating test objects
//!
//! This module provides builders for events, groups and members with
//! realistic fake names and emails.

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use signmeup::models::{CreateEventRequest, CreateGroupRequest, Event, Group, GroupMember, GroupWithMembers, NewMember};
use uuid::Uuid;

/// Event with the given capacity limits
pub fn create_test_event(group_size_limit: i32, max_participants: i32) -> Event {
    Event {
        id: Uuid::new_v4(),
        name: "Community Hack Day".to_string(),
        date_time: Utc::now() + Duration::days(14),
        location: "Innovation Hub, Room 2".to_string(),
        group_size_limit,
        max_participants,
        created_at: Utc::now(),
    }
}

pub fn create_event_request(group_size_limit: i32, max_participants: i32) -> CreateEventRequest {
    CreateEventRequest {
        name: "Community Hack Day".to_string(),
        date_time: Utc::now() + Duration::days(14),
        location: "Innovation Hub, Room 2".to_string(),
        group_size_limit,
        max_participants,
    }
}

/// Group with `member_count` members; the last member is the leader
pub fn create_test_group(id: i64, event: &Event, group_name: &str, accepts_others: bool, member_count: usize) -> GroupWithMembers {
    let creator_name: String = Name().fake();
    let creator_email: String = SafeEmail().fake();

    let mut members: Vec<GroupMember> = (1..member_count)
        .map(|i| GroupMember {
            id: id * 1000 + i as i64,
            group_id: id,
            name: Name().fake(),
            email: None,
        })
        .collect();
    if member_count > 0 {
        members.push(GroupMember {
            id: id * 1000,
            group_id: id,
            name: creator_name.clone(),
            email: Some(creator_email.clone()),
        });
    }

    GroupWithMembers {
        group: Group {
            id,
            event_id: event.id,
            creator_name,
            creator_email,
            group_name: group_name.to_string(),
            accepts_others,
            project_description: Some(format!("{} builds something useful", group_name)),
            created_at: Utc::now(),
        },
        members,
    }
}

/// Create-group payload with `member_count` roster entries
pub fn create_group_request(event_id: Uuid, group_name: &str, member_count: usize) -> CreateGroupRequest {
    CreateGroupRequest {
        event_id,
        creator_name: "Katherine Johnson".to_string(),
        creator_email: "katherine@example.com".to_string(),
        group_name: group_name.to_string(),
        accepts_others: true,
        project_description: None,
        members: (0..member_count)
            .map(|i| NewMember {
                name: format!("Member {}", i + 1),
                email: None,
            })
            .collect(),
    }
}
