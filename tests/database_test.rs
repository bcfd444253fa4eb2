//! Storage and capacity tests against PostgreSQL
//!
//! These need Docker or `TEST_DATABASE_URL`; run with `cargo test -- --ignored`.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use signmeup::database::DatabaseService;
use signmeup::models::{AddMemberRequest, NewMember, UpdateGroupRequest};
use signmeup::services::RegistrationService;
use signmeup::SignMeUpError;

async fn setup() -> (TestDatabase, RegistrationService) {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let service = RegistrationService::new(DatabaseService::new(db.pool.clone()));
    (db, service)
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_event_lifecycle() {
    let (_db, service) = setup().await;

    let event = service.create_event(create_event_request(4, 40)).await.unwrap();
    let fetched = service.get_event(&event.id.to_string()).await.unwrap();
    assert_eq!(fetched.name, "Community Hack Day");

    service.delete_event(&event.id.to_string()).await.unwrap();
    assert_matches!(
        service.get_event(&event.id.to_string()).await,
        Err(SignMeUpError::EventNotFound { .. })
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_group_roster_keeps_order() {
    let (_db, service) = setup().await;
    let event = service.create_event(create_event_request(4, 40)).await.unwrap();

    let mut request = create_group_request(event.id, "Ordered", 3);
    request.members[1].email = Some("  ".to_string());
    request.project_description = Some("   ".to_string());
    let group = service.create_group(request).await.unwrap();

    let names: Vec<_> = group.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Member 1", "Member 2", "Member 3"]);
    assert_eq!(group.members[1].email, None);
    assert_eq!(group.group.project_description, None);

    let listed = service.list_event_groups(&event.id.to_string()).await.unwrap();
    assert_eq!(listed, vec![group]);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_group_size_limit_is_enforced() {
    let (db, service) = setup().await;
    let event = service.create_event(create_event_request(3, 40)).await.unwrap();

    let err = service
        .create_group(create_group_request(event.id, "Too Big", 4))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Group size limit"));
    assert_eq!(db.member_rows(event.id).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_participant_cap_is_enforced() {
    let (db, service) = setup().await;
    let event = service.create_event(create_event_request(5, 8)).await.unwrap();

    service.create_group(create_group_request(event.id, "First", 5)).await.unwrap();
    let err = service
        .create_group(create_group_request(event.id, "Second", 4))
        .await
        .unwrap_err();

    assert_matches!(err, SignMeUpError::CapacityExceeded { limit: 8 });
    assert!(err.to_string().contains("maximum participant limit"));
    assert_eq!(db.member_rows(event.id).await.unwrap(), 5);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_update_excludes_own_roster_from_count() {
    let (db, service) = setup().await;
    let event = service.create_event(create_event_request(5, 8)).await.unwrap();

    let first = service.create_group(create_group_request(event.id, "First", 5)).await.unwrap();
    service.create_group(create_group_request(event.id, "Second", 3)).await.unwrap();

    // shrinking and re-growing the full group within its own seats is allowed
    let roster = vec![
        NewMember { name: "Replacement One".to_string(), email: None },
        NewMember { name: "Replacement Two".to_string(), email: None },
    ];
    let updated = service
        .update_group(first.id(), UpdateGroupRequest { members: Some(roster), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.member_count(), 2);
    assert_eq!(updated.group.group_name, "First");

    let too_many: Vec<_> = (0..6)
        .map(|i| NewMember { name: format!("Extra {}", i), email: None })
        .collect();
    let err = service
        .update_group(first.id(), UpdateGroupRequest { members: Some(too_many), ..Default::default() })
        .await
        .unwrap_err();
    assert_matches!(err, SignMeUpError::GroupSizeExceeded { limit: 5 });
    assert_eq!(db.member_rows(event.id).await.unwrap(), 5);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_add_member_rules() {
    let (_db, service) = setup().await;
    let event = service.create_event(create_event_request(3, 40)).await.unwrap();

    let open = service.create_group(create_group_request(event.id, "Open", 2)).await.unwrap();
    let mut closed_request = create_group_request(event.id, "Closed", 1);
    closed_request.accepts_others = false;
    let closed = service.create_group(closed_request).await.unwrap();

    let member = service
        .add_member(AddMemberRequest { group_id: open.id(), name: "Newcomer".to_string(), email: None })
        .await
        .unwrap();
    assert_eq!(member.group_id, open.id());

    assert_matches!(
        service
            .add_member(AddMemberRequest { group_id: open.id(), name: "One Too Many".to_string(), email: None })
            .await,
        Err(SignMeUpError::GroupSizeExceeded { limit: 3 })
    );
    assert_matches!(
        service
            .add_member(AddMemberRequest { group_id: closed.id(), name: "Outsider".to_string(), email: None })
            .await,
        Err(SignMeUpError::GroupClosed { .. })
    );

    service.remove_member(member.id).await.unwrap();
    assert_eq!(service.list_group_members(open.id()).await.unwrap().len(), 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_registrations_respect_cap() {
    let (db, service) = setup().await;
    let event = service.create_event(create_event_request(2, 6)).await.unwrap();

    let attempts: Vec<_> = (0..6)
        .map(|i| {
            let service = service.clone();
            let request = create_group_request(event.id, &format!("Team {}", i), 2);
            tokio::spawn(async move { service.create_group(request).await })
        })
        .collect();

    let mut accepted = 0;
    for attempt in attempts {
        if attempt.await.unwrap().is_ok() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 3);
    assert_eq!(db.member_rows(event.id).await.unwrap(), 6);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL"]
async fn test_deleting_group_frees_seats() {
    let (_db, service) = setup().await;
    let event = service.create_event(create_event_request(4, 4)).await.unwrap();

    let group = service.create_group(create_group_request(event.id, "Seat Holders", 4)).await.unwrap();
    service.delete_group(group.id()).await.unwrap();

    assert_matches!(service.get_group(group.id()).await, Err(SignMeUpError::GroupNotFound { .. }));
    assert!(service.create_group(create_group_request(event.id, "Next", 4)).await.is_ok());
}
