use std::time::Duration;

use pretty_assertions::assert_eq;
use rosterbox::{
    ClientError, Credentials, DashboardStats, MemoryTransport, NewSlot, RosterClient,
    SlotStatus, VolunteerUpdate,
};
use serde_json::json;

fn seeded() -> MemoryTransport {
    MemoryTransport::new().with_volunteers([
        json!({"id": 1, "first_name": "Anna", "last_name": "Bos", "is_active": true}),
        json!({"id": 2, "full_name": "Bram de Vries", "status": "inactive", "points": "15"}),
    ])
}

fn new_slot(volunteer_id: u64) -> NewSlot {
    NewSlot {
        volunteer_id,
        date: "2025-05-01".to_owned(),
        time: "09:00".to_owned(),
        description: "Bar".to_owned(),
        status: SlotStatus::Pending,
        task_template_id: None,
    }
}

#[tokio::test]
async fn test_login_stores_token_and_logout_clears_it() {
    let client = RosterClient::new(MemoryTransport::new());

    let token = client
        .auth()
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap();
    assert_eq!(token.access_token, MemoryTransport::TOKEN);
    assert_eq!(
        client.session().authorization(),
        Some(format!("Bearer {}", MemoryTransport::TOKEN))
    );

    client.auth().logout();
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn test_volunteer_mapping_over_local_store() {
    let client = RosterClient::new(seeded());

    let everyone = client.volunteers().all().await.unwrap();
    let names: Vec<&str> = everyone.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Anna Bos", "Bram de Vries"]);
    assert!(!everyone[1].is_active);
    assert_eq!(everyone[1].total_points, 15);
}

#[tokio::test]
async fn test_missing_volunteer_is_not_found() {
    let client = RosterClient::new(seeded());

    let err = client
        .volunteers()
        .update(42, &VolunteerUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "volunteer 42 not found");

    let err = client.volunteers().delete(42).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { id: 42, .. }));
}

#[tokio::test]
async fn test_update_and_delete_volunteer() {
    let store = seeded();
    let client = RosterClient::new(store.clone());

    let update = VolunteerUpdate {
        phone: Some("0612345678".to_owned()),
        ..Default::default()
    };
    let updated = client.volunteers().update(1, &update).await.unwrap();
    assert_eq!(updated.phone.as_deref(), Some("0612345678"));
    assert_eq!(updated.name, "Anna Bos");

    client.volunteers().delete(2).await.unwrap();
    assert_eq!(store.volunteer(2), None);
}

#[tokio::test]
async fn test_slot_lifecycle_keeps_bookings_in_step() {
    let store = seeded();
    let client = RosterClient::new(store.clone());

    let created = client.slots().create(&new_slot(1)).await.unwrap();
    assert_eq!(created.volunteer_id, Some(1));
    assert_eq!(store.volunteer(1).unwrap()["booked_slots"], json!(1));

    let mine = client.slots().for_volunteer(1).await.unwrap();
    assert_eq!(mine, vec![created.clone()]);

    let confirmed = client
        .slots()
        .update(
            created.id,
            &rosterbox::SlotUpdate {
                status: Some(SlotStatus::Confirmed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.status, SlotStatus::Confirmed);

    let receipt = client.slots().send_whatsapp(created.id).await.unwrap();
    assert_eq!(receipt.message, "WhatsApp reminder sent successfully!");

    client.slots().delete(created.id).await.unwrap();
    assert_eq!(store.volunteer(1).unwrap()["booked_slots"], json!(0));
    let err = client.slots().delete(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_dashboard_from_local_records() {
    let client = RosterClient::new(seeded());
    client.slots().create(&new_slot(2)).await.unwrap();

    let volunteers = client.volunteers().all().await.unwrap();
    let slots = client.slots().list().await.unwrap();
    let stats = DashboardStats::from_records(&volunteers, &slots);
    assert_eq!(stats.total_volunteers, 2);
    assert_eq!(stats.booked_volunteers, 1);
    assert_eq!(stats.active_volunteers, 1);
    assert_eq!(stats.slots_with(SlotStatus::Pending), 1);
}

#[tokio::test]
async fn test_latency_does_not_break_deduplication() {
    let store = seeded().with_latency(Duration::from_millis(20));
    let client = RosterClient::new(store.clone());

    let (first, second) = (client.volunteers(), client.volunteers());
    let (a, b) = tokio::join!(first.list(0, 10), second.list(0, 10));
    assert_eq!(a.unwrap().len(), 2);
    assert_eq!(b.unwrap().len(), 2);
    assert_eq!(store.request_count(), 1);
}
