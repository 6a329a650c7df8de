//! Ordering protocol tests
//!
//! Exercise the ordered-collection engine through the entity repositories
//! against an in-memory database: density, append, compaction, moves,
//! partition transfer and concurrent deletes.

use cms_server::db::DbService;
use cms_server::db::models::{Event, EventCreate, ImageRef, StyledText};
use cms_server::db::repository::{EventRepository, RepoError};

fn styled(text: &str) -> StyledText {
    StyledText { text: text.to_string(), color: "#606161".to_string() }
}

fn payload(title: &str) -> EventCreate {
    EventCreate {
        title: styled(title),
        description: styled("an event"),
        date: styled("June 1, 2026"),
        cover_image: ImageRef { url: "https://img.example.org/cover.jpg".to_string(), alt: String::new() },
        content_area_color: None,
        url: None,
        is_active: None,
    }
}

async fn repo() -> EventRepository {
    let db = DbService::memory().await.unwrap();
    EventRepository::new(db.db)
}

fn key(event: &Event) -> String {
    event.id.as_ref().unwrap().id.to_string()
}

fn orders(events: &[Event]) -> Vec<i64> {
    events.iter().map(|e| e.sort_order).collect()
}

fn titles(events: &[Event]) -> Vec<String> {
    events.iter().map(|e| e.title.text.clone()).collect()
}

/// Density invariant: active orders are exactly 0..n-1.
fn assert_dense(events: &[Event]) {
    let mut sorted = orders(events);
    sorted.sort_unstable();
    let expected: Vec<i64> = (0..events.len() as i64).collect();
    assert_eq!(sorted, expected, "orders not dense: {:?}", orders(events));
}

async fn seed(repo: &EventRepository, n: usize) -> Vec<Event> {
    let mut created = Vec::new();
    for i in 0..n {
        created.push(repo.create(payload(&format!("event-{i}"))).await.unwrap());
    }
    created
}

#[tokio::test]
async fn create_appends_at_partition_size() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;
    assert_eq!(orders(&created), vec![0, 1, 2]);

    // a fourth creation lands at the end
    let fourth = repo.create(payload("event-3")).await.unwrap();
    assert_eq!(fourth.sort_order, 3);
    assert_dense(&repo.find_active().await.unwrap());
}

#[tokio::test]
async fn create_inactive_is_parked_not_ordered() {
    let repo = repo().await;
    seed(&repo, 2).await;

    let mut parked = payload("draft");
    parked.is_active = Some(false);
    let created = repo.create(parked).await.unwrap();
    assert_eq!(created.sort_order, -1);
    assert!(!created.is_active);

    // the active partition is untouched
    let active = repo.find_active().await.unwrap();
    assert_eq!(orders(&active), vec![0, 1]);

    // admin listing shows actives first, then the parked record
    let admin = repo.find_admin().await.unwrap();
    assert_eq!(admin.len(), 3);
    assert_eq!(admin[2].title.text, "draft");
}

#[tokio::test]
async fn delete_compacts_higher_siblings() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;

    // delete the middle record
    repo.delete(&key(&created[1])).await.unwrap();

    let remaining = repo.find_active().await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(orders(&remaining), vec![0, 1]);
    // order 0 kept its position, the old order 2 moved down
    assert_eq!(titles(&remaining), vec!["event-0", "event-2"]);
}

#[tokio::test]
async fn delete_below_leaves_upper_orders_shifted_only() {
    let repo = repo().await;
    let created = seed(&repo, 5).await;

    repo.delete(&key(&created[0])).await.unwrap();

    let remaining = repo.find_active().await.unwrap();
    assert_eq!(titles(&remaining), vec!["event-1", "event-2", "event-3", "event-4"]);
    assert_eq!(orders(&remaining), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let repo = repo().await;
    seed(&repo, 1).await;
    assert!(matches!(
        repo.delete("does-not-exist").await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn move_to_front_shifts_exactly_the_range() {
    let repo = repo().await;
    let created = seed(&repo, 4).await;

    // move the record at order 3 to position 0
    repo.reorder(&key(&created[3]), 0).await.unwrap();

    let active = repo.find_active().await.unwrap();
    assert_eq!(
        titles(&active),
        vec!["event-3", "event-0", "event-1", "event-2"]
    );
    assert_dense(&active);
}

#[tokio::test]
async fn move_to_back_shifts_exactly_the_range() {
    let repo = repo().await;
    let created = seed(&repo, 5).await;

    repo.reorder(&key(&created[1]), 3).await.unwrap();

    let active = repo.find_active().await.unwrap();
    assert_eq!(
        titles(&active),
        vec!["event-0", "event-2", "event-3", "event-1", "event-4"]
    );
    // records outside (1, 3] never moved
    assert_eq!(active[0].title.text, "event-0");
    assert_eq!(active[4].title.text, "event-4");
    assert_dense(&active);
}

#[tokio::test]
async fn move_to_current_position_is_noop() {
    let repo = repo().await;
    let created = seed(&repo, 4).await;

    let before = titles(&repo.find_active().await.unwrap());
    repo.reorder(&key(&created[2]), 2).await.unwrap();
    let after = titles(&repo.find_active().await.unwrap());
    assert_eq!(before, after);
}

#[tokio::test]
async fn move_round_trip_restores_original_ordering() {
    let repo = repo().await;
    let created = seed(&repo, 5).await;
    let before = titles(&repo.find_active().await.unwrap());

    repo.reorder(&key(&created[1]), 4).await.unwrap();
    repo.reorder(&key(&created[1]), 1).await.unwrap();

    let after = titles(&repo.find_active().await.unwrap());
    assert_eq!(before, after);
}

#[tokio::test]
async fn move_target_out_of_range_is_rejected_not_clamped() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;

    // one past the end
    assert!(matches!(
        repo.reorder(&key(&created[0]), 3).await,
        Err(RepoError::Validation(_))
    ));
    assert!(matches!(
        repo.reorder(&key(&created[0]), -1).await,
        Err(RepoError::Validation(_))
    ));

    // nothing moved
    let active = repo.find_active().await.unwrap();
    assert_eq!(titles(&active), vec!["event-0", "event-1", "event-2"]);
}

#[tokio::test]
async fn move_of_parked_record_is_rejected() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;
    repo.toggle_active(&key(&created[1])).await.unwrap();

    assert!(matches!(
        repo.reorder(&key(&created[1]), 0).await,
        Err(RepoError::Validation(_))
    ));
}

#[tokio::test]
async fn deactivate_compacts_and_parks_at_sentinel() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;

    // park the record at order 1
    repo.toggle_active(&key(&created[1])).await.unwrap();

    let active = repo.find_active().await.unwrap();
    assert_eq!(orders(&active), vec![0, 1]);
    assert_eq!(titles(&active), vec!["event-0", "event-2"]);

    let parked = repo.find_by_id(&key(&created[1])).await.unwrap().unwrap();
    assert!(!parked.is_active);
    assert_eq!(parked.sort_order, -1);

    // admin listing: actives in order, then the parked record
    let admin = repo.find_admin().await.unwrap();
    assert_eq!(titles(&admin), vec!["event-0", "event-2", "event-1"]);
}

#[tokio::test]
async fn reactivate_appends_at_the_end() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;

    repo.toggle_active(&key(&created[1])).await.unwrap();
    // back on: appended, not restored to its old slot
    repo.toggle_active(&key(&created[1])).await.unwrap();

    let active = repo.find_active().await.unwrap();
    assert_eq!(titles(&active), vec!["event-0", "event-2", "event-1"]);
    assert_eq!(orders(&active), vec![0, 1, 2]);

    let woken = repo.find_by_id(&key(&created[1])).await.unwrap().unwrap();
    assert_eq!(woken.sort_order, 2);
}

#[tokio::test]
async fn field_update_cannot_touch_ordering_state() {
    let repo = repo().await;
    let created = seed(&repo, 3).await;

    // the update DTO has no ordering fields; a raw JSON payload carrying
    // them is stripped at deserialization
    let update: cms_server::db::models::EventUpdate = serde_json::from_value(serde_json::json!({
        "title": { "text": "renamed", "color": "#606161" },
        "sort_order": 99,
        "is_active": false
    }))
    .unwrap();

    let updated = repo.update(&key(&created[0]), update).await.unwrap();
    assert_eq!(updated.title.text, "renamed");
    assert_eq!(updated.sort_order, 0);
    assert!(updated.is_active);
}

#[tokio::test]
async fn mixed_operation_sequence_keeps_density() {
    let repo = repo().await;
    let created = seed(&repo, 6).await;

    repo.reorder(&key(&created[5]), 0).await.unwrap();
    repo.toggle_active(&key(&created[2])).await.unwrap();
    repo.delete(&key(&created[0])).await.unwrap();
    repo.create(payload("late")).await.unwrap();
    repo.reorder(&key(&created[4]), 1).await.unwrap();
    repo.toggle_active(&key(&created[2])).await.unwrap();

    let active = repo.find_active().await.unwrap();
    assert_eq!(active.len(), 6);
    assert_dense(&active);
}

/// Two concurrent compact-deletes must leave the partition dense no matter
/// how the transactions interleave; conflicted attempts retry.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_preserve_density() {
    let repo = repo().await;
    let created = seed(&repo, 6).await;

    async fn delete_with_retry(repo: &EventRepository, id: String) {
        for attempt in 0..50 {
            match repo.delete(&id).await {
                Ok(()) => return,
                // the atomic script aborted without applying anything
                Err(RepoError::Transaction(_)) | Err(RepoError::Database(_)) => {
                    tokio::time::sleep(std::time::Duration::from_millis(5 * (attempt as u64 + 1))).await;
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        panic!("delete kept conflicting");
    }

    let a = delete_with_retry(&repo, key(&created[1]));
    let b = delete_with_retry(&repo, key(&created[4]));
    tokio::join!(a, b);

    let active = repo.find_active().await.unwrap();
    assert_eq!(active.len(), 4);
    assert_dense(&active);
    assert_eq!(
        titles(&active),
        vec!["event-0", "event-2", "event-3", "event-5"]
    );
}
