//! Integration tests for `SqliteStore` against an in-memory database.

use sprout_core::{
  activity::{Activity, ActivityPatch},
  checklist::{BulkAssign, Checklist, ChecklistItem, ChecklistItemPatch, ChecklistPatch},
  child::{Child, ChildPatch},
  planning::{PlannedActivity, PlannedActivityPatch, Planning, PlanningPatch},
  store::{AuthStore, CrudStore, TrackerStore},
  user::NewUser,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

async fn seed_child(s: &SqliteStore) -> Child {
  s.insert(ChildPatch { name: Some("Sari".into()), age: Some(5) })
    .await
    .unwrap()
}

async fn seed_activity(s: &SqliteStore) -> Activity {
  s.insert(ActivityPatch {
    name: Some("Painting".into()),
    date: Some("2024-03-01".parse().unwrap()),
  })
  .await
  .unwrap()
}

// ─── Generic CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_round_trip() {
  let s = store().await;
  let activity = seed_activity(&s).await;

  let fetched: Option<Activity> = s.find(activity.id).await.unwrap();
  let fetched = fetched.unwrap();
  assert_eq!(fetched.name, "Painting");
  assert_eq!(fetched.date, "2024-03-01".parse().unwrap());
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  let result: Option<Activity> = s.find(999).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_returns_every_row() {
  let s = store().await;
  seed_child(&s).await;
  let _: Child = s
    .insert(ChildPatch { name: Some("Budi".into()), age: Some(4) })
    .await
    .unwrap();

  let all: Vec<Child> = s.list().await.unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn column_defaults_fill_omitted_fields() {
  let s = store().await;

  let checklist: Checklist = s
    .insert(ChecklistPatch { name: Some("Prep".into()), is_checked: None })
    .await
    .unwrap();
  assert!(!checklist.is_checked);

  let planning: Planning = s
    .insert(PlanningPatch { title: Some("Week 12".into()), description: None })
    .await
    .unwrap();
  let planned: PlannedActivity = s
    .insert(PlannedActivityPatch {
      planning_id:    Some(planning.id),
      activity_id:    Some(seed_activity(&s).await.id),
      scheduled_date: Some("2024-03-04T08:00:00Z".parse().unwrap()),
      scheduled_time: None,
      reminder:       None,
      completed:      None,
    })
    .await
    .unwrap();
  assert!(planned.reminder);
  assert!(!planned.completed);
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
  let s = store().await;
  let child = seed_child(&s).await;

  let updated: Option<Child> = s
    .update(child.id, ChildPatch { name: None, age: Some(6) })
    .await
    .unwrap();
  let updated = updated.unwrap();
  assert_eq!(updated.name, "Sari");
  assert_eq!(updated.age, 6);
}

#[tokio::test]
async fn update_with_empty_patch_is_a_read() {
  let s = store().await;
  let child = seed_child(&s).await;

  let updated: Option<Child> =
    s.update(child.id, ChildPatch::default()).await.unwrap();
  assert_eq!(updated.unwrap().age, 5);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let updated: Option<Child> = s
    .update(42, ChildPatch { name: Some("Ghost".into()), age: None })
    .await
    .unwrap();
  assert!(updated.is_none());
}

#[tokio::test]
async fn delete_removes_the_row() {
  let s = store().await;
  let child = seed_child(&s).await;

  assert!(CrudStore::<Child>::delete(&s, child.id).await.unwrap());
  let gone: Option<Child> = s.find(child.id).await.unwrap();
  assert!(gone.is_none());

  // Deleting again reports nothing removed.
  assert!(!CrudStore::<Child>::delete(&s, child.id).await.unwrap());
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
  let s = store().await;

  let result: crate::Result<ChecklistItem> = s
    .insert(ChecklistItemPatch {
      child_id: Some(123),
      activity_id: Some(456),
      ..Default::default()
    })
    .await;
  assert!(result.is_err());
}

// ─── Bulk assign ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_assign_creates_one_pending_item_per_child() {
  let s = store().await;
  let activity = seed_activity(&s).await;
  let mut child_ids = Vec::new();
  for name in ["Sari", "Budi", "Ayu"] {
    let child: Child = s
      .insert(ChildPatch { name: Some(name.into()), age: Some(5) })
      .await
      .unwrap();
    child_ids.push(child.id);
  }

  let items = s
    .bulk_assign(BulkAssign {
      child_ids:         child_ids.clone(),
      activity_id:       activity.id,
      custom_steps_used: vec![],
      due_date:          Some("2024-03-10T00:00:00Z".parse().unwrap()),
    })
    .await
    .unwrap();

  assert_eq!(items.len(), 3);
  for (item, child_id) in items.iter().zip(&child_ids) {
    assert_eq!(item.child_id, *child_id);
    assert_eq!(item.status, "pending");
    assert!(item.assigned_date.is_some());
    assert_eq!(
      item.home_observation,
      Some(serde_json::json!({"completed": false}))
    );
    assert_eq!(
      item.school_observation,
      Some(serde_json::json!({"completed": false}))
    );
  }

  let all: Vec<ChecklistItem> = s.list().await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn bulk_assign_with_a_bad_child_creates_nothing() {
  let s = store().await;
  let activity = seed_activity(&s).await;
  let child = seed_child(&s).await;

  // Second id violates the FK; the transaction must roll back the first.
  let result = s
    .bulk_assign(BulkAssign {
      child_ids:         vec![child.id, 9999],
      activity_id:       activity.id,
      custom_steps_used: vec![],
      due_date:          None,
    })
    .await;
  assert!(result.is_err());

  let all: Vec<ChecklistItem> = s.list().await.unwrap();
  assert!(all.is_empty());
}

// ─── Planned activities ──────────────────────────────────────────────────────

#[tokio::test]
async fn planned_for_filters_by_planning() {
  let s = store().await;
  let activity = seed_activity(&s).await;
  let mut planning_ids = Vec::new();
  for title in ["Week 12", "Week 13"] {
    let p: Planning = s
      .insert(PlanningPatch { title: Some(title.into()), description: None })
      .await
      .unwrap();
    let _: PlannedActivity = s
      .insert(PlannedActivityPatch {
        planning_id:    Some(p.id),
        activity_id:    Some(activity.id),
        scheduled_date: Some("2024-03-04T08:00:00Z".parse().unwrap()),
        ..Default::default()
      })
      .await
      .unwrap();
    planning_ids.push(p.id);
  }

  let planned = s.planned_for(planning_ids[0]).await.unwrap();
  assert_eq!(planned.len(), 1);
  assert_eq!(planned[0].planning_id, planning_ids[0]);
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_and_token_round_trip() {
  let s = store().await;
  let user = s
    .add_user(NewUser {
      name:          "Ibu Rina".into(),
      email:         "rina@example.com".into(),
      password_hash: "$argon2id$stub".into(),
    })
    .await
    .unwrap();

  let by_email = s.find_user_by_email("rina@example.com").await.unwrap();
  assert_eq!(by_email.unwrap().id, user.id);

  s.add_token(user.id, "digest-1").await.unwrap();
  let resolved = s.user_for_token("digest-1").await.unwrap();
  assert_eq!(resolved.unwrap().email, "rina@example.com");

  assert!(s.user_for_token("digest-2").await.unwrap().is_none());
}
