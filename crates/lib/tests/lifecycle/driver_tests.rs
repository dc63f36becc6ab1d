//! Reconcile driver tests: the refresh, plan and dispatch sequence.

use flagsync_lib::field::Field;
use flagsync_lib::model::TagRecord;
use flagsync_lib::{LifecycleState, PlannedAction, Session, reconcile};

use super::common::FakeFlagsmith;

fn tag(project_uuid: &str, colour: &str) -> TagRecord {
  TagRecord::new(project_uuid, "beta", colour)
}

#[test]
fn create_then_noop() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();

  let created = reconcile(&tags, Some(&tag("project-a", "#ff0000")), None).unwrap();
  assert_eq!(created.action, PlannedAction::Create);
  assert_eq!(created.state, LifecycleState::Created);
  let record = created.record.unwrap();
  assert_eq!(record.id, Field::Known(1));
  assert_eq!(record.project_id, Field::Known(1));
  session.client().clear_calls();

  let again = reconcile(&tags, Some(&tag("project-a", "#ff0000")), Some(&record)).unwrap();
  assert_eq!(again.action, PlannedAction::NoOp);
  assert_eq!(again.state, LifecycleState::ReadNormalized);
  assert_eq!(again.record, Some(record));
  assert_eq!(session.client().calls(), vec!["get_tag(project-a, tag-1)"]);
}

#[test]
fn changed_attribute_updates_in_place() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  let record = reconcile(&tags, Some(&tag("project-a", "#ff0000")), None)
    .unwrap()
    .record;

  let outcome = reconcile(&tags, Some(&tag("project-a", "#00ff00")), record.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::Update);
  assert_eq!(outcome.state, LifecycleState::Updated);
  let updated = outcome.record.unwrap();
  assert_eq!(updated.tag_colour, "#00ff00");
  assert_eq!(updated.uuid, record.unwrap().uuid);
}

#[test]
fn replace_deletes_before_creating() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  let record = reconcile(&tags, Some(&tag("project-a", "#ff0000")), None)
    .unwrap()
    .record;
  session.client().clear_calls();

  let outcome = reconcile(&tags, Some(&tag("project-b", "#ff0000")), record.as_ref()).unwrap();

  assert_eq!(
    outcome.action,
    PlannedAction::Replace {
      reasons: vec!["project_uuid".to_string()]
    }
  );
  assert_eq!(outcome.state, LifecycleState::Created);
  assert_eq!(
    session.client().calls(),
    vec!["get_tag(project-a, tag-1)", "delete_tag(1, 1)", "create_tag(beta)"]
  );
  let replaced = outcome.record.unwrap();
  assert_eq!(replaced.project_uuid, "project-b");
  assert_ne!(replaced.uuid, Field::Known("tag-1".to_string()));
}

#[test]
fn no_desired_record_deletes() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  let record = reconcile(&tags, Some(&tag("project-a", "#ff0000")), None)
    .unwrap()
    .record;

  let outcome = reconcile(&tags, None, record.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::Delete);
  assert_eq!(outcome.state, LifecycleState::Deleted);
  assert_eq!(outcome.record, None);
  assert!(session.client().tags.borrow().is_empty());
}

#[test]
fn deleting_what_is_already_gone_issues_no_delete() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  let record = reconcile(&tags, Some(&tag("project-a", "#ff0000")), None)
    .unwrap()
    .record;
  session.client().tags.borrow_mut().clear();
  session.client().clear_calls();

  let outcome = reconcile(&tags, None, record.as_ref()).unwrap();

  assert_eq!(outcome.state, LifecycleState::Deleted);
  assert_eq!(session.client().calls(), vec!["get_tag(project-a, tag-1)"]);
}

#[test]
fn tag_import_needs_project_and_uuid() {
  use flagsync_lib::Lifecycle;

  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  reconcile(&tags, Some(&tag("project-a", "#ff0000")), None).unwrap();

  let imported = tags.import("project-a,tag-1").unwrap();
  assert_eq!(imported.tag_name, "beta");
  assert_eq!(imported.project_uuid, "project-a");
  assert!(tags.import("tag-1").is_err());
}
