//! Session behaviour shared by every lifecycle.

use flagsync_lib::model::{FeatureRecord, ResourceKind, TagRecord};
use flagsync_lib::{CancelFlag, Lifecycle, ReconcileError, Session, Step, reconcile};
use tracing_test::traced_test;

use super::common::FakeFlagsmith;

#[test]
fn cancelled_session_issues_no_calls() {
  let cancel = CancelFlag::new();
  let session = Session::new(FakeFlagsmith::new()).with_cancel_flag(cancel.clone());
  cancel.cancel();

  let err = session
    .features()
    .create(&FeatureRecord::new("project-uuid", "f1"))
    .unwrap_err();

  assert_eq!(
    err,
    ReconcileError::Cancelled {
      step: Step::new(ResourceKind::Feature, "create"),
    }
  );
  assert!(session.client().calls().is_empty());
}

#[test]
fn cancelling_between_calls_stops_the_sequence() {
  let session = Session::new(FakeFlagsmith::new());
  let tags = session.tags();
  let record = reconcile(&tags, Some(&TagRecord::new("project-a", "beta", "#fff")), None)
    .unwrap()
    .record;
  session.client().clear_calls();

  session.cancel_flag().cancel();
  let err = reconcile(&tags, Some(&TagRecord::new("project-b", "beta", "#fff")), record.as_ref()).unwrap_err();

  assert!(matches!(err, ReconcileError::Cancelled { .. }));
  assert!(session.client().calls().is_empty());
}

#[test]
#[traced_test]
fn remote_calls_are_logged_with_their_step() {
  let session = Session::new(FakeFlagsmith::new());
  reconcile(&session.tags(), Some(&TagRecord::new("project-a", "beta", "#fff")), None).unwrap();

  assert!(logs_contain("remote call"));
  assert!(logs_contain("tag.create"));
  assert!(logs_contain("planned"));
}

#[test]
#[traced_test]
fn vanished_resources_are_logged() {
  let session = Session::new(FakeFlagsmith::new());
  let mut prior = TagRecord::new("project-a", "beta", "#fff");
  prior.uuid = flagsync_lib::Field::Known("tag-9".to_string());

  assert_eq!(session.tags().read(&prior), Ok(None));
  assert!(logs_contain("resource no longer exists"));
}

#[test]
fn malformed_import_ids_are_rejected_before_any_call() {
  let session = Session::new(FakeFlagsmith::new());

  for id in ["", "a,b", ",x"] {
    assert!(matches!(
      session.features().import(id),
      Err(ReconcileError::InvalidImportId { .. })
    ));
  }
  assert!(matches!(
    session.environments().import("env,extra"),
    Err(ReconcileError::InvalidImportId { .. })
  ));
  assert!(session.client().calls().is_empty());
}
