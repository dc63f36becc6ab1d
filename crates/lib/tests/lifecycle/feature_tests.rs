//! Feature lifecycle tests, owners in particular.

use flagsync_lib::field::Field;
use flagsync_lib::model::{FeatureRecord, ResourceKind};
use flagsync_lib::{ClientError, Lifecycle, LifecycleState, PlannedAction, ReconcileError, Session, Step, reconcile};

use super::common::FakeFlagsmith;

fn desired(owners: &[i64]) -> FeatureRecord {
  FeatureRecord::new("project-uuid", "f1").with_owners(owners.to_vec())
}

#[test]
fn create_adds_owners_after_feature() {
  let session = Session::new(FakeFlagsmith::new());
  let outcome = reconcile(&session.features(), Some(&desired(&[1, 2])), None).unwrap();

  assert_eq!(outcome.action, PlannedAction::Create);
  assert_eq!(outcome.state, LifecycleState::Created);
  assert_eq!(
    session.client().calls(),
    vec!["create_feature(f1)", "add_feature_owners([1, 2])"]
  );

  let record = outcome.record.unwrap();
  assert_eq!(record.owners, Field::Known(vec![1, 2]));
  assert!(record.uuid.is_known());
  assert!(record.id.is_known());
}

#[test]
fn create_without_owners_skips_owner_calls() {
  let session = Session::new(FakeFlagsmith::new());
  let outcome = reconcile(&session.features(), Some(&FeatureRecord::new("project-uuid", "f1")), None).unwrap();

  assert_eq!(session.client().calls(), vec!["create_feature(f1)"]);
  assert!(outcome.record.unwrap().owners.is_absent());
}

#[test]
fn update_only_sends_owner_changes() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = reconcile(&features, Some(&desired(&[1, 2])), None).unwrap().record;
  session.client().clear_calls();

  let outcome = reconcile(&features, Some(&desired(&[1, 3])), created.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::Update);
  assert_eq!(outcome.state, LifecycleState::Updated);
  assert_eq!(
    session.client().calls_to("remove_feature_owners"),
    vec!["remove_feature_owners([2])"]
  );
  assert_eq!(session.client().calls_to("add_feature_owners"), vec!["add_feature_owners([3])"]);
  assert!(session.client().calls_to("create_feature").is_empty());
  assert!(session.client().calls_to("delete_feature").is_empty());

  // Removal happens before addition.
  let calls = session.client().calls();
  let remove = calls.iter().position(|c| c.starts_with("remove_feature_owners")).unwrap();
  let add = calls.iter().position(|c| c.starts_with("add_feature_owners")).unwrap();
  assert!(remove < add);

  assert_eq!(outcome.record.unwrap().owners, Field::Known(vec![1, 3]));
}

#[test]
fn converged_feature_is_a_noop() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = reconcile(&features, Some(&desired(&[1, 2])), None).unwrap().record;
  session.client().clear_calls();

  let outcome = reconcile(&features, Some(&desired(&[1, 2])), created.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::NoOp);
  assert_eq!(outcome.state, LifecycleState::ReadNormalized);
  assert_eq!(session.client().calls(), vec!["get_feature(feature-1)"]);
}

#[test]
fn read_keeps_unset_owners_absent() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = features.create(&FeatureRecord::new("project-uuid", "f1")).unwrap();

  let read = features.read(&created).unwrap().unwrap();
  assert!(read.owners.is_absent());
}

#[test]
fn read_of_deleted_feature_is_none() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = features.create(&desired(&[1])).unwrap();
  session.client().features.borrow_mut().clear();

  assert_eq!(features.read(&created).unwrap(), None);
}

#[test]
fn feature_deleted_out_of_band_is_recreated() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = reconcile(&features, Some(&desired(&[1])), None).unwrap().record;
  session.client().features.borrow_mut().clear();

  let outcome = reconcile(&features, Some(&desired(&[1])), created.as_ref()).unwrap();
  assert_eq!(outcome.action, PlannedAction::Create);
  assert_eq!(session.client().calls_to("create_feature").len(), 2);
}

#[test]
fn failed_owner_call_names_the_step() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = reconcile(&features, Some(&desired(&[1, 2])), None).unwrap().record;
  session.client().fail(
    "add_feature_owners",
    ClientError::Status {
      status: 400,
      body: "unknown user 3".to_string(),
    },
  );

  let err = reconcile(&features, Some(&desired(&[1, 3])), created.as_ref()).unwrap_err();
  assert_eq!(
    err,
    ReconcileError::Remote {
      step: Step::new(ResourceKind::Feature, "add_owners"),
      source: ClientError::Status {
        status: 400,
        body: "unknown user 3".to_string(),
      },
    }
  );
  assert!(err.to_string().contains("unknown user 3"));
}

#[test]
fn delete_requires_resolved_ids() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();

  let mut record = FeatureRecord::new("project-uuid", "f1");
  record.id = Field::Known(12);
  assert_eq!(
    features.delete(&record),
    Err(ReconcileError::MissingParentId {
      kind: ResourceKind::Feature,
      field: "project_id",
    })
  );

  record.id = Field::Absent;
  record.project_id = Field::Known(1);
  assert_eq!(
    features.delete(&record),
    Err(ReconcileError::MissingId {
      kind: ResourceKind::Feature,
      field: "id",
    })
  );
  assert!(session.client().calls().is_empty());
}

#[test]
fn delete_addresses_project_and_feature() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = features.create(&desired(&[])).unwrap();

  features.delete(&created).unwrap();
  assert_eq!(session.client().calls_to("delete_feature"), vec!["delete_feature(1, 1)"]);
  assert!(session.client().features.borrow().is_empty());
}

#[test]
fn import_by_uuid() {
  let session = Session::new(FakeFlagsmith::new());
  let features = session.features();
  let created = features.create(&desired(&[4])).unwrap();

  let imported = features.import("feature-1").unwrap();
  assert_eq!(imported.uuid, created.uuid);
  assert_eq!(imported.feature_name, "f1");
  assert_eq!(imported.owners, Field::Known(vec![4]));

  assert_eq!(
    features.import("feature-99"),
    Err(ReconcileError::NotFound {
      kind: ResourceKind::Feature,
      id: "feature-99".to_string(),
    })
  );
}
