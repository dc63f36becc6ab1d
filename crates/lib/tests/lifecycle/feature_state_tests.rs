//! Feature state tests: environment defaults and segment overrides.

use flagsync_lib::api::{FeatureState, FeatureStateValue};
use flagsync_lib::field::Field;
use flagsync_lib::model::{FeatureStateRecord, FeatureStateScope, ResourceKind};
use flagsync_lib::{Lifecycle, LifecycleState, PlannedAction, ReconcileError, Session, ValueRecord, reconcile};

use super::common::FakeFlagsmith;

const FEATURE: i64 = 12;

fn environment_default(value: ValueRecord) -> FeatureStateRecord {
  FeatureStateRecord::new("env-key", FEATURE, true, value)
}

fn segment_override(segment: i64, priority: i64) -> FeatureStateRecord {
  FeatureStateRecord::new("env-key", FEATURE, true, ValueRecord::int(3))
    .with_scope(FeatureStateScope::from_reference(Some(segment), Field::Known(priority)))
}

#[test]
fn zero_segment_adopts_environment_default() {
  let session = Session::new(FakeFlagsmith::new());
  let seeded = session.client().seed_environment_default(2, FEATURE);

  let desired = environment_default(ValueRecord::unicode("on"))
    .with_scope(FeatureStateScope::from_reference(Some(0), Field::Absent));
  let created = session.feature_states().create(&desired).unwrap();

  assert!(session.client().calls_to("create_segment_override").is_empty());
  assert_eq!(
    session.client().calls(),
    vec![
      "get_environment_feature_state(env-key, 12)",
      "update_feature_state(12, priority=false)",
    ]
  );
  assert_eq!(created.uuid.known(), seeded.uuid.as_ref());
  assert_eq!(created.environment, Field::Known(2));
  assert_eq!(created.environment_key, "env-key");
  assert_eq!(created.feature_state_value, ValueRecord::unicode("on"));
  assert_eq!(created.scope, FeatureStateScope::Environment);
}

#[test]
fn missing_environment_default_is_fatal() {
  let session = Session::new(FakeFlagsmith::new());
  let err = session
    .feature_states()
    .create(&environment_default(ValueRecord::bool(true)))
    .unwrap_err();

  assert!(matches!(err, ReconcileError::Remote { step, .. } if step.op == "read_environment_default"));
}

#[test]
fn segment_override_is_created_in_one_call() {
  let session = Session::new(FakeFlagsmith::new());
  let created = session.feature_states().create(&segment_override(5, 0)).unwrap();

  assert_eq!(
    session.client().calls(),
    vec!["create_segment_override(12, segment=5)"]
  );
  assert_eq!(created.scope.segment(), Some(5));
  assert!(created.scope.feature_segment().non_zero().is_some());
  assert_eq!(created.feature_state_value, ValueRecord::int(3));
}

#[test]
fn override_without_feature_segment_is_an_error() {
  let session = Session::new(FakeFlagsmith::new());
  session.client().drop_feature_segment.set(true);

  assert_eq!(
    session.feature_states().create(&segment_override(5, 0)),
    Err(ReconcileError::MissingId {
      kind: ResourceKind::FeatureState,
      field: "feature_segment",
    })
  );
}

#[test]
fn deleting_unlinked_override_makes_no_call() {
  let session = Session::new(FakeFlagsmith::new());
  for feature_segment in [Field::Absent, Field::Known(0)] {
    let unlinked = segment_override(5, 0).with_scope(FeatureStateScope::Segment {
      segment: 5,
      segment_priority: Field::Known(0),
      feature_segment,
    });
    assert_eq!(session.feature_states().delete(&unlinked), Ok(()));
  }
  assert!(session.client().calls().is_empty());
}

#[test]
fn deleting_override_deletes_its_link() {
  let session = Session::new(FakeFlagsmith::new());
  session.client().feature_states.borrow_mut().insert(
    "fs-override".to_string(),
    FeatureState {
      id: Some(40),
      uuid: Some("fs-override".to_string()),
      enabled: true,
      feature_state_value: Some(FeatureStateValue {
        kind: "int".to_string(),
        integer_value: Some(3),
        ..Default::default()
      }),
      feature: FEATURE,
      environment: Some(2),
      segment: Some(5),
      feature_segment: Some(7),
      segment_priority: Some(0),
    },
  );

  let prior = FeatureStateRecord {
    id: Field::Known(40),
    uuid: Field::Known("fs-override".to_string()),
    environment: Field::Known(2),
    ..segment_override(5, 0)
  }
  .with_scope(FeatureStateScope::Segment {
    segment: 5,
    segment_priority: Field::Known(0),
    feature_segment: Field::Known(7),
  });

  session.feature_states().delete(&prior).unwrap();
  assert_eq!(session.client().calls(), vec!["delete_feature_segment(7)"]);
  assert!(session.client().feature_states.borrow().is_empty());
}

#[test]
fn deleting_environment_default_makes_no_call() {
  let session = Session::new(FakeFlagsmith::new());
  session.client().seed_environment_default(2, FEATURE);
  let created = session
    .feature_states()
    .create(&environment_default(ValueRecord::int(1)))
    .unwrap();
  session.client().clear_calls();

  let outcome = reconcile(&session.feature_states(), None, Some(&created)).unwrap();

  assert_eq!(outcome.state, LifecycleState::Deleted);
  assert_eq!(outcome.record, None);
  assert!(session.client().calls_to("delete_feature_segment").is_empty());
  assert_eq!(session.client().feature_states.borrow().len(), 1);
}

#[test]
fn priority_change_is_flagged() {
  let session = Session::new(FakeFlagsmith::new());
  let states = session.feature_states();
  let created = reconcile(&states, Some(&segment_override(5, 0)), None).unwrap().record;
  session.client().clear_calls();

  let outcome = reconcile(&states, Some(&segment_override(5, 2)), created.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::Update);
  assert_eq!(
    session.client().calls_to("update_feature_state"),
    vec!["update_feature_state(12, priority=true)"]
  );
  let record = outcome.record.unwrap();
  assert_eq!(record.scope.segment_priority(), Field::Known(2));
  assert_eq!(record.scope.feature_segment(), created.unwrap().scope.feature_segment());
}

#[test]
fn unset_priority_converges_once_server_reports_zero() {
  let session = Session::new(FakeFlagsmith::new());
  let states = session.feature_states();
  let desired = FeatureStateRecord::new("env-key", FEATURE, true, ValueRecord::int(3))
    .with_scope(FeatureStateScope::from_reference(Some(5), Field::Absent));
  let created = reconcile(&states, Some(&desired), None).unwrap().record;
  assert_eq!(created.as_ref().unwrap().scope.segment_priority(), Field::Known(0));
  session.client().clear_calls();

  let outcome = reconcile(&states, Some(&desired), created.as_ref()).unwrap();
  assert_eq!(outcome.action, PlannedAction::NoOp);
  assert_eq!(session.client().calls(), vec!["get_feature_state(fs-1)"]);

  let mut disabled = desired.clone();
  disabled.enabled = false;
  reconcile(&states, Some(&disabled), outcome.record.as_ref()).unwrap();
  assert_eq!(
    session.client().calls_to("update_feature_state"),
    vec!["update_feature_state(12, priority=false)"]
  );
}

#[test]
fn value_change_keeps_priority_flag_clear() {
  let session = Session::new(FakeFlagsmith::new());
  let states = session.feature_states();
  let created = reconcile(&states, Some(&segment_override(5, 1)), None).unwrap().record;
  session.client().clear_calls();

  let mut desired = segment_override(5, 1);
  desired.enabled = false;
  let outcome = reconcile(&states, Some(&desired), created.as_ref()).unwrap();

  assert_eq!(outcome.action, PlannedAction::Update);
  assert_eq!(
    session.client().calls_to("update_feature_state"),
    vec!["update_feature_state(12, priority=false)"]
  );
}

#[test]
fn moving_override_to_another_segment_replaces_it() {
  let session = Session::new(FakeFlagsmith::new());
  let states = session.feature_states();
  let created = reconcile(&states, Some(&segment_override(5, 0)), None).unwrap().record;
  let old_link = created.as_ref().unwrap().scope.feature_segment().non_zero().unwrap();
  session.client().clear_calls();

  let outcome = reconcile(&states, Some(&segment_override(6, 0)), created.as_ref()).unwrap();

  assert_eq!(
    outcome.action,
    PlannedAction::Replace {
      reasons: vec!["segment".to_string()]
    }
  );
  assert_eq!(
    session.client().calls_to("delete_feature_segment"),
    vec![format!("delete_feature_segment({old_link})")]
  );
  assert_eq!(
    session.client().calls_to("create_segment_override"),
    vec!["create_segment_override(12, segment=6)"]
  );
}

#[test]
fn import_by_environment_and_uuid() {
  let session = Session::new(FakeFlagsmith::new());
  let seeded = session.client().seed_environment_default(2, FEATURE);
  let uuid = seeded.uuid.unwrap();

  let imported = session.feature_states().import(&format!("env-key,{uuid}")).unwrap();
  assert_eq!(imported.environment_key, "env-key");
  assert_eq!(imported.feature, FEATURE);
  assert_eq!(imported.scope, FeatureStateScope::Environment);

  assert!(matches!(
    session.feature_states().import(&uuid),
    Err(ReconcileError::InvalidImportId { .. })
  ));
}
