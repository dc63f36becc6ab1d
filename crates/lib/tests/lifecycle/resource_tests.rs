//! Lifecycle tests for projects, environments, segments, multivariate
//! options and organisations.

use flagsync_lib::field::Field;
use flagsync_lib::model::{
  ConditionRecord, EnvironmentRecord, MultivariateOptionRecord, ProjectRecord, ResourceKind, RuleRecord, RuleType,
  SegmentRecord,
};
use flagsync_lib::{Lifecycle, PlannedAction, ReconcileError, Session, ValueRecord, reconcile};

use super::common::FakeFlagsmith;

#[test]
fn project_create_applies_defaults_and_converges() {
  let session = Session::new(FakeFlagsmith::new());
  let projects = session.projects();

  let created = reconcile(&projects, Some(&ProjectRecord::new(7, "web")), None)
    .unwrap()
    .record
    .unwrap();
  assert_eq!(created.only_allow_lower_case_feature_names, Field::Known(true));
  assert_eq!(created.hide_disabled_flags, Field::Known(false));

  let again = reconcile(&projects, Some(&ProjectRecord::new(7, "web")), Some(&created)).unwrap();
  assert_eq!(again.action, PlannedAction::NoOp);
}

#[test]
fn project_moves_between_organisations_by_replacement() {
  let session = Session::new(FakeFlagsmith::new());
  let projects = session.projects();
  let created = reconcile(&projects, Some(&ProjectRecord::new(7, "web")), None)
    .unwrap()
    .record;

  let outcome = reconcile(&projects, Some(&ProjectRecord::new(8, "web")), created.as_ref()).unwrap();
  assert_eq!(
    outcome.action,
    PlannedAction::Replace {
      reasons: vec!["organisation_id".to_string()]
    }
  );
  assert_eq!(session.client().calls_to("delete_project"), vec!["delete_project(1)"]);
}

#[test]
fn environment_keeps_server_assigned_api_key() {
  let session = Session::new(FakeFlagsmith::new());
  let environments = session.environments();
  let created = reconcile(&environments, Some(&EnvironmentRecord::new(3, "staging")), None)
    .unwrap()
    .record
    .unwrap();
  assert_eq!(created.api_key, Field::Known("key-1".to_string()));
  assert_eq!(created.allow_client_traits, Field::Known(true));

  let mut renamed = EnvironmentRecord::new(3, "staging");
  renamed.description = Field::Known("pre-production".to_string());
  let updated = reconcile(&environments, Some(&renamed), Some(&created))
    .unwrap()
    .record
    .unwrap();
  assert_eq!(updated.api_key, created.api_key);
  assert_eq!(updated.description, Field::Known("pre-production".to_string()));

  environments.delete(&updated).unwrap();
  assert_eq!(
    session.client().calls_to("delete_environment"),
    vec!["delete_environment(key-1)"]
  );
}

#[test]
fn segment_round_trips_rules() {
  let desired = SegmentRecord {
    id: Field::Unknown,
    uuid: Field::Unknown,
    project_id: Field::Unknown,
    project_uuid: "project-a".to_string(),
    feature_id: Field::Absent,
    name: "beta users".to_string(),
    description: Field::Absent,
    rules: vec![RuleRecord {
      rule_type: RuleType::All,
      rules: vec![RuleRecord {
        rule_type: RuleType::Any,
        rules: Vec::new(),
        conditions: vec![ConditionRecord {
          operator: "EQUAL".to_string(),
          property: Field::Known("plan".to_string()),
          value: Field::Known("beta".to_string()),
        }],
      }],
      conditions: Vec::new(),
    }],
  };

  let session = Session::new(FakeFlagsmith::new());
  let segments = session.segments();
  let created = reconcile(&segments, Some(&desired), None).unwrap().record.unwrap();
  assert_eq!(created.rules, desired.rules);
  assert!(created.feature_id.is_absent());

  let again = reconcile(&segments, Some(&desired), Some(&created)).unwrap();
  assert_eq!(again.action, PlannedAction::NoOp);
}

#[test]
fn mv_option_lifecycle() {
  let session = Session::new(FakeFlagsmith::new());
  let options = session.multivariate_options();
  let desired = MultivariateOptionRecord::new("feature-uuid", ValueRecord::unicode("blue"), 25.0);

  let created = reconcile(&options, Some(&desired), None).unwrap().record.unwrap();
  assert_eq!(created.feature_uuid, "feature-uuid");
  assert_eq!(created.value, ValueRecord::unicode("blue"));

  let widened = MultivariateOptionRecord::new("feature-uuid", ValueRecord::unicode("blue"), 40.0);
  let updated = reconcile(&options, Some(&widened), Some(&created)).unwrap();
  assert_eq!(updated.action, PlannedAction::Update);
  assert_eq!(updated.record.as_ref().unwrap().default_percentage_allocation, 40.0);

  let imported = options.import("feature-uuid,mv-1").unwrap();
  assert_eq!(imported.uuid, Field::Known("mv-1".to_string()));

  options.delete(&imported).unwrap();
  assert_eq!(
    session.client().calls_to("delete_mv_option"),
    vec!["delete_mv_option(1, 1, 1)"]
  );
}

#[test]
fn mv_option_rejects_out_of_range_percentage() {
  let session = Session::new(FakeFlagsmith::new());
  let desired = MultivariateOptionRecord::new("feature-uuid", ValueRecord::int(1), 120.0);

  let err = session.multivariate_options().create(&desired).unwrap_err();
  assert!(matches!(err, ReconcileError::Model(_)));
  assert!(session.client().calls().is_empty());
}

#[test]
fn mv_option_read_needs_feature_uuid() {
  let session = Session::new(FakeFlagsmith::new());
  let mut record = MultivariateOptionRecord::new("", ValueRecord::int(1), 10.0);
  record.uuid = Field::Known("mv-1".to_string());

  assert_eq!(
    session.multivariate_options().read(&record),
    Err(ReconcileError::MissingParentId {
      kind: ResourceKind::MultivariateOption,
      field: "feature_uuid",
    })
  );
}

#[test]
fn organisation_lookup() {
  let session = Session::new(FakeFlagsmith::new());
  session.client().seed_organisation("org-uuid", "Acme");

  let organisation = session.organisations().read("org-uuid").unwrap();
  assert_eq!(organisation.name, "Acme");

  assert_eq!(
    session.organisations().read("missing"),
    Err(ReconcileError::NotFound {
      kind: ResourceKind::Organisation,
      id: "missing".to_string(),
    })
  );
}
