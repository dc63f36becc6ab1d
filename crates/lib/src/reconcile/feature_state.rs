//! Feature state lifecycle.
//!
//! The two scopes behave differently:
//!
//! | | environment default | segment override |
//! |---|---|---|
//! | create | find the existing state, then update it | one `create_segment_override` call |
//! | delete | nothing to delete remotely | delete the feature segment link, if one was resolved |
//!
//! Updates are the same for both, except that a priority change is flagged
//! to the client so it can reorder the override.

use tracing::{debug, info};

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{FeatureStateRecord, FeatureStateScope, RemoteRecord, ResourceKind};
use crate::plan::Plannable;

const KIND: ResourceKind = ResourceKind::FeatureState;

const CREATE_SEGMENT_OVERRIDE: Step = Step::new(KIND, "create_segment_override");
const READ: Step = Step::new(KIND, "read");
const READ_ENVIRONMENT_DEFAULT: Step = Step::new(KIND, "read_environment_default");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE_FEATURE_SEGMENT: Step = Step::new(KIND, "delete_feature_segment");

pub struct FeatureStates<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> FeatureStates<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }

  fn create_segment_override(&self, planned: &FeatureStateRecord) -> Result<FeatureStateRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(
      feature = planned.feature,
      segment = payload.segment.unwrap_or_default(),
      "creating segment override"
    );
    let created = self
      .session
      .call(CREATE_SEGMENT_OVERRIDE, |c| c.create_segment_override(&payload))?;

    let observed = FeatureStateRecord::observe(&created, planned)?;
    if observed.scope.feature_segment().non_zero().is_none() {
      return Err(ReconcileError::MissingId {
        kind: KIND,
        field: "feature_segment",
      });
    }
    Ok(observed)
  }

  /// Every feature has exactly one default state per environment, created
  /// along with the feature. Adopt it and update it to the planned value.
  fn adopt_environment_default(&self, planned: &FeatureStateRecord) -> Result<FeatureStateRecord, ReconcileError> {
    info!(
      environment = %planned.environment_key,
      feature = planned.feature,
      "adopting environment default"
    );
    let existing = self.session.call(READ_ENVIRONMENT_DEFAULT, |c| {
      c.get_environment_feature_state(&planned.environment_key, planned.feature)
    })?;
    let prior = FeatureStateRecord::observe(&existing, planned)?;

    let mut merged = planned.clone();
    merged.merge_computed(&prior);
    self.update(&merged, &prior)
  }
}

impl<C: FlagsmithClient> Lifecycle for FeatureStates<'_, C> {
  type Record = FeatureStateRecord;

  fn create(&self, planned: &FeatureStateRecord) -> Result<FeatureStateRecord, ReconcileError> {
    match &planned.scope {
      FeatureStateScope::Segment { .. } => self.create_segment_override(planned),
      FeatureStateScope::Environment => self.adopt_environment_default(planned),
    }
  }

  /// Reads by UUID when one is known, otherwise by environment and feature.
  fn read(&self, prior: &FeatureStateRecord) -> Result<Option<FeatureStateRecord>, ReconcileError> {
    let remote = match prior.uuid.known() {
      Some(uuid) => self.session.call_read(READ, |c| c.get_feature_state(uuid))?,
      None => self.session.call_read(READ, |c| {
        c.get_environment_feature_state(&prior.environment_key, prior.feature)
      })?,
    };
    remote
      .map(|remote| FeatureStateRecord::observe(&remote, prior))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(&self, planned: &FeatureStateRecord, prior: &FeatureStateRecord) -> Result<FeatureStateRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    // An unset priority is priority 0 on the server.
    let update_segment_priority = prior.scope.segment_priority().cloned().unwrap_or_default()
      != planned.scope.segment_priority().cloned().unwrap_or_default();

    debug!(
      feature = planned.feature,
      enabled = planned.enabled,
      update_segment_priority,
      "updating feature state"
    );
    let updated = self
      .session
      .call(UPDATE, |c| c.update_feature_state(&payload, update_segment_priority))?;
    Ok(FeatureStateRecord::observe(&updated, planned)?)
  }

  fn delete(&self, prior: &FeatureStateRecord) -> Result<(), ReconcileError> {
    match &prior.scope {
      FeatureStateScope::Environment => {
        debug!(
          environment = %prior.environment_key,
          feature = prior.feature,
          "environment default cannot be deleted, forgetting it"
        );
        Ok(())
      }
      FeatureStateScope::Segment { feature_segment, .. } => {
        let Some(link) = feature_segment.non_zero() else {
          debug!(feature = prior.feature, "override has no feature segment link, forgetting it");
          return Ok(());
        };
        self
          .session
          .call(DELETE_FEATURE_SEGMENT, |c| c.delete_feature_segment(link))?;
        info!(feature_segment = link, "segment override deleted");
        Ok(())
      }
    }
  }

  fn import_stub(&self, id: &str) -> Result<FeatureStateRecord, ReconcileError> {
    let [environment_key, uuid] = parse_import_id::<2>(KIND, id, "environment_key,feature_state_uuid")?;
    Ok(FeatureStateRecord {
      uuid: Field::Known(uuid),
      environment_key,
      ..Default::default()
    })
  }
}
