//! Feature lifecycle.
//!
//! Owners never travel in the feature payload. After the feature itself is
//! created or updated, the owner set is brought in line with two calls:
//! remove the owners no longer wanted, then add the new ones. A failure in
//! either call aborts the operation with the failing step; the next read
//! picks up whatever the server kept, so running the operation again
//! converges.

use tracing::{debug, info};

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::{Feature, FlagsmithClient};
use crate::diff::OwnerDelta;
use crate::field::Field;
use crate::model::{FeatureRecord, RemoteRecord, ResourceKind};

const KIND: ResourceKind = ResourceKind::Feature;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");
const ADD_OWNERS: Step = Step::new(KIND, "add_owners");
const REMOVE_OWNERS: Step = Step::new(KIND, "remove_owners");

pub struct Features<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Features<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }

  fn reconcile_owners(&self, feature: &Feature, delta: &OwnerDelta) -> Result<(), ReconcileError> {
    debug!(
      uuid = feature.uuid.as_deref().unwrap_or_default(),
      remove = delta.to_remove.len(),
      add = delta.to_add.len(),
      "reconciling feature owners"
    );
    if !delta.to_remove.is_empty() {
      self
        .session
        .call(REMOVE_OWNERS, |c| c.remove_feature_owners(feature, &delta.to_remove))?;
    }
    if !delta.to_add.is_empty() {
      self
        .session
        .call(ADD_OWNERS, |c| c.add_feature_owners(feature, &delta.to_add))?;
    }
    Ok(())
  }
}

/// The observed record reports the owners that were asked for, since the
/// feature payload returned by create and update predates the owner calls.
fn observe(remote: &Feature, planned: &FeatureRecord) -> Result<FeatureRecord, ReconcileError> {
  let mut observed = FeatureRecord::from_remote(remote)?;
  if !planned.owners.is_unknown() {
    observed.owners = planned.owners.clone();
  }
  Ok(observed)
}

impl<C: FlagsmithClient> Lifecycle for Features<'_, C> {
  type Record = FeatureRecord;

  fn create(&self, planned: &FeatureRecord) -> Result<FeatureRecord, ReconcileError> {
    let mut payload = planned.to_remote()?;
    let owners = payload.owners.take().unwrap_or_default();

    info!(name = %planned.feature_name, project = %planned.project_uuid, "creating feature");
    let created = self.session.call(CREATE, |c| c.create_feature(&payload))?;

    if !owners.is_empty() {
      self.reconcile_owners(&created, &OwnerDelta::between(None, Some(owners.as_slice())))?;
    }

    let observed = observe(&created, planned)?;
    info!(uuid = observed.uuid.known().map(String::as_str).unwrap_or_default(), "feature created");
    Ok(observed)
  }

  fn read(&self, prior: &FeatureRecord) -> Result<Option<FeatureRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    let Some(mut remote) = self.session.call_read(READ, |c| c.get_feature(uuid))? else {
      return Ok(None);
    };

    // An empty owner list is the server's way of saying "none"; keep it
    // absent when no owners were ever configured.
    if prior.owners.is_absent() && remote.owners.as_ref().is_some_and(Vec::is_empty) {
      remote.owners = None;
    }
    Ok(Some(FeatureRecord::from_remote(&remote)?))
  }

  fn update(&self, planned: &FeatureRecord, prior: &FeatureRecord) -> Result<FeatureRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let mut payload = planned.to_remote()?;
    let desired_owners = payload.owners.take();

    info!(uuid = planned.uuid.known().map(String::as_str).unwrap_or_default(), "updating feature");
    let updated = self.session.call(UPDATE, |c| c.update_feature(&payload))?;

    let current_owners = updated.owners.clone().or_else(|| prior.owners.cloned());
    let delta = OwnerDelta::between(current_owners.as_deref(), desired_owners.as_deref());
    if !delta.is_empty() {
      self.reconcile_owners(&updated, &delta)?;
    }

    observe(&updated, planned)
  }

  fn delete(&self, prior: &FeatureRecord) -> Result<(), ReconcileError> {
    let project_id = prior.project_id.cloned().ok_or(ReconcileError::MissingParentId {
      kind: KIND,
      field: "project_id",
    })?;
    let id = prior.id.cloned().ok_or(ReconcileError::MissingId { kind: KIND, field: "id" })?;

    self.session.call(DELETE, |c| c.delete_feature(project_id, id))?;
    info!(id, "feature deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<FeatureRecord, ReconcileError> {
    let [uuid] = parse_import_id::<1>(KIND, id, "feature_uuid")?;
    Ok(FeatureRecord {
      uuid: Field::Known(uuid),
      ..Default::default()
    })
  }
}
