//! Environment lifecycle. Deletes are keyed by the environment API key.

use tracing::info;

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{EnvironmentRecord, RemoteRecord, ResourceKind};

const KIND: ResourceKind = ResourceKind::Environment;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");

pub struct Environments<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Environments<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }
}

impl<C: FlagsmithClient> Lifecycle for Environments<'_, C> {
  type Record = EnvironmentRecord;

  fn create(&self, planned: &EnvironmentRecord) -> Result<EnvironmentRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(name = %planned.name, project = planned.project_id, "creating environment");
    let created = self.session.call(CREATE, |c| c.create_environment(&payload))?;
    Ok(EnvironmentRecord::from_remote(&created)?)
  }

  fn read(&self, prior: &EnvironmentRecord) -> Result<Option<EnvironmentRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    self
      .session
      .call_read(READ, |c| c.get_environment(uuid))?
      .map(|remote| EnvironmentRecord::from_remote(&remote))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(&self, planned: &EnvironmentRecord, _prior: &EnvironmentRecord) -> Result<EnvironmentRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    let updated = self.session.call(UPDATE, |c| c.update_environment(&payload))?;
    info!(name = %planned.name, "environment updated");
    Ok(EnvironmentRecord::from_remote(&updated)?)
  }

  /// Environments are addressed by their client-side key, not their ID.
  fn delete(&self, prior: &EnvironmentRecord) -> Result<(), ReconcileError> {
    let api_key = prior.api_key.known().ok_or(ReconcileError::MissingId {
      kind: KIND,
      field: "api_key",
    })?;
    self.session.call(DELETE, |c| c.delete_environment(api_key))?;
    info!(name = %prior.name, "environment deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<EnvironmentRecord, ReconcileError> {
    let [uuid] = parse_import_id::<1>(KIND, id, "environment_uuid")?;
    Ok(EnvironmentRecord {
      uuid: Field::Known(uuid),
      ..Default::default()
    })
  }
}
