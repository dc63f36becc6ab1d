//! Project lifecycle.

use tracing::info;

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{ProjectRecord, RemoteRecord, ResourceKind};

const KIND: ResourceKind = ResourceKind::Project;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");

pub struct Projects<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Projects<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }
}

impl<C: FlagsmithClient> Lifecycle for Projects<'_, C> {
  type Record = ProjectRecord;

  fn create(&self, planned: &ProjectRecord) -> Result<ProjectRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(name = %planned.name, organisation = planned.organisation_id, "creating project");
    let created = self.session.call(CREATE, |c| c.create_project(&payload))?;
    Ok(ProjectRecord::from_remote(&created)?)
  }

  fn read(&self, prior: &ProjectRecord) -> Result<Option<ProjectRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    self
      .session
      .call_read(READ, |c| c.get_project(uuid))?
      .map(|remote| ProjectRecord::from_remote(&remote))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(&self, planned: &ProjectRecord, _prior: &ProjectRecord) -> Result<ProjectRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    let updated = self.session.call(UPDATE, |c| c.update_project(&payload))?;
    info!(name = %planned.name, "project updated");
    Ok(ProjectRecord::from_remote(&updated)?)
  }

  fn delete(&self, prior: &ProjectRecord) -> Result<(), ReconcileError> {
    let id = prior.id.cloned().ok_or(ReconcileError::MissingId { kind: KIND, field: "id" })?;
    self.session.call(DELETE, |c| c.delete_project(id))?;
    info!(id, "project deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<ProjectRecord, ReconcileError> {
    let [uuid] = parse_import_id::<1>(KIND, id, "project_uuid")?;
    Ok(ProjectRecord {
      uuid: Field::Known(uuid),
      ..Default::default()
    })
  }
}
