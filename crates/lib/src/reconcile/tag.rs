//! Tag lifecycle, scoped to a project.

use tracing::info;

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{RemoteRecord, ResourceKind, TagRecord};

const KIND: ResourceKind = ResourceKind::Tag;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");

pub struct Tags<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Tags<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }
}

impl<C: FlagsmithClient> Lifecycle for Tags<'_, C> {
  type Record = TagRecord;

  fn create(&self, planned: &TagRecord) -> Result<TagRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(name = %planned.tag_name, project = %planned.project_uuid, "creating tag");
    let created = self.session.call(CREATE, |c| c.create_tag(&payload))?;
    Ok(TagRecord::from_remote(&created)?)
  }

  fn read(&self, prior: &TagRecord) -> Result<Option<TagRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    self
      .session
      .call_read(READ, |c| c.get_tag(&prior.project_uuid, uuid))?
      .map(|remote| TagRecord::from_remote(&remote))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(&self, planned: &TagRecord, _prior: &TagRecord) -> Result<TagRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    let updated = self.session.call(UPDATE, |c| c.update_tag(&payload))?;
    info!(name = %planned.tag_name, "tag updated");
    Ok(TagRecord::from_remote(&updated)?)
  }

  fn delete(&self, prior: &TagRecord) -> Result<(), ReconcileError> {
    let project_id = prior.project_id.cloned().ok_or(ReconcileError::MissingParentId {
      kind: KIND,
      field: "project_id",
    })?;
    let id = prior.id.cloned().ok_or(ReconcileError::MissingId { kind: KIND, field: "id" })?;
    self.session.call(DELETE, |c| c.delete_tag(project_id, id))?;
    info!(id, "tag deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<TagRecord, ReconcileError> {
    let [project_uuid, uuid] = parse_import_id::<2>(KIND, id, "project_uuid,tag_uuid")?;
    Ok(TagRecord {
      uuid: Field::Known(uuid),
      project_uuid,
      ..Default::default()
    })
  }
}
