//! Segment lifecycle.

use tracing::info;

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{RemoteRecord, ResourceKind, SegmentRecord};

const KIND: ResourceKind = ResourceKind::Segment;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");

pub struct Segments<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Segments<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }
}

impl<C: FlagsmithClient> Lifecycle for Segments<'_, C> {
  type Record = SegmentRecord;

  fn create(&self, planned: &SegmentRecord) -> Result<SegmentRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(name = %planned.name, rules = payload.rules.len(), "creating segment");
    let created = self.session.call(CREATE, |c| c.create_segment(&payload))?;
    Ok(SegmentRecord::from_remote(&created)?)
  }

  fn read(&self, prior: &SegmentRecord) -> Result<Option<SegmentRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    self
      .session
      .call_read(READ, |c| c.get_segment(uuid))?
      .map(|remote| SegmentRecord::from_remote(&remote))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(&self, planned: &SegmentRecord, _prior: &SegmentRecord) -> Result<SegmentRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    info!(name = %planned.name, "updating segment");
    let updated = self.session.call(UPDATE, |c| c.update_segment(&payload))?;
    Ok(SegmentRecord::from_remote(&updated)?)
  }

  fn delete(&self, prior: &SegmentRecord) -> Result<(), ReconcileError> {
    let project_id = prior.project_id.cloned().ok_or(ReconcileError::MissingParentId {
      kind: KIND,
      field: "project_id",
    })?;
    let id = prior.id.cloned().ok_or(ReconcileError::MissingId { kind: KIND, field: "id" })?;
    self.session.call(DELETE, |c| c.delete_segment(project_id, id))?;
    info!(id, "segment deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<SegmentRecord, ReconcileError> {
    let [uuid] = parse_import_id::<1>(KIND, id, "segment_uuid")?;
    Ok(SegmentRecord {
      uuid: Field::Known(uuid),
      ..Default::default()
    })
  }
}
