//! Multivariate option lifecycle. Options are addressed through their parent feature.

use tracing::info;

use super::{Lifecycle, ReconcileError, Session, Step, parse_import_id};
use crate::api::FlagsmithClient;
use crate::field::Field;
use crate::model::{MultivariateOptionRecord, RemoteRecord, ResourceKind};

const KIND: ResourceKind = ResourceKind::MultivariateOption;

const CREATE: Step = Step::new(KIND, "create");
const READ: Step = Step::new(KIND, "read");
const UPDATE: Step = Step::new(KIND, "update");
const DELETE: Step = Step::new(KIND, "delete");

pub struct MultivariateOptions<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> MultivariateOptions<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }
}

impl<C: FlagsmithClient> Lifecycle for MultivariateOptions<'_, C> {
  type Record = MultivariateOptionRecord;

  fn create(&self, planned: &MultivariateOptionRecord) -> Result<MultivariateOptionRecord, ReconcileError> {
    let payload = planned.to_remote()?;
    info!(feature = %planned.feature_uuid, "creating multivariate option");
    let created = self.session.call(CREATE, |c| c.create_mv_option(&payload))?;
    Ok(MultivariateOptionRecord::from_remote(&created)?)
  }

  fn read(&self, prior: &MultivariateOptionRecord) -> Result<Option<MultivariateOptionRecord>, ReconcileError> {
    let uuid = prior.uuid.known().ok_or(ReconcileError::MissingId { kind: KIND, field: "uuid" })?;
    if prior.feature_uuid.is_empty() {
      return Err(ReconcileError::MissingParentId {
        kind: KIND,
        field: "feature_uuid",
      });
    }
    self
      .session
      .call_read(READ, |c| c.get_mv_option(&prior.feature_uuid, uuid))?
      .map(|remote| MultivariateOptionRecord::from_remote(&remote))
      .transpose()
      .map_err(ReconcileError::from)
  }

  fn update(
    &self,
    planned: &MultivariateOptionRecord,
    _prior: &MultivariateOptionRecord,
  ) -> Result<MultivariateOptionRecord, ReconcileError> {
    if !planned.id.is_known() {
      return Err(ReconcileError::MissingId { kind: KIND, field: "id" });
    }
    let payload = planned.to_remote()?;
    info!(feature = %planned.feature_uuid, "updating multivariate option");
    let updated = self.session.call(UPDATE, |c| c.update_mv_option(&payload))?;
    Ok(MultivariateOptionRecord::from_remote(&updated)?)
  }

  fn delete(&self, prior: &MultivariateOptionRecord) -> Result<(), ReconcileError> {
    let project_id = prior.project_id.cloned().ok_or(ReconcileError::MissingParentId {
      kind: KIND,
      field: "project_id",
    })?;
    let feature_id = prior.feature_id.cloned().ok_or(ReconcileError::MissingParentId {
      kind: KIND,
      field: "feature_id",
    })?;
    let id = prior.id.cloned().ok_or(ReconcileError::MissingId { kind: KIND, field: "id" })?;
    self
      .session
      .call(DELETE, |c| c.delete_mv_option(project_id, feature_id, id))?;
    info!(id, "multivariate option deleted");
    Ok(())
  }

  fn import_stub(&self, id: &str) -> Result<MultivariateOptionRecord, ReconcileError> {
    let [feature_uuid, uuid] = parse_import_id::<2>(KIND, id, "feature_uuid,mv_option_uuid")?;
    Ok(MultivariateOptionRecord {
      uuid: Field::Known(uuid),
      feature_uuid,
      ..Default::default()
    })
  }
}
