//! Organisation lookups.

use tracing::debug;

use super::{ReconcileError, Session, Step};
use crate::api::FlagsmithClient;
use crate::model::{OrganisationRecord, RemoteRecord, ResourceKind};

const READ: Step = Step::new(ResourceKind::Organisation, "read");

/// Read-only lookups of organisations.
pub struct Organisations<'s, C> {
  session: &'s Session<C>,
}

impl<'s, C: FlagsmithClient> Organisations<'s, C> {
  pub(crate) fn new(session: &'s Session<C>) -> Self {
    Self { session }
  }

  /// Look up an organisation by UUID. Unlike resource reads, a missing
  /// organisation is an error.
  pub fn read(&self, uuid: &str) -> Result<OrganisationRecord, ReconcileError> {
    let remote = self
      .session
      .call_read(READ, |c| c.get_organisation(uuid))?
      .ok_or_else(|| ReconcileError::NotFound {
        kind: ResourceKind::Organisation,
        id: uuid.to_string(),
      })?;
    debug!(uuid, id = remote.id, "organisation found");
    Ok(OrganisationRecord::from_remote(&remote)?)
  }
}
