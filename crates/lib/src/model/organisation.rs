use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::Organisation;

/// An organisation, looked up by UUID. Never written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganisationRecord {
  pub id: i64,
  pub uuid: String,
  pub name: String,
  pub force_2fa: bool,
  pub persist_trait_data: bool,
  pub restrict_project_create_to_admin: bool,
}

impl RemoteRecord for OrganisationRecord {
  type Remote = Organisation;

  const KIND: ResourceKind = ResourceKind::Organisation;

  fn to_remote(&self) -> Result<Organisation, ModelError> {
    Ok(Organisation {
      id: self.id,
      uuid: self.uuid.clone(),
      name: self.name.clone(),
      force_2fa: self.force_2fa,
      persist_trait_data: self.persist_trait_data,
      restrict_project_create_to_admin: self.restrict_project_create_to_admin,
    })
  }

  fn from_remote(remote: &Organisation) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id,
      uuid: remote.uuid.clone(),
      name: remote.name.clone(),
      force_2fa: remote.force_2fa,
      persist_trait_data: remote.persist_trait_data,
      restrict_project_create_to_admin: remote.restrict_project_create_to_admin,
    })
  }
}
