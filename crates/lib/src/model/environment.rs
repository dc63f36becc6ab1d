use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::Environment;
use crate::field::Field;
use crate::plan::Plannable;

pub const DEFAULT_MINIMUM_CHANGE_REQUEST_APPROVALS: i64 = 0;
pub const DEFAULT_HIDE_DISABLED_FLAGS: bool = false;
pub const DEFAULT_HIDE_SENSITIVE_DATA: bool = false;
pub const DEFAULT_ALLOW_CLIENT_TRAITS: bool = true;
pub const DEFAULT_USE_IDENTITY_COMPOSITE_KEY_FOR_HASHING: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  /// Changing the project replaces the environment.
  pub project_id: i64,
  pub name: String,
  /// Client-side key, assigned by the server. Deletes are keyed by it.
  pub api_key: Field<String>,
  pub description: Field<String>,
  pub banner_text: Field<String>,
  pub banner_colour: Field<String>,
  pub minimum_change_request_approvals: Field<i64>,
  pub hide_disabled_flags: Field<bool>,
  pub hide_sensitive_data: Field<bool>,
  pub allow_client_traits: Field<bool>,
  pub use_identity_composite_key_for_hashing: Field<bool>,
}

impl EnvironmentRecord {
  pub fn new(project_id: i64, name: impl Into<String>) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      project_id,
      name: name.into(),
      api_key: Field::Unknown,
      description: Field::Absent,
      banner_text: Field::Absent,
      banner_colour: Field::Absent,
      minimum_change_request_approvals: Field::Absent,
      hide_disabled_flags: Field::Absent,
      hide_sensitive_data: Field::Absent,
      allow_client_traits: Field::Absent,
      use_identity_composite_key_for_hashing: Field::Absent,
    }
  }
}

impl RemoteRecord for EnvironmentRecord {
  type Remote = Environment;

  const KIND: ResourceKind = ResourceKind::Environment;

  fn to_remote(&self) -> Result<Environment, ModelError> {
    Ok(Environment {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      name: self.name.clone(),
      api_key: self.api_key.cloned(),
      description: self.description.cloned(),
      project_id: self.project_id,
      banner_text: self.banner_text.cloned(),
      banner_colour: self.banner_colour.cloned(),
      minimum_change_request_approvals: Some(
        self
          .minimum_change_request_approvals
          .cloned()
          .unwrap_or(DEFAULT_MINIMUM_CHANGE_REQUEST_APPROVALS),
      ),
      hide_disabled_flags: self.hide_disabled_flags.cloned().unwrap_or(DEFAULT_HIDE_DISABLED_FLAGS),
      hide_sensitive_data: self.hide_sensitive_data.cloned().unwrap_or(DEFAULT_HIDE_SENSITIVE_DATA),
      allow_client_traits: self.allow_client_traits.cloned().unwrap_or(DEFAULT_ALLOW_CLIENT_TRAITS),
      use_identity_composite_key_for_hashing: self
        .use_identity_composite_key_for_hashing
        .cloned()
        .unwrap_or(DEFAULT_USE_IDENTITY_COMPOSITE_KEY_FOR_HASHING),
    })
  }

  fn from_remote(remote: &Environment) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      project_id: remote.project_id,
      name: remote.name.clone(),
      api_key: remote.api_key.clone().into(),
      description: remote.description.clone().into(),
      banner_text: remote.banner_text.clone().into(),
      banner_colour: remote.banner_colour.clone().into(),
      minimum_change_request_approvals: remote.minimum_change_request_approvals.into(),
      hide_disabled_flags: Field::Known(remote.hide_disabled_flags),
      hide_sensitive_data: Field::Known(remote.hide_sensitive_data),
      allow_client_traits: Field::Known(remote.allow_client_traits),
      use_identity_composite_key_for_hashing: Field::Known(remote.use_identity_composite_key_for_hashing),
    })
  }
}

impl Plannable for EnvironmentRecord {
  fn apply_defaults(&mut self) {
    self.minimum_change_request_approvals = self
      .minimum_change_request_approvals
      .clone()
      .or_default_value(DEFAULT_MINIMUM_CHANGE_REQUEST_APPROVALS);
    self.hide_disabled_flags = self.hide_disabled_flags.clone().or_default_value(DEFAULT_HIDE_DISABLED_FLAGS);
    self.hide_sensitive_data = self.hide_sensitive_data.clone().or_default_value(DEFAULT_HIDE_SENSITIVE_DATA);
    self.allow_client_traits = self.allow_client_traits.clone().or_default_value(DEFAULT_ALLOW_CLIENT_TRAITS);
    self.use_identity_composite_key_for_hashing = self
      .use_identity_composite_key_for_hashing
      .clone()
      .or_default_value(DEFAULT_USE_IDENTITY_COMPOSITE_KEY_FOR_HASHING);
  }

  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.api_key = self.api_key.clone().or_prior(&prior.api_key);
  }

  fn replace_reasons(&self, prior: &Self) -> Vec<String> {
    if self.project_id != prior.project_id {
      vec!["project_id".to_string()]
    } else {
      Vec::new()
    }
  }
}
