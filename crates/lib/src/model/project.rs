use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::Project;
use crate::field::Field;
use crate::plan::Plannable;

pub const DEFAULT_HIDE_DISABLED_FLAGS: bool = false;
pub const DEFAULT_PREVENT_FLAG_DEFAULTS: bool = false;
pub const DEFAULT_ENABLE_REALTIME_UPDATES: bool = false;
pub const DEFAULT_ONLY_ALLOW_LOWER_CASE_FEATURE_NAMES: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  /// Changing the organisation replaces the project.
  pub organisation_id: i64,
  pub name: String,
  pub hide_disabled_flags: Field<bool>,
  pub prevent_flag_defaults: Field<bool>,
  pub enable_realtime_updates: Field<bool>,
  pub only_allow_lower_case_feature_names: Field<bool>,
  pub feature_name_regex: Field<String>,
  pub stale_flags_limit_days: Field<i64>,
}

impl ProjectRecord {
  pub fn new(organisation_id: i64, name: impl Into<String>) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      organisation_id,
      name: name.into(),
      hide_disabled_flags: Field::Absent,
      prevent_flag_defaults: Field::Absent,
      enable_realtime_updates: Field::Absent,
      only_allow_lower_case_feature_names: Field::Absent,
      feature_name_regex: Field::Unknown,
      stale_flags_limit_days: Field::Unknown,
    }
  }
}

impl RemoteRecord for ProjectRecord {
  type Remote = Project;

  const KIND: ResourceKind = ResourceKind::Project;

  fn to_remote(&self) -> Result<Project, ModelError> {
    Ok(Project {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      name: self.name.clone(),
      organisation_id: self.organisation_id,
      hide_disabled_flags: self.hide_disabled_flags.cloned().unwrap_or(DEFAULT_HIDE_DISABLED_FLAGS),
      prevent_flag_defaults: self.prevent_flag_defaults.cloned().unwrap_or(DEFAULT_PREVENT_FLAG_DEFAULTS),
      enable_realtime_updates: self
        .enable_realtime_updates
        .cloned()
        .unwrap_or(DEFAULT_ENABLE_REALTIME_UPDATES),
      only_allow_lower_case_feature_names: self
        .only_allow_lower_case_feature_names
        .cloned()
        .unwrap_or(DEFAULT_ONLY_ALLOW_LOWER_CASE_FEATURE_NAMES),
      feature_name_regex: self.feature_name_regex.cloned(),
      stale_flags_limit_days: self.stale_flags_limit_days.cloned(),
    })
  }

  fn from_remote(remote: &Project) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      organisation_id: remote.organisation_id,
      name: remote.name.clone(),
      hide_disabled_flags: Field::Known(remote.hide_disabled_flags),
      prevent_flag_defaults: Field::Known(remote.prevent_flag_defaults),
      enable_realtime_updates: Field::Known(remote.enable_realtime_updates),
      only_allow_lower_case_feature_names: Field::Known(remote.only_allow_lower_case_feature_names),
      feature_name_regex: remote.feature_name_regex.clone().into(),
      stale_flags_limit_days: remote.stale_flags_limit_days.into(),
    })
  }
}

impl Plannable for ProjectRecord {
  fn apply_defaults(&mut self) {
    self.hide_disabled_flags = self.hide_disabled_flags.clone().or_default_value(DEFAULT_HIDE_DISABLED_FLAGS);
    self.prevent_flag_defaults = self
      .prevent_flag_defaults
      .clone()
      .or_default_value(DEFAULT_PREVENT_FLAG_DEFAULTS);
    self.enable_realtime_updates = self
      .enable_realtime_updates
      .clone()
      .or_default_value(DEFAULT_ENABLE_REALTIME_UPDATES);
    self.only_allow_lower_case_feature_names = self
      .only_allow_lower_case_feature_names
      .clone()
      .or_default_value(DEFAULT_ONLY_ALLOW_LOWER_CASE_FEATURE_NAMES);
  }

  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.feature_name_regex = self.feature_name_regex.clone().or_prior(&prior.feature_name_regex);
    self.stale_flags_limit_days = self.stale_flags_limit_days.clone().or_prior(&prior.stale_flags_limit_days);
  }

  fn replace_reasons(&self, prior: &Self) -> Vec<String> {
    if self.organisation_id != prior.organisation_id {
      vec!["organisation_id".to_string()]
    } else {
      Vec::new()
    }
  }
}
