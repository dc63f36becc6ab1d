//! Features.
//!
//! Owners are reconciled through their own add and remove calls, so
//! [`FeatureRecord::to_remote`] leaves them in the payload only for callers
//! that want the complete object; the lifecycle strips them before sending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ModelError, MultivariateOptionRecord, RemoteRecord, ResourceKind};
use crate::api::Feature;
use crate::field::Field;
use crate::plan::Plannable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
  #[default]
  Standard,
  Multivariate,
}

impl FeatureType {
  pub fn as_str(&self) -> &'static str {
    match self {
      FeatureType::Standard => "STANDARD",
      FeatureType::Multivariate => "MULTIVARIATE",
    }
  }
}

impl fmt::Display for FeatureType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FeatureType {
  type Err = ModelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "STANDARD" => Ok(FeatureType::Standard),
      "MULTIVARIATE" => Ok(FeatureType::Multivariate),
      other => Err(ModelError::UnsupportedFeatureType(other.to_string())),
    }
  }
}

/// Local record of a feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRecord {
  /// Server-assigned numeric ID.
  pub id: Field<i64>,
  /// Server-assigned UUID, the primary identity.
  pub uuid: Field<String>,
  /// Numeric ID of the owning project, resolved by the server.
  pub project_id: Field<i64>,
  pub project_uuid: String,
  pub feature_name: String,
  #[serde(rename = "type")]
  pub feature_type: Field<FeatureType>,
  pub default_enabled: Field<bool>,
  pub initial_value: Field<String>,
  pub description: Field<String>,
  pub is_archived: Field<bool>,
  /// User IDs owning the feature.
  pub owners: Field<Vec<i64>>,
  pub tags: Field<Vec<i64>>,
  /// Observed options of a multivariate feature. Managed through
  /// [`MultivariateOptionRecord`] resources, never sent from here.
  pub multivariate_options: Field<Vec<MultivariateOptionRecord>>,
}

impl FeatureRecord {
  /// A desired feature with every server-computed attribute unknown.
  pub fn new(project_uuid: impl Into<String>, feature_name: impl Into<String>) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      project_id: Field::Unknown,
      project_uuid: project_uuid.into(),
      feature_name: feature_name.into(),
      feature_type: Field::Known(FeatureType::Standard),
      default_enabled: Field::Unknown,
      initial_value: Field::Unknown,
      description: Field::Absent,
      is_archived: Field::Unknown,
      owners: Field::Absent,
      tags: Field::Absent,
      multivariate_options: Field::Unknown,
    }
  }

  pub fn with_owners(mut self, owners: impl Into<Vec<i64>>) -> Self {
    self.owners = Field::Known(owners.into());
    self
  }
}

impl RemoteRecord for FeatureRecord {
  type Remote = Feature;

  const KIND: ResourceKind = ResourceKind::Feature;

  fn to_remote(&self) -> Result<Feature, ModelError> {
    let feature_type = self.feature_type.cloned().unwrap_or_default();
    Ok(Feature {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      name: self.feature_name.clone(),
      kind: Some(feature_type.as_str().to_string()),
      default_enabled: self.default_enabled.cloned(),
      initial_value: self.initial_value.cloned(),
      description: self.description.cloned(),
      is_archived: self.is_archived.cloned(),
      owners: self.owners.cloned(),
      tags: self.tags.cloned(),
      project_uuid: self.project_uuid.clone(),
      project_id: self.project_id.cloned(),
      multivariate_options: None,
    })
  }

  fn from_remote(remote: &Feature) -> Result<Self, ModelError> {
    let feature_type: Field<FeatureType> = remote.kind.as_deref().map(str::parse::<FeatureType>).transpose()?.into();

    let multivariate_options = match (&feature_type, &remote.multivariate_options) {
      (Field::Known(FeatureType::Multivariate), Some(options)) => {
        let parent_uuid = remote.uuid.clone().unwrap_or_default();
        let records = options
          .iter()
          .map(|option| {
            let mut record = MultivariateOptionRecord::from_remote(option)?;
            if record.feature_uuid.is_empty() {
              record.feature_uuid = parent_uuid.clone();
            }
            Ok(record)
          })
          .collect::<Result<Vec<_>, ModelError>>()?;
        Field::Known(records)
      }
      _ => Field::Absent,
    };

    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      project_id: remote.project_id.into(),
      project_uuid: remote.project_uuid.clone(),
      feature_name: remote.name.clone(),
      feature_type,
      default_enabled: remote.default_enabled.into(),
      initial_value: remote.initial_value.clone().into(),
      description: remote.description.clone().into(),
      is_archived: remote.is_archived.into(),
      owners: remote.owners.clone().into(),
      tags: remote.tags.clone().into(),
      multivariate_options,
    })
  }
}

impl Plannable for FeatureRecord {
  fn apply_defaults(&mut self) {
    self.feature_type = self.feature_type.clone().or_default_value(FeatureType::Standard);
  }

  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.project_id = self.project_id.clone().or_prior(&prior.project_id);
    self.default_enabled = self.default_enabled.clone().or_prior(&prior.default_enabled);
    self.initial_value = self.initial_value.clone().or_prior(&prior.initial_value);
    self.is_archived = self.is_archived.clone().or_prior(&prior.is_archived);
    self.multivariate_options = self.multivariate_options.clone().or_prior(&prior.multivariate_options);
  }
}
