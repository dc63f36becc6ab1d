//! Multivariate options of a feature.

use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::MultivariateOption;
use crate::field::Field;
use crate::plan::Plannable;
use crate::value::{self, ValueRecord};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultivariateOptionRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  /// UUID of the owning feature. Changing it replaces the option.
  pub feature_uuid: String,
  pub feature_id: Field<i64>,
  pub project_id: Field<i64>,
  #[serde(flatten)]
  pub value: ValueRecord,
  /// Percentage of identities served this option, between 0 and 100.
  pub default_percentage_allocation: f64,
}

impl MultivariateOptionRecord {
  pub fn new(feature_uuid: impl Into<String>, value: ValueRecord, default_percentage_allocation: f64) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      feature_uuid: feature_uuid.into(),
      feature_id: Field::Unknown,
      project_id: Field::Unknown,
      value,
      default_percentage_allocation,
    }
  }
}

fn check_percentage(percentage: f64) -> Result<f64, ModelError> {
  if percentage.is_finite() && (0.0..=100.0).contains(&percentage) {
    Ok(percentage)
  } else {
    Err(ModelError::PercentageOutOfRange(percentage))
  }
}

impl RemoteRecord for MultivariateOptionRecord {
  type Remote = MultivariateOption;

  const KIND: ResourceKind = ResourceKind::MultivariateOption;

  fn to_remote(&self) -> Result<MultivariateOption, ModelError> {
    Ok(MultivariateOption {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      value: value::encode(&self.value)?,
      default_percentage_allocation: check_percentage(self.default_percentage_allocation)?,
      feature_id: self.feature_id.cloned(),
      feature_uuid: self.feature_uuid.clone(),
      project_id: self.project_id.cloned(),
    })
  }

  fn from_remote(remote: &MultivariateOption) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      feature_uuid: remote.feature_uuid.clone(),
      feature_id: remote.feature_id.into(),
      project_id: remote.project_id.into(),
      value: value::decode(&remote.value)?,
      default_percentage_allocation: check_percentage(remote.default_percentage_allocation)?,
    })
  }
}

impl Plannable for MultivariateOptionRecord {
  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.feature_id = self.feature_id.clone().or_prior(&prior.feature_id);
    self.project_id = self.project_id.clone().or_prior(&prior.project_id);
  }

  fn replace_reasons(&self, prior: &Self) -> Vec<String> {
    if self.feature_uuid != prior.feature_uuid {
      vec!["feature_uuid".to_string()]
    } else {
      Vec::new()
    }
  }
}
