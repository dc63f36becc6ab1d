//! Feature states: the value of a feature in one scope.
//!
//! A feature state is either the environment-wide default of a feature or a
//! segment override. The two scopes have different lifecycles (see
//! [`crate::reconcile::feature_state`]), so the scope is a sum type rather than
//! a nullable segment reference.

use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::FeatureState;
use crate::field::Field;
use crate::plan::Plannable;
use crate::value::{self, ValueRecord};

/// Where a feature state applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum FeatureStateScope {
  /// The single default state of a feature in an environment. It exists as
  /// soon as the feature does and can only be updated.
  #[default]
  Environment,
  /// An override applied to identities matching a segment.
  Segment {
    segment: i64,
    /// Ordering among overrides of the same feature.
    #[serde(default)]
    segment_priority: Field<i64>,
    /// Server link backing the override. Deleted with it.
    #[serde(default)]
    feature_segment: Field<i64>,
  },
}

impl FeatureStateScope {
  /// Scope from an optional segment reference. `None` and `0` both mean the
  /// environment default.
  pub fn from_reference(segment: Option<i64>, segment_priority: Field<i64>) -> Self {
    match segment {
      Some(segment) if segment != 0 => FeatureStateScope::Segment {
        segment,
        segment_priority,
        feature_segment: Field::Unknown,
      },
      _ => FeatureStateScope::Environment,
    }
  }

  pub fn segment(&self) -> Option<i64> {
    match self {
      FeatureStateScope::Segment { segment, .. } => Some(*segment),
      FeatureStateScope::Environment => None,
    }
  }

  pub fn segment_priority(&self) -> Field<i64> {
    match self {
      FeatureStateScope::Segment { segment_priority, .. } => segment_priority.clone(),
      FeatureStateScope::Environment => Field::Absent,
    }
  }

  pub fn feature_segment(&self) -> Field<i64> {
    match self {
      FeatureStateScope::Segment { feature_segment, .. } => feature_segment.clone(),
      FeatureStateScope::Environment => Field::Absent,
    }
  }

  pub fn is_segment_override(&self) -> bool {
    matches!(self, FeatureStateScope::Segment { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureStateRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  /// Client-side key of the environment. Never returned by the server.
  pub environment_key: String,
  /// Numeric ID of the environment, resolved by the server.
  pub environment: Field<i64>,
  /// Numeric ID of the feature.
  pub feature: i64,
  pub enabled: bool,
  pub feature_state_value: ValueRecord,
  #[serde(flatten)]
  pub scope: FeatureStateScope,
}

impl FeatureStateRecord {
  pub fn new(environment_key: impl Into<String>, feature: i64, enabled: bool, value: ValueRecord) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      environment_key: environment_key.into(),
      environment: Field::Unknown,
      feature,
      enabled,
      feature_state_value: value,
      scope: FeatureStateScope::Environment,
    }
  }

  pub fn with_scope(mut self, scope: FeatureStateScope) -> Self {
    self.scope = scope;
    self
  }

  /// Normalize a server response, carrying over what only the local side
  /// knows: the environment key, and the segment reference when the server
  /// echoes back an override without it.
  pub fn observe(remote: &FeatureState, local: &FeatureStateRecord) -> Result<Self, ModelError> {
    let mut remote = remote.clone();
    if let FeatureStateScope::Segment {
      segment,
      segment_priority,
      feature_segment,
    } = &local.scope
    {
      if remote.segment.is_none_or(|id| id == 0) {
        remote.segment = Some(*segment);
      }
      if remote.segment_priority.is_none() {
        remote.segment_priority = segment_priority.cloned();
      }
      if remote.feature_segment.is_none() {
        remote.feature_segment = feature_segment.non_zero();
      }
    }

    let mut record = Self::from_remote(&remote)?;
    record.environment_key = local.environment_key.clone();
    Ok(record)
  }
}

impl RemoteRecord for FeatureStateRecord {
  type Remote = FeatureState;

  const KIND: ResourceKind = ResourceKind::FeatureState;

  fn to_remote(&self) -> Result<FeatureState, ModelError> {
    Ok(FeatureState {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      enabled: self.enabled,
      feature_state_value: Some(value::encode(&self.feature_state_value)?),
      feature: self.feature,
      environment: self.environment.cloned(),
      segment: self.scope.segment().filter(|id| *id != 0),
      feature_segment: self.scope.feature_segment().non_zero(),
      segment_priority: self.scope.segment_priority().cloned(),
    })
  }

  fn from_remote(remote: &FeatureState) -> Result<Self, ModelError> {
    let value = remote
      .feature_state_value
      .as_ref()
      .ok_or(ModelError::MissingRemoteField {
        kind: ResourceKind::FeatureState,
        field: "feature_state_value",
      })?;

    let scope = match remote.segment {
      Some(segment) if segment != 0 => FeatureStateScope::Segment {
        segment,
        segment_priority: remote.segment_priority.into(),
        feature_segment: remote.feature_segment.into(),
      },
      _ => FeatureStateScope::Environment,
    };

    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      environment_key: String::new(),
      environment: remote.environment.into(),
      feature: remote.feature,
      enabled: remote.enabled,
      feature_state_value: value::decode(value)?,
      scope,
    })
  }
}

impl Plannable for FeatureStateRecord {
  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.environment = self.environment.clone().or_prior(&prior.environment);

    if let (
      FeatureStateScope::Segment {
        segment,
        segment_priority,
        feature_segment,
      },
      FeatureStateScope::Segment {
        segment: prior_segment,
        segment_priority: prior_segment_priority,
        feature_segment: prior_feature_segment,
      },
    ) = (&mut self.scope, &prior.scope)
    {
      if *segment == *prior_segment {
        // The server reports an unset priority as 0.
        *segment_priority = match segment_priority.clone() {
          Field::Unknown => prior_segment_priority.clone(),
          Field::Absent if prior_segment_priority.cloned().unwrap_or_default() == 0 => prior_segment_priority.clone(),
          other => other,
        };
        *feature_segment = feature_segment.clone().or_prior(prior_feature_segment);
      }
    }
  }

  fn replace_reasons(&self, prior: &Self) -> Vec<String> {
    let mut reasons = Vec::new();
    if self.environment_key != prior.environment_key {
      reasons.push("environment_key".to_string());
    }
    if self.feature != prior.feature {
      reasons.push("feature".to_string());
    }
    if self.scope.segment() != prior.scope.segment() {
      reasons.push("segment".to_string());
    }
    reasons
  }
}
