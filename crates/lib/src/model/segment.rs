//! Segments and their rule trees.
//!
//! A segment owns an ordered list of rules. Each rule has a type, an ordered
//! list of conditions and an ordered list of nested rules. Nested rules may
//! not nest any further; deeper trees are rejected in both directions so a
//! malformed server response is never silently truncated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::{Condition, Rule, Segment};
use crate::field::Field;
use crate::plan::Plannable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleType {
  All,
  Any,
  None,
}

impl RuleType {
  pub fn as_str(&self) -> &'static str {
    match self {
      RuleType::All => "ALL",
      RuleType::Any => "ANY",
      RuleType::None => "NONE",
    }
  }
}

impl fmt::Display for RuleType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RuleType {
  type Err = ModelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ALL" => Ok(RuleType::All),
      "ANY" => Ok(RuleType::Any),
      "NONE" => Ok(RuleType::None),
      other => Err(ModelError::UnsupportedRuleType(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRecord {
  pub operator: String,
  pub property: Field<String>,
  pub value: Field<String>,
}

impl ConditionRecord {
  fn to_remote(&self) -> Condition {
    Condition {
      operator: self.operator.clone(),
      property: self.property.cloned(),
      value: self.value.cloned(),
    }
  }

  fn from_remote(remote: &Condition) -> Self {
    Self {
      operator: remote.operator.clone(),
      property: remote.property.clone().into(),
      value: remote.value.clone().into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
  #[serde(rename = "type")]
  pub rule_type: RuleType,
  #[serde(default)]
  pub rules: Vec<RuleRecord>,
  #[serde(default)]
  pub conditions: Vec<ConditionRecord>,
}

impl RuleRecord {
  fn to_remote(&self, depth: usize) -> Result<Rule, ModelError> {
    if depth > 0 && !self.rules.is_empty() {
      return Err(ModelError::RuleNestingTooDeep);
    }
    Ok(Rule {
      kind: self.rule_type.as_str().to_string(),
      rules: self
        .rules
        .iter()
        .map(|rule| rule.to_remote(depth + 1))
        .collect::<Result<_, _>>()?,
      conditions: self.conditions.iter().map(ConditionRecord::to_remote).collect(),
    })
  }

  fn from_remote(remote: &Rule, depth: usize) -> Result<Self, ModelError> {
    if depth > 0 && !remote.rules.is_empty() {
      return Err(ModelError::RuleNestingTooDeep);
    }
    Ok(Self {
      rule_type: remote.kind.parse()?,
      rules: remote
        .rules
        .iter()
        .map(|rule| RuleRecord::from_remote(rule, depth + 1))
        .collect::<Result<_, _>>()?,
      conditions: remote.conditions.iter().map(ConditionRecord::from_remote).collect(),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  pub project_id: Field<i64>,
  pub project_uuid: String,
  /// Set when the segment is scoped to a single feature.
  pub feature_id: Field<i64>,
  pub name: String,
  pub description: Field<String>,
  pub rules: Vec<RuleRecord>,
}

impl RemoteRecord for SegmentRecord {
  type Remote = Segment;

  const KIND: ResourceKind = ResourceKind::Segment;

  fn to_remote(&self) -> Result<Segment, ModelError> {
    Ok(Segment {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      name: self.name.clone(),
      description: self.description.cloned(),
      project_uuid: self.project_uuid.clone(),
      project_id: self.project_id.cloned(),
      feature_id: self.feature_id.non_zero(),
      rules: self
        .rules
        .iter()
        .map(|rule| rule.to_remote(0))
        .collect::<Result<_, _>>()?,
    })
  }

  fn from_remote(remote: &Segment) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      project_id: remote.project_id.into(),
      project_uuid: remote.project_uuid.clone(),
      feature_id: remote.feature_id.into(),
      name: remote.name.clone(),
      description: remote.description.clone().into(),
      rules: remote
        .rules
        .iter()
        .map(|rule| RuleRecord::from_remote(rule, 0))
        .collect::<Result<_, _>>()?,
    })
  }
}

impl Plannable for SegmentRecord {
  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.project_id = self.project_id.clone().or_prior(&prior.project_id);
    self.feature_id = self.feature_id.clone().or_prior(&prior.feature_id);
  }
}
