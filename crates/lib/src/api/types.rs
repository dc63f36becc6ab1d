//! Remote-shaped domain objects.
//!
//! These mirror the objects exchanged with the Flagsmith admin API. Every field
//! the server may omit or compute is an `Option`; the mapper in
//! [`crate::model`] is responsible for turning `None` into an explicit absent
//! marker on the local side.

use serde::{Deserialize, Serialize};

/// One-pointer-per-branch encoding of a typed value.
///
/// Exactly one of the three branch fields is expected to be set, selected by
/// `kind`. Use [`crate::value::encode`] and [`crate::value::decode`] rather
/// than building these by hand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureStateValue {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub string_value: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub integer_value: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub boolean_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  pub name: String,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default_enabled: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub initial_value: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_archived: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owners: Option<Vec<i64>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags: Option<Vec<i64>>,
  pub project_uuid: String,
  #[serde(rename = "project", skip_serializing_if = "Option::is_none")]
  pub project_id: Option<i64>,
  /// Server-managed; never sent on create or update.
  #[serde(skip_serializing)]
  pub multivariate_options: Option<Vec<MultivariateOption>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureState {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  pub enabled: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feature_state_value: Option<FeatureStateValue>,
  pub feature: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub environment: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub segment: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feature_segment: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub segment_priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
  pub operator: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub property: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
  #[serde(rename = "type")]
  pub kind: String,
  pub rules: Vec<Rule>,
  pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub project_uuid: String,
  #[serde(rename = "project", skip_serializing_if = "Option::is_none")]
  pub project_id: Option<i64>,
  #[serde(rename = "feature", skip_serializing_if = "Option::is_none")]
  pub feature_id: Option<i64>,
  pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultivariateOption {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  #[serde(flatten)]
  pub value: FeatureStateValue,
  pub default_percentage_allocation: f64,
  #[serde(rename = "feature", skip_serializing_if = "Option::is_none")]
  pub feature_id: Option<i64>,
  pub feature_uuid: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub project_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  #[serde(rename = "label")]
  pub tag_name: String,
  #[serde(rename = "color")]
  pub tag_colour: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub project_uuid: String,
  #[serde(rename = "project", skip_serializing_if = "Option::is_none")]
  pub project_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  pub name: String,
  #[serde(rename = "organisation")]
  pub organisation_id: i64,
  pub hide_disabled_flags: bool,
  pub prevent_flag_defaults: bool,
  pub enable_realtime_updates: bool,
  pub only_allow_lower_case_feature_names: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feature_name_regex: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stale_flags_limit_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "project")]
  pub project_id: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub banner_text: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub banner_colour: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimum_change_request_approvals: Option<i64>,
  pub hide_disabled_flags: bool,
  pub hide_sensitive_data: bool,
  pub allow_client_traits: bool,
  pub use_identity_composite_key_for_hashing: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Organisation {
  pub id: i64,
  pub uuid: String,
  pub name: String,
  pub force_2fa: bool,
  pub persist_trait_data: bool,
  pub restrict_project_create_to_admin: bool,
}
