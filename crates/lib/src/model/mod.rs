//! Local records and their mapping to remote objects.
//!
//! Every resource kind has a record type (the host-facing shape, built from
//! [`Field`](crate::field::Field)s) and a pair of conversions:
//!
//! - `to_remote`: record → remote object. Unknown and absent optional fields are
//!   omitted, zero-valued references are dropped, and collections are rebuilt
//!   as fresh vectors.
//! - `from_remote`: remote object → record. Every `None` becomes an explicit
//!   absent marker.
//!
//! # Submodules
//!
//! - [`environment`] - environments within a project
//! - [`feature`] - features and their owners
//! - [`feature_state`] - environment defaults and segment overrides
//! - [`mv_option`] - multivariate options of a feature
//! - [`organisation`] - read-only organisation lookups
//! - [`project`] - projects within an organisation
//! - [`segment`] - segments and their rule trees
//! - [`tag`] - project tags

pub mod environment;
pub mod feature;
pub mod feature_state;
pub mod mv_option;
pub mod organisation;
pub mod project;
pub mod segment;
pub mod tag;

pub use environment::EnvironmentRecord;
pub use feature::{FeatureRecord, FeatureType};
pub use feature_state::{FeatureStateRecord, FeatureStateScope};
pub use mv_option::MultivariateOptionRecord;
pub use organisation::OrganisationRecord;
pub use project::ProjectRecord;
pub use segment::{ConditionRecord, RuleRecord, RuleType, SegmentRecord};
pub use tag::TagRecord;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PROVIDER_TYPE_PREFIX;
use crate::value::ValueError;

/// The kinds of resource the engine reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
  Feature,
  FeatureState,
  Segment,
  MultivariateOption,
  Tag,
  Project,
  Environment,
  Organisation,
}

impl ResourceKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResourceKind::Feature => "feature",
      ResourceKind::FeatureState => "feature_state",
      ResourceKind::Segment => "segment",
      ResourceKind::MultivariateOption => "mv_feature_option",
      ResourceKind::Tag => "tag",
      ResourceKind::Project => "project",
      ResourceKind::Environment => "environment",
      ResourceKind::Organisation => "organisation",
    }
  }

  /// The type name a plugin host registers this kind under, e.g.
  /// `flagsmith_feature_state`.
  pub fn type_name(&self) -> String {
    format!("{}_{}", PROVIDER_TYPE_PREFIX, self.as_str())
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors raised while mapping between records and remote objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
  /// A typed value could not be encoded or decoded.
  #[error(transparent)]
  Value(#[from] ValueError),

  #[error("unsupported feature type '{0}', expected STANDARD or MULTIVARIATE")]
  UnsupportedFeatureType(String),

  #[error("unsupported rule type '{0}', expected ALL, ANY or NONE")]
  UnsupportedRuleType(String),

  /// Rules may contain rules, but those nested rules may not nest further.
  #[error("segment rules may only be nested one level deep")]
  RuleNestingTooDeep,

  #[error("default percentage allocation {0} is outside the range 0 to 100")]
  PercentageOutOfRange(f64),

  /// The server response lacks a field the record cannot do without.
  #[error("remote {kind} is missing '{field}'")]
  MissingRemoteField { kind: ResourceKind, field: &'static str },
}

/// A local record with a remote counterpart.
pub trait RemoteRecord: Sized {
  /// The remote-shaped object this record maps to.
  type Remote;

  const KIND: ResourceKind;

  /// Build the outbound object. Unknown and absent optional fields are omitted.
  fn to_remote(&self) -> Result<Self::Remote, ModelError>;

  /// Build a record from a server response. Missing optional fields become
  /// [`Field::Absent`](crate::field::Field::Absent).
  fn from_remote(remote: &Self::Remote) -> Result<Self, ModelError>;
}
