//! Remote service boundary.
//!
//! The reconciliation engine never talks HTTP itself. It drives a
//! [`FlagsmithClient`], an interface with one method per remote operation, and
//! exchanges the remote-shaped objects from [`types`]. Hosts supply the
//! implementation (transport, authentication, retries, timeouts).
//!
//! Create and update calls return the object as the server stored it, so
//! computed fields (identifiers, UUIDs, server defaults) can be normalized back
//! into the local record without an extra round trip.

mod types;

pub use types::*;

use thiserror::Error;

/// Errors reported by a [`FlagsmithClient`] implementation.
///
/// Messages are carried verbatim; the engine surfaces them without rewording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
  /// The addressed object does not exist remotely.
  #[error("not found: {0}")]
  NotFound(String),

  /// The service answered with an error status.
  #[error("request failed with status {status}: {body}")]
  Status { status: u16, body: String },

  /// The request never produced a response (connection, timeout, decoding).
  #[error("transport error: {0}")]
  Transport(String),
}

impl ClientError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, ClientError::NotFound(_))
  }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the engine needs from the Flagsmith admin API.
///
/// All calls are synchronous; the engine issues them one at a time and waits
/// for each to finish before deciding on the next.
pub trait FlagsmithClient {
  // Features
  fn create_feature(&self, feature: &Feature) -> ClientResult<Feature>;
  fn get_feature(&self, uuid: &str) -> ClientResult<Feature>;
  fn update_feature(&self, feature: &Feature) -> ClientResult<Feature>;
  fn delete_feature(&self, project_id: i64, feature_id: i64) -> ClientResult<()>;
  fn add_feature_owners(&self, feature: &Feature, owners: &[i64]) -> ClientResult<()>;
  fn remove_feature_owners(&self, feature: &Feature, owners: &[i64]) -> ClientResult<()>;

  // Feature states
  fn get_feature_state(&self, uuid: &str) -> ClientResult<FeatureState>;
  fn get_environment_feature_state(&self, environment_key: &str, feature_id: i64) -> ClientResult<FeatureState>;
  /// Update a feature state. `update_segment_priority` asks the service to
  /// also reorder the segment override, which it handles as a separate and
  /// more expensive operation.
  fn update_feature_state(&self, state: &FeatureState, update_segment_priority: bool) -> ClientResult<FeatureState>;
  /// Create a segment override: the feature state and its feature segment
  /// link in a single call.
  fn create_segment_override(&self, state: &FeatureState) -> ClientResult<FeatureState>;
  fn delete_feature_segment(&self, feature_segment_id: i64) -> ClientResult<()>;

  // Segments
  fn create_segment(&self, segment: &Segment) -> ClientResult<Segment>;
  fn get_segment(&self, uuid: &str) -> ClientResult<Segment>;
  fn update_segment(&self, segment: &Segment) -> ClientResult<Segment>;
  fn delete_segment(&self, project_id: i64, segment_id: i64) -> ClientResult<()>;

  // Multivariate options
  fn create_mv_option(&self, option: &MultivariateOption) -> ClientResult<MultivariateOption>;
  fn get_mv_option(&self, feature_uuid: &str, uuid: &str) -> ClientResult<MultivariateOption>;
  fn update_mv_option(&self, option: &MultivariateOption) -> ClientResult<MultivariateOption>;
  fn delete_mv_option(&self, project_id: i64, feature_id: i64, option_id: i64) -> ClientResult<()>;

  // Tags
  fn create_tag(&self, tag: &Tag) -> ClientResult<Tag>;
  fn get_tag(&self, project_uuid: &str, uuid: &str) -> ClientResult<Tag>;
  fn update_tag(&self, tag: &Tag) -> ClientResult<Tag>;
  fn delete_tag(&self, project_id: i64, tag_id: i64) -> ClientResult<()>;

  // Projects
  fn create_project(&self, project: &Project) -> ClientResult<Project>;
  fn get_project(&self, uuid: &str) -> ClientResult<Project>;
  fn update_project(&self, project: &Project) -> ClientResult<Project>;
  fn delete_project(&self, project_id: i64) -> ClientResult<()>;

  // Environments
  fn create_environment(&self, environment: &Environment) -> ClientResult<Environment>;
  fn get_environment(&self, uuid: &str) -> ClientResult<Environment>;
  fn update_environment(&self, environment: &Environment) -> ClientResult<Environment>;
  fn delete_environment(&self, api_key: &str) -> ClientResult<()>;

  // Organisations
  fn get_organisation(&self, uuid: &str) -> ClientResult<Organisation>;
}
