use serde::{Deserialize, Serialize};

use super::{ModelError, RemoteRecord, ResourceKind};
use crate::api::Tag;
use crate::field::Field;
use crate::plan::Plannable;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagRecord {
  pub id: Field<i64>,
  pub uuid: Field<String>,
  pub project_id: Field<i64>,
  /// Changing the project replaces the tag.
  pub project_uuid: String,
  pub tag_name: String,
  pub tag_colour: String,
  pub description: Field<String>,
}

impl TagRecord {
  pub fn new(project_uuid: impl Into<String>, tag_name: impl Into<String>, tag_colour: impl Into<String>) -> Self {
    Self {
      id: Field::Unknown,
      uuid: Field::Unknown,
      project_id: Field::Unknown,
      project_uuid: project_uuid.into(),
      tag_name: tag_name.into(),
      tag_colour: tag_colour.into(),
      description: Field::Absent,
    }
  }
}

impl RemoteRecord for TagRecord {
  type Remote = Tag;

  const KIND: ResourceKind = ResourceKind::Tag;

  fn to_remote(&self) -> Result<Tag, ModelError> {
    Ok(Tag {
      id: self.id.cloned(),
      uuid: self.uuid.cloned(),
      tag_name: self.tag_name.clone(),
      tag_colour: self.tag_colour.clone(),
      description: self.description.cloned(),
      project_uuid: self.project_uuid.clone(),
      project_id: self.project_id.cloned(),
    })
  }

  fn from_remote(remote: &Tag) -> Result<Self, ModelError> {
    Ok(Self {
      id: remote.id.into(),
      uuid: remote.uuid.clone().into(),
      project_id: remote.project_id.into(),
      project_uuid: remote.project_uuid.clone(),
      tag_name: remote.tag_name.clone(),
      tag_colour: remote.tag_colour.clone(),
      description: remote.description.clone().into(),
    })
  }
}

impl Plannable for TagRecord {
  fn merge_computed(&mut self, prior: &Self) {
    self.id = self.id.clone().or_prior(&prior.id);
    self.uuid = self.uuid.clone().or_prior(&prior.uuid);
    self.project_id = self.project_id.clone().or_prior(&prior.project_id);
  }

  fn replace_reasons(&self, prior: &Self) -> Vec<String> {
    if self.project_uuid != prior.project_uuid {
      vec!["project_uuid".to_string()]
    } else {
      Vec::new()
    }
  }
}
