//! Draft state for a tagged design.

use serde::{Deserialize, Serialize};

use super::{Draft, TagSet};
use crate::types::{Design, DesignId};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignDraft {
    pub id: Option<DesignId>,
    pub title: String,
    pub images: Vec<String>,
    pub tags: TagSet,
}

impl DesignDraft {
    /// Copy a persisted design into a draft for editing.
    #[must_use]
    pub fn from_design(design: &Design) -> Self {
        Self {
            id: Some(design.id.clone()),
            title: design.record.title.clone(),
            images: design.record.images.clone(),
            tags: design.record.tags.iter().map(String::as_str).collect(),
        }
    }
}

impl Draft for DesignDraft {
    type Id = DesignId;

    fn id(&self) -> Option<&DesignId> {
        self.id.as_ref()
    }

    fn images(&self) -> &[String] {
        &self.images
    }

    fn set_images(&mut self, urls: Vec<String>) {
        self.images = urls;
    }
}
