use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::CrudResource;

/// Reference to an entity, rendered as a clickable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntityLink {
    pub url: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: Uuid,
}

/// Builds [`EntityLink`]s as `{base_path}/{type}/{id}`.
#[derive(Debug, Clone)]
pub struct LinkFactory {
    base_path: String,
}

impl LinkFactory {
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn create(&self, entity_type: &str, id: Uuid) -> EntityLink {
        EntityLink {
            url: format!("{}/{entity_type}/{id}", self.base_path),
            entity_type: entity_type.to_string(),
            id,
        }
    }

    /// Link to a resource, typed by its plural resource name
    #[must_use]
    pub fn for_resource<T: CrudResource>(&self, resource: &T) -> EntityLink {
        self.create(T::RESOURCE_NAME_PLURAL, resource.id())
    }
}

/// Values that can produce the link pointing at themselves
pub trait Linkable {
    fn entity_link(&self, links: &LinkFactory) -> EntityLink;
}

impl<T: CrudResource> Linkable for T {
    fn entity_link(&self, links: &LinkFactory) -> EntityLink {
        links.for_resource(self)
    }
}

impl Default for LinkFactory {
    fn default() -> Self {
        Self::new("")
    }
}
