// Generic entity service, its typed errors and the relation diff helper

pub mod collection;
pub mod entity_service;
pub mod errors;

pub use collection::{CollectionChanges, CollectionDiff, diff_collection, update_collection};
pub use entity_service::{EntityService, GenericEntityService, find_entity_by_id};
pub use errors::{
    EntityAlreadyExists, EntityNotFound, ServiceError, Translatable, TranslatableError,
};
