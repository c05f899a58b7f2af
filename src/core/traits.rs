use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, FromQueryResult,
    IntoActiveModel,
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::validation::Validatable;

/// Marker for payloads accepted by create and update endpoints.
///
/// Carries no behaviour. Implementing it states that the type is a request
/// DTO and may be bound as `CreateBody`/`UpdateBody` of a [`CrudResource`].
pub trait RequestBody {}

/// Anything identified by a UUID.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

impl Identifiable for Uuid {
    fn id(&self) -> Uuid {
        *self
    }
}

pub trait MergeIntoActiveModel<ActiveModelType> {
    /// Merge this update payload into an existing active model
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` if the merge operation fails due to data conversion issues.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}

/// Describes an API resource backed by a Sea-ORM entity.
///
/// The implementing type is the API-facing representation (what gets
/// serialized into responses). The associated types tie it to the entity,
/// its columns, its active model and the request bodies used to create and
/// update it.
pub trait CrudResource: Identifiable + Serialize + Sized + Send + Sync + 'static {
    type EntityType: EntityTrait<Model = Self::ModelType> + Sync;
    type ModelType: FromQueryResult
        + IntoActiveModel<Self::ActiveModelType>
        + Into<Self>
        + Send
        + Sync;
    type ColumnType: ColumnTrait + std::fmt::Debug + Send + Sync;
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>
        + ActiveModelBehavior
        + Send
        + Sync;
    type CreateBody: RequestBody
        + Validatable
        + DeserializeOwned
        + Into<Self::ActiveModelType>
        + Send
        + Sync
        + 'static;
    type UpdateBody: RequestBody
        + Validatable
        + DeserializeOwned
        + MergeIntoActiveModel<Self::ActiveModelType>
        + Send
        + Sync
        + 'static;

    const ID_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    #[must_use]
    fn default_index_column() -> Self::ColumnType {
        Self::ID_COLUMN
    }

    #[must_use]
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("id", Self::ID_COLUMN)]
    }

    /// Serialization groups of each serialized field.
    ///
    /// A field is emitted when one of its groups is requested. An empty
    /// mapping (the default) disables group filtering for the resource.
    #[must_use]
    fn serialization_groups() -> Vec<(&'static str, &'static [&'static str])> {
        vec![]
    }
}
