//! # Entity Services
//!
//! [`EntityService`] is the layer between a controller and a
//! [`CrudRepository`]. Every operation has a default implementation, so a
//! service only overrides what its entity needs; most services only
//! implement the `before_*` hooks to enforce uniqueness rules:
//!
//! ```rust,ignore
//! #[async_trait]
//! impl EntityService for ProjectService {
//!     type Resource = Project;
//!
//!     fn repository(&self) -> &CrudRepository<Project> {
//!         &self.repository
//!     }
//!
//!     async fn before_create(&self, body: &ProjectCreate) -> Result<(), ServiceError> {
//!         self.ensure_entity_does_not_exist(&Criteria::by(Column::Name, body.name.clone()), None)
//!             .await
//!     }
//! }
//! ```
//!
//! Failures are typed ([`EntityAlreadyExists`], [`EntityNotFound`], ...);
//! mapping them to HTTP responses is left to the controller.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Order};
use uuid::Uuid;

use super::collection::{CollectionChanges, update_collection};
use super::errors::{EntityAlreadyExists, EntityNotFound, ServiceError};
use crate::core::{CrudResource, Identifiable};
use crate::repository::{Criteria, CrudRepository};

type CreateBody<S> = <<S as EntityService>::Resource as CrudResource>::CreateBody;
type UpdateBody<S> = <<S as EntityService>::Resource as CrudResource>::UpdateBody;
type ColumnOf<S> = <<S as EntityService>::Resource as CrudResource>::ColumnType;

/// Fetch `id` from any resource repository, failing with [`EntityNotFound`].
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] when no entity has this id and
/// [`ServiceError::Database`] when the lookup fails.
pub async fn find_entity_by_id<R: CrudResource>(
    id: Uuid,
    repository: &CrudRepository<R>,
) -> Result<R, ServiceError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| EntityNotFound::with_id(R::RESOURCE_NAME_SINGULAR, id).into())
}

#[async_trait]
pub trait EntityService: Send + Sync + 'static {
    type Resource: CrudResource;

    fn repository(&self) -> &CrudRepository<Self::Resource>;

    fn connection(&self) -> &DatabaseConnection {
        self.repository().connection()
    }

    // ==========================================
    // HOOKS
    // ==========================================

    /// Runs before a validated create body is persisted
    async fn before_create(&self, _body: &CreateBody<Self>) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Runs before a validated update body is merged into entity `id`
    async fn before_update(&self, _id: Uuid, _body: &UpdateBody<Self>) -> Result<(), ServiceError> {
        Ok(())
    }

    // ==========================================
    // CRUD OPERATIONS
    // ==========================================

    async fn create(&self, body: CreateBody<Self>) -> Result<Self::Resource, ServiceError> {
        self.before_create(&body).await?;
        let created = self.repository().insert(body.into()).await?;
        tracing::debug!(
            resource = <Self::Resource as CrudResource>::RESOURCE_NAME_SINGULAR,
            id = %created.id(),
            "Entity created"
        );
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Self::Resource, ServiceError> {
        find_entity_by_id(id, self.repository()).await
    }

    /// One page of entities plus the total number of matches
    async fn list(
        &self,
        condition: Condition,
        order_column: ColumnOf<Self>,
        order_direction: Order,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Self::Resource>, u64), ServiceError> {
        let items = self
            .repository()
            .find_all(condition.clone(), order_column, order_direction, offset, limit)
            .await?;
        let total = self.repository().count(condition).await?;
        Ok((items, total))
    }

    async fn update(&self, id: Uuid, body: UpdateBody<Self>) -> Result<Self::Resource, ServiceError> {
        self.before_update(id, &body).await?;
        self.repository().update(id, body).await?.ok_or_else(|| {
            EntityNotFound::with_id(<Self::Resource as CrudResource>::RESOURCE_NAME_SINGULAR, id)
                .into()
        })
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid, ServiceError> {
        if self.repository().delete(id).await? {
            Ok(id)
        } else {
            Err(EntityNotFound::with_id(<Self::Resource as CrudResource>::RESOURCE_NAME_SINGULAR, id).into())
        }
    }

    // ==========================================
    // EXISTENCE CHECKS
    // ==========================================

    /// Fail with [`EntityAlreadyExists`] when an entity other than
    /// `ignored_id` matches `criteria`.
    async fn ensure_entity_does_not_exist(
        &self,
        criteria: &Criteria<ColumnOf<Self>>,
        ignored_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut condition = criteria.condition();
        if let Some(ignored) = ignored_id {
            condition = condition.add(<Self::Resource as CrudResource>::ID_COLUMN.ne(ignored));
        }

        match self.repository().find_one_where(condition).await? {
            Some(existing) => Err(EntityAlreadyExists::new(
                <Self::Resource as CrudResource>::RESOURCE_NAME_SINGULAR,
                criteria.parameters(),
                existing.id(),
            )
            .into()),
            None => Ok(()),
        }
    }

    /// Return the entity matching `criteria`, failing with [`EntityNotFound`].
    async fn ensure_entity_exists(
        &self,
        criteria: &Criteria<ColumnOf<Self>>,
    ) -> Result<Self::Resource, ServiceError> {
        self.repository().find_one_by(criteria).await?.ok_or_else(|| {
            EntityNotFound::new(
                <Self::Resource as CrudResource>::RESOURCE_NAME_SINGULAR,
                criteria.parameters(),
            )
            .into()
        })
    }

    async fn find_entity_by_id<R: CrudResource>(
        &self,
        id: Uuid,
        repository: &CrudRepository<R>,
    ) -> Result<R, ServiceError> {
        find_entity_by_id(id, repository).await
    }

    // ==========================================
    // RELATIONS
    // ==========================================

    /// See [`update_collection`](super::collection::update_collection)
    fn update_collection<C, I, D, A, R>(
        &self,
        current: I,
        desired: D,
        add: A,
        remove: R,
    ) -> CollectionChanges
    where
        C: Identifiable,
        I: IntoIterator<Item = C>,
        D: IntoIterator<Item = Uuid>,
        A: FnMut(Uuid),
        R: FnMut(C),
    {
        update_collection(current, desired, add, remove)
    }
}

/// Service with every default and no hooks
pub struct GenericEntityService<T> {
    repository: CrudRepository<T>,
}

impl<T: CrudResource> GenericEntityService<T> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repository: CrudRepository::new(db),
        }
    }
}

impl<T> Clone for GenericEntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

#[async_trait]
impl<T: CrudResource> EntityService for GenericEntityService<T> {
    type Resource = T;

    fn repository(&self) -> &CrudRepository<T> {
        &self.repository
    }
}
