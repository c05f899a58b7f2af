//! Generic repository over a [`CrudResource`].
//!
//! Lookups return `None`/`0` when nothing matches; turning an absence into
//! an error is the service layer's decision.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Value,
};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::core::{CrudResource, MergeIntoActiveModel};

/// Equality criteria used by `find_one_by`/`count_by`, combined with AND.
#[derive(Debug, Clone)]
pub struct Criteria<C> {
    pairs: Vec<(C, Value, String)>,
}

impl<C: ColumnTrait> Criteria<C> {
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    #[must_use]
    pub fn by<V>(column: C, value: V) -> Self
    where
        V: Into<Value> + fmt::Display,
    {
        Self::new().and(column, value)
    }

    #[must_use]
    pub fn and<V>(mut self, column: C, value: V) -> Self
    where
        V: Into<Value> + fmt::Display,
    {
        let shown = value.to_string();
        self.pairs.push((column, value.into(), shown));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        self.pairs
            .iter()
            .fold(Condition::all(), |condition, (column, value, _)| {
                condition.add(column.eq(value.clone()))
            })
    }

    /// Column name to displayed value, for error messages and translations
    #[must_use]
    pub fn parameters(&self) -> BTreeMap<String, String> {
        self.pairs
            .iter()
            .map(|(column, _, shown)| (column.as_str().to_string(), shown.clone()))
            .collect()
    }
}

impl<C: ColumnTrait> Default for Criteria<C> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CrudRepository<T> {
    db: DatabaseConnection,
    resource: PhantomData<fn() -> T>,
}

impl<T> Clone for CrudRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            resource: PhantomData,
        }
    }
}

impl<T: CrudResource> CrudRepository<T> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            resource: PhantomData,
        }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DbErr> {
        let model = T::EntityType::find()
            .filter(T::ID_COLUMN.eq(id))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    pub async fn find_one_by(&self, criteria: &Criteria<T::ColumnType>) -> Result<Option<T>, DbErr> {
        self.find_one_where(criteria.condition()).await
    }

    pub async fn find_one_where(&self, condition: Condition) -> Result<Option<T>, DbErr> {
        let model = T::EntityType::find()
            .filter(condition)
            .order_by(T::default_index_column(), Order::Asc)
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    pub async fn count_by(&self, criteria: &Criteria<T::ColumnType>) -> Result<u64, DbErr> {
        self.count(criteria.condition()).await
    }

    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        let query = T::EntityType::find().filter(condition);
        PaginatorTrait::count(query, &self.db).await
    }

    pub async fn find_all(
        &self,
        condition: Condition,
        order_column: T::ColumnType,
        order_direction: Order,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<T>, DbErr> {
        let models = T::EntityType::find()
            .filter(condition)
            .order_by(order_column, order_direction)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn insert(&self, active_model: T::ActiveModelType) -> Result<T, DbErr> {
        let model = active_model.insert(&self.db).await?;
        Ok(model.into())
    }

    /// Merge `update_model` into the stored entity; `None` when `id` is unknown
    pub async fn update(&self, id: Uuid, update_model: T::UpdateBody) -> Result<Option<T>, DbErr> {
        let Some(model) = T::EntityType::find()
            .filter(T::ID_COLUMN.eq(id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let existing: T::ActiveModelType = model.into_active_model();
        let merged = update_model.merge_into_activemodel(existing)?;
        let updated = merged.update(&self.db).await?;
        Ok(Some(updated.into()))
    }

    /// Hard delete; `false` when nothing matched `id`
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let res = T::EntityType::delete_many()
            .filter(T::ID_COLUMN.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
