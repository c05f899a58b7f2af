use async_trait::async_trait;
use crudbase::repository::{Criteria, CrudRepository};
use crudbase::service::{CollectionChanges, EntityService, ServiceError};
use crudbase::HistoryAction;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use super::member_entity;
use super::project_entity::{Column, Project, ProjectCreate, ProjectUpdate};
use super::user_entity::User;

/// Projects with unique names and a member list
pub struct ProjectService {
    repository: CrudRepository<Project>,
    users: CrudRepository<User>,
    accepted: Arc<AtomicUsize>,
}

impl ProjectService {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self {
            repository: CrudRepository::new(db.clone()),
            users: CrudRepository::new(db),
            accepted: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of bodies that reached the service hooks
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub async fn active_members(&self, project_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        let rows = member_entity::Entity::find()
            .filter(member_entity::Column::ProjectId.eq(project_id))
            .all(self.connection())
            .await?;
        Ok(rows
            .into_iter()
            .filter(|row| row.action.is_active())
            .map(|row| row.user_id)
            .collect())
    }

    /// Replace the members of a project; unknown users fail with `EntityNotFound`
    pub async fn set_members(
        &self,
        project_id: Uuid,
        user_ids: Vec<Uuid>,
    ) -> Result<CollectionChanges, ServiceError> {
        self.get(project_id).await?;
        for user_id in &user_ids {
            self.find_entity_by_id(*user_id, &self.users).await?;
        }

        let current: Vec<member_entity::Model> = member_entity::Entity::find()
            .filter(member_entity::Column::ProjectId.eq(project_id))
            .all(self.connection())
            .await?
            .into_iter()
            .filter(|row| row.action.is_active())
            .collect();

        let mut added = Vec::new();
        let mut removed = Vec::new();
        let changes = self.update_collection(
            current,
            user_ids,
            |user_id| added.push(user_id),
            |member| removed.push(member),
        );

        for user_id in added {
            member_entity::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                project_id: ActiveValue::Set(project_id),
                user_id: ActiveValue::Set(user_id),
                action: ActiveValue::Set(HistoryAction::Create),
            }
            .insert(self.connection())
            .await?;
        }
        for member in removed {
            let mut active: member_entity::ActiveModel = member.into();
            active.action = ActiveValue::Set(HistoryAction::Delete);
            active.update(self.connection()).await?;
        }

        Ok(changes)
    }
}

#[async_trait]
impl EntityService for ProjectService {
    type Resource = Project;

    fn repository(&self) -> &CrudRepository<Project> {
        &self.repository
    }

    async fn before_create(&self, body: &ProjectCreate) -> Result<(), ServiceError> {
        self.accepted.fetch_add(1, Ordering::SeqCst);
        self.ensure_entity_does_not_exist(&Criteria::by(Column::Name, body.name.clone()), None)
            .await
    }

    async fn before_update(&self, id: Uuid, body: &ProjectUpdate) -> Result<(), ServiceError> {
        self.accepted.fetch_add(1, Ordering::SeqCst);
        match &body.name {
            Some(name) => {
                self.ensure_entity_does_not_exist(&Criteria::by(Column::Name, name.clone()), Some(id))
                    .await
            }
            None => Ok(()),
        }
    }
}
