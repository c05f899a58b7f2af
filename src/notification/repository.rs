use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{notification, notification_user};

/// A notification together with the user's read state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRead {
    pub notification: notification::Model,
    pub read_at: Option<DateTime<Utc>>,
}

/// Per-user notification queries consumed by the provider.
///
/// Pages are ordered newest first. Deliveries whose notification no longer
/// exists are neither listed nor counted.
#[async_trait]
pub trait NotificationReadRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<NotificationRead>, DbErr>;

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DbErr>;

    async fn count_unread_by_user(&self, user_id: Uuid) -> Result<u64, DbErr>;

    /// Set `read_at` if unset; `None` when the user never received the notification
    async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<NotificationRead>, DbErr>;
}

#[derive(Clone)]
pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationReadRepository for SeaOrmNotificationRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<NotificationRead>, DbErr> {
        let rows = notification_user::Entity::find()
            .inner_join(notification::Entity)
            .filter(notification_user::Column::UserId.eq(user_id))
            .select_also(notification::Entity)
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_asc(notification_user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(read, notification)| {
                notification.map(|notification| NotificationRead {
                    notification,
                    read_at: read.read_at,
                })
            })
            .collect())
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DbErr> {
        notification_user::Entity::find()
            .inner_join(notification::Entity)
            .filter(notification_user::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
    }

    async fn count_unread_by_user(&self, user_id: Uuid) -> Result<u64, DbErr> {
        notification_user::Entity::find()
            .inner_join(notification::Entity)
            .filter(notification_user::Column::UserId.eq(user_id))
            .filter(notification_user::Column::ReadAt.is_null())
            .count(&self.db)
            .await
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<NotificationRead>, DbErr> {
        let Some((read, Some(notification))) = notification_user::Entity::find()
            .filter(notification_user::Column::UserId.eq(user_id))
            .filter(notification_user::Column::NotificationId.eq(notification_id))
            .find_also_related(notification::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let read = if read.read_at.is_some() {
            read
        } else {
            let mut active: notification_user::ActiveModel = read.into();
            active.read_at = Set(Some(at));
            active.update(&self.db).await?
        };

        Ok(Some(NotificationRead {
            notification,
            read_at: read.read_at,
        }))
    }
}
