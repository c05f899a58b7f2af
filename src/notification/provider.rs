use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::repository::{NotificationRead, NotificationReadRepository};
use crate::config::NotificationConfig;
use crate::enums::NotificationImportance;
use crate::link::{EntityLink, LinkFactory};
use crate::pagination::{PaginatedResponse, PaginationFactory};
use crate::service::{EntityNotFound, ServiceError};
use crate::translation::Translator;

/// A translated notification as seen by one user
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: Uuid,
    pub subject: String,
    pub content: String,
    pub importance: NotificationImportance,
    pub link: EntityLink,
    pub read_at: Option<DateTime<Utc>>,
}

impl NotificationView {
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// The notifications of one importance level within a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    pub importance: NotificationImportance,
    pub unread: u64,
    pub notifications: Vec<NotificationView>,
}

pub type NotificationResponse = PaginatedResponse<NotificationView>;
pub type NotificationGroupResponse = PaginatedResponse<NotificationGroup>;

/// Builds the notification read-models of a user.
pub struct NotificationProvider<R> {
    repository: R,
    translator: Arc<dyn Translator>,
    links: LinkFactory,
    config: NotificationConfig,
}

impl<R: NotificationReadRepository> NotificationProvider<R> {
    #[must_use]
    pub fn new(repository: R, translator: Arc<dyn Translator>, config: NotificationConfig) -> Self {
        let links = LinkFactory::new(config.link_base_path.clone());
        Self {
            repository,
            translator,
            links,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// One page of the user's notifications, translated, with page metadata.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Pagination`] for a zero `limit`, [`ServiceError::Database`]
    /// when a query fails.
    pub async fn provide(
        &self,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<NotificationResponse, ServiceError> {
        PaginationFactory::create(0, offset, limit)?;

        let reads = self.repository.find_by_user(user_id, limit, offset).await?;
        let total = self.repository.count_by_user(user_id).await?;
        let metadata = PaginationFactory::create(total, offset, limit)?;

        let data = reads.into_iter().map(|read| self.view(read)).collect();
        Ok(NotificationResponse::new(data, metadata))
    }

    /// Same page as [`provide`](Self::provide), grouped by importance with the
    /// most important group first.
    ///
    /// # Errors
    ///
    /// See [`provide`](Self::provide).
    pub async fn provide_grouped(
        &self,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<NotificationGroupResponse, ServiceError> {
        let page = self.provide(user_id, limit, offset).await?;

        let mut groups: BTreeMap<NotificationImportance, Vec<NotificationView>> = BTreeMap::new();
        for view in page.data {
            groups.entry(view.importance).or_default().push(view);
        }

        let data = groups
            .into_iter()
            .rev()
            .map(|(importance, notifications)| NotificationGroup {
                importance,
                unread: notifications.iter().filter(|view| !view.is_read()).count() as u64,
                notifications,
            })
            .collect();
        Ok(NotificationGroupResponse::new(data, page.metadata))
    }

    /// # Errors
    ///
    /// [`ServiceError::Database`] when the count fails.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, ServiceError> {
        Ok(self.repository.count_unread_by_user(user_id).await?)
    }

    /// Mark a notification as read for the user. Reading twice keeps the
    /// first timestamp.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] when the user has no such notification.
    pub async fn mark_as_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<NotificationView, ServiceError> {
        let read = self
            .repository
            .mark_read(user_id, notification_id, Utc::now())
            .await?
            .ok_or_else(|| EntityNotFound::with_id("notification", notification_id))?;
        tracing::debug!(user = %user_id, notification = %notification_id, "Notification read");
        Ok(self.view(read))
    }

    fn view(&self, read: NotificationRead) -> NotificationView {
        let NotificationRead {
            notification,
            read_at,
        } = read;
        let placeholders = placeholders(&notification.details);
        let domain = self.config.translation_domain.as_str();

        NotificationView {
            id: notification.id,
            subject: self.translator.trans(&notification.subject, &placeholders, domain),
            content: self.translator.trans(&notification.content, &placeholders, domain),
            importance: notification.importance,
            link: self.links.create(&notification.target_type, notification.target_id),
            read_at,
        }
    }
}

/// Detail values as translation parameters; non-string values use their JSON text
fn placeholders(details: &Value) -> BTreeMap<String, String> {
    let Value::Object(fields) = details else {
        return BTreeMap::new();
    };
    fields
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (name.clone(), value)
        })
        .collect()
}
