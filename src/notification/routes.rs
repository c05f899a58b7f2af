use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::provider::{
    NotificationGroupResponse, NotificationProvider, NotificationResponse, NotificationView,
};
use super::repository::NotificationReadRepository;
use crate::config::DEFAULT_ERROR_DOMAIN;
use crate::errors::ApiError;
use crate::models::ListQuery;
use crate::service::ServiceError;

/// Id of the authenticated user, inserted as a request extension by the
/// application's authentication layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub unread: u64,
}

type ProviderState<R> = State<Arc<NotificationProvider<R>>>;

fn limits<R: NotificationReadRepository>(
    provider: &NotificationProvider<R>,
    query: &ListQuery,
) -> (u64, u64) {
    let config = provider.config();
    (query.limit_or(config.default_limit, config.max_limit), query.offset())
}

fn to_api_error<R: NotificationReadRepository>(
    provider: &NotificationProvider<R>,
    err: ServiceError,
) -> ApiError {
    ApiError::from_service_error(err, provider.translator(), DEFAULT_ERROR_DOMAIN)
}

pub async fn list_notifications<R: NotificationReadRepository + 'static>(
    State(provider): ProviderState<R>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let (limit, offset) = limits(&provider, &query);
    let page = provider
        .provide(user_id, limit, offset)
        .await
        .map_err(|err| to_api_error(&provider, err))?;
    Ok(Json(page))
}

pub async fn list_grouped_notifications<R: NotificationReadRepository + 'static>(
    State(provider): ProviderState<R>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<NotificationGroupResponse>, ApiError> {
    let (limit, offset) = limits(&provider, &query);
    let page = provider
        .provide_grouped(user_id, limit, offset)
        .await
        .map_err(|err| to_api_error(&provider, err))?;
    Ok(Json(page))
}

pub async fn unread_notifications<R: NotificationReadRepository + 'static>(
    State(provider): ProviderState<R>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<UnreadCount>, ApiError> {
    let unread = provider
        .unread_count(user_id)
        .await
        .map_err(|err| to_api_error(&provider, err))?;
    Ok(Json(UnreadCount { unread }))
}

pub async fn mark_notification_read<R: NotificationReadRepository + 'static>(
    State(provider): ProviderState<R>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationView>, ApiError> {
    let view = provider
        .mark_as_read(user_id, id)
        .await
        .map_err(|err| to_api_error(&provider, err))?;
    Ok(Json(view))
}

/// Notification endpoints of the current user. Requests must carry a
/// [`CurrentUser`] extension.
pub fn notification_router<R: NotificationReadRepository + 'static>(
    provider: NotificationProvider<R>,
) -> Router {
    Router::new()
        .route("/", get(list_notifications::<R>))
        .route("/grouped", get(list_grouped_notifications::<R>))
        .route("/unread-count", get(unread_notifications::<R>))
        .route("/{id}/read", post(mark_notification_read::<R>))
        .with_state(Arc::new(provider))
}
