//! Generic CRUD controller.
//!
//! [`CrudController`] wraps an [`EntityService`] and owns the HTTP concerns:
//! request validation, status codes, serialization groups and error
//! mapping. It is the Axum state of the router built by
//! [`CrudController::router`]:
//!
//! ```rust,ignore
//! let projects = CrudController::new(ProjectService::new(db.clone()))
//!     .with_groups(&["project:read"]);
//! let app = Router::new().nest("/projects", projects.router());
//! ```

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use hyper::HeaderMap;
use sea_orm::Condition;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CrudConfig;
use crate::core::{CrudResource, Identifiable};
use crate::errors::ApiError;
use crate::models::ListQuery;
use crate::pagination::{PaginatedResponse, PaginationFactory, calculate_content_range};
use crate::serialization::serialize_resource;
use crate::service::{EntityService, ServiceError};
use crate::sort::parse_sorting;
use crate::translation::{MessageCatalog, Translator};
use crate::validation::Validatable;

type ResourceOf<S> = <S as EntityService>::Resource;
type CreateBody<S> = <ResourceOf<S> as CrudResource>::CreateBody;
type UpdateBody<S> = <ResourceOf<S> as CrudResource>::UpdateBody;

pub struct CrudController<S> {
    service: Arc<S>,
    groups: Arc<[&'static str]>,
    translator: Arc<dyn Translator>,
    config: Arc<CrudConfig>,
}

impl<S> Clone for CrudController<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            groups: Arc::clone(&self.groups),
            translator: Arc::clone(&self.translator),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: EntityService> CrudController<S> {
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            groups: Arc::from(Vec::new()),
            translator: Arc::new(MessageCatalog::with_defaults()),
            config: Arc::new(CrudConfig::default()),
        }
    }

    /// Serialization groups emitted in every response body
    #[must_use]
    pub fn with_groups(mut self, groups: &[&'static str]) -> Self {
        self.groups = Arc::from(groups);
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: CrudConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate `body`, create the entity and return it with `201 Created`.
    ///
    /// # Errors
    ///
    /// `400` when the body is invalid (the service is not called), otherwise
    /// whatever the service fails with.
    pub async fn create(&self, body: CreateBody<S>) -> Result<(StatusCode, Json<Value>), ApiError> {
        self.validate(&body)?;

        let created = self.service.create(body).await.map_err(|err| self.map_error(err))?;
        tracing::debug!(
            resource = <ResourceOf<S> as CrudResource>::RESOURCE_NAME_SINGULAR,
            id = %created.id(),
            "Created"
        );
        Ok((StatusCode::CREATED, Json(self.serialize(&created)?)))
    }

    /// # Errors
    ///
    /// `404` when no entity has this id.
    pub async fn get_one(&self, id: Uuid) -> Result<Json<Value>, ApiError> {
        let item = self.service.get(id).await.map_err(|err| self.map_error(err))?;
        Ok(Json(self.serialize(&item)?))
    }

    /// # Errors
    ///
    /// `400` when the requested limit is zero.
    pub async fn get_all(
        &self,
        query: &ListQuery,
    ) -> Result<(HeaderMap, Json<PaginatedResponse<Value>>), ApiError> {
        let limit = query.limit_or(self.config.default_limit, self.config.max_limit);
        let offset = query.offset();
        // Reject a zero limit before touching the database
        PaginationFactory::create(0, offset, limit)?;

        let (order_column, order_direction) = parse_sorting(
            query,
            &<ResourceOf<S> as CrudResource>::sortable_columns(),
            <ResourceOf<S> as CrudResource>::default_index_column(),
        );
        let (items, total) = self
            .service
            .list(Condition::all(), order_column, order_direction, offset, limit)
            .await
            .map_err(|err| self.map_error(err))?;

        let metadata = PaginationFactory::create(total, offset, limit)?;
        let data = items
            .iter()
            .map(|item| self.serialize(item))
            .collect::<Result<Vec<_>, _>>()?;
        let headers = calculate_content_range(
            offset,
            limit,
            total,
            <ResourceOf<S> as CrudResource>::RESOURCE_NAME_PLURAL,
        );
        Ok((headers, Json(PaginatedResponse::new(data, metadata))))
    }

    /// # Errors
    ///
    /// `400` when the body is invalid, `404` for an unknown id, `409` when the
    /// service detects a conflict.
    pub async fn update(&self, id: Uuid, body: UpdateBody<S>) -> Result<Json<Value>, ApiError> {
        self.validate(&body)?;

        let updated = self.service.update(id, body).await.map_err(|err| self.map_error(err))?;
        tracing::debug!(
            resource = <ResourceOf<S> as CrudResource>::RESOURCE_NAME_SINGULAR,
            id = %id,
            "Updated"
        );
        Ok(Json(self.serialize(&updated)?))
    }

    /// # Errors
    ///
    /// `404` when no entity has this id.
    pub async fn delete(&self, id: Uuid) -> Result<StatusCode, ApiError> {
        self.service.delete(id).await.map_err(|err| self.map_error(err))?;
        tracing::debug!(
            resource = <ResourceOf<S> as CrudResource>::RESOURCE_NAME_SINGULAR,
            id = %id,
            "Deleted"
        );
        Ok(StatusCode::NO_CONTENT)
    }

    /// Mount the CRUD endpoints on `/` and `/{id}`
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(get_all_handler::<S>).post(create_one_handler::<S>))
            .route(
                "/{id}",
                get(get_one_handler::<S>)
                    .put(update_one_handler::<S>)
                    .delete(delete_one_handler::<S>),
            )
            .with_state(self)
    }

    fn validate<B: Validatable>(&self, body: &B) -> Result<(), ApiError> {
        body.validate().map_err(|violations| {
            tracing::error!(
                resource = <ResourceOf<S> as CrudResource>::RESOURCE_NAME_SINGULAR,
                violations = %violations,
                "Request body failed validation"
            );
            ApiError::validation_failed(violations.messages())
        })
    }

    fn serialize(&self, resource: &ResourceOf<S>) -> Result<Value, ApiError> {
        serialize_resource(resource, &self.groups)
            .map_err(|err| ApiError::internal("Failed to serialize response", Some(err.to_string())))
    }

    fn map_error(&self, err: ServiceError) -> ApiError {
        ApiError::from_service_error(err, self.translator.as_ref(), &self.config.translation_domain)
    }
}

pub async fn create_one_handler<S: EntityService>(
    State(controller): State<CrudController<S>>,
    Json(body): Json<CreateBody<S>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    controller.create(body).await
}

pub async fn get_one_handler<S: EntityService>(
    State(controller): State<CrudController<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    controller.get_one(id).await
}

pub async fn get_all_handler<S: EntityService>(
    State(controller): State<CrudController<S>>,
    Query(query): Query<ListQuery>,
) -> Result<(HeaderMap, Json<PaginatedResponse<Value>>), ApiError> {
    controller.get_all(&query).await
}

pub async fn update_one_handler<S: EntityService>(
    State(controller): State<CrudController<S>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBody<S>>,
) -> Result<Json<Value>, ApiError> {
    controller.update(id, body).await
}

pub async fn delete_one_handler<S: EntityService>(
    State(controller): State<CrudController<S>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    controller.delete(id).await
}
