//! Generic CRUD building blocks for Axum and Sea-ORM applications.
//!
//! Describe an entity once with [`CrudResource`], put an [`EntityService`]
//! in front of it (or use [`GenericEntityService`]) and mount a
//! [`CrudController`] router. The [`notification`] module adds per-user
//! notifications on top of the same pagination, link and translation pieces.

pub mod config;
pub mod controller;
pub mod core;
pub mod enums;
pub mod errors;
pub mod link;
pub mod models;
pub mod notification;
pub mod pagination;
pub mod repository;
pub mod serialization;
pub mod service;
pub mod sort;
pub mod translation;
pub mod validation;

pub use config::{CrudConfig, NotificationConfig};
pub use controller::CrudController;
pub use crate::core::{CrudResource, Identifiable, MergeIntoActiveModel, RequestBody};
pub use enums::{HistoryAction, NotificationImportance};
pub use errors::{ApiError, ErrorResponse};
pub use link::{EntityLink, LinkFactory, Linkable};
pub use models::ListQuery;
pub use pagination::{PaginatedResponse, Pagination, PaginationError, PaginationFactory};
pub use repository::{CrudRepository, Criteria};
pub use service::{
    EntityAlreadyExists, EntityNotFound, EntityService, GenericEntityService, ServiceError,
    TranslatableError,
};
pub use translation::{MessageCatalog, Translator};
pub use validation::{Validatable, ValidationError, ValidationErrors};

// Re-exported for `#[serde_with::skip_serializing_none]` on resource structs
pub use serde_with;
