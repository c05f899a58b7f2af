use axum::http::StatusCode;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use crate::pagination::PaginationError;

pub const ALREADY_EXISTS_KEY: &str = "entity.already_exists";
pub const NOT_FOUND_KEY: &str = "entity.not_found";

/// Errors that carry a translation key for their user-facing message,
/// separate from the diagnostic `Display` output used in logs.
pub trait Translatable {
    fn translation_key(&self) -> &str;
    fn translation_parameters(&self) -> BTreeMap<String, String>;
}

fn describe(criteria: &BTreeMap<String, String>) -> String {
    criteria
        .iter()
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A uniqueness violation: an entity matching the criteria already exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} already exists ({})", describe(.criteria))]
pub struct EntityAlreadyExists {
    pub entity: String,
    pub criteria: BTreeMap<String, String>,
    pub existing_id: Uuid,
}

impl EntityAlreadyExists {
    pub fn new(entity: impl Into<String>, criteria: BTreeMap<String, String>, existing_id: Uuid) -> Self {
        Self {
            entity: entity.into(),
            criteria,
            existing_id,
        }
    }
}

impl Translatable for EntityAlreadyExists {
    fn translation_key(&self) -> &str {
        ALREADY_EXISTS_KEY
    }

    fn translation_parameters(&self) -> BTreeMap<String, String> {
        let mut parameters = self.criteria.clone();
        parameters.insert("entity".to_string(), self.entity.clone());
        parameters
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} not found ({})", describe(.criteria))]
pub struct EntityNotFound {
    pub entity: String,
    pub criteria: BTreeMap<String, String>,
}

impl EntityNotFound {
    pub fn new(entity: impl Into<String>, criteria: BTreeMap<String, String>) -> Self {
        Self {
            entity: entity.into(),
            criteria,
        }
    }

    pub fn with_id(entity: impl Into<String>, id: Uuid) -> Self {
        Self::new(entity, BTreeMap::from([("id".to_string(), id.to_string())]))
    }
}

impl Translatable for EntityNotFound {
    fn translation_key(&self) -> &str {
        NOT_FOUND_KEY
    }

    fn translation_parameters(&self) -> BTreeMap<String, String> {
        let mut parameters = self.criteria.clone();
        parameters.insert("entity".to_string(), self.entity.clone());
        parameters
    }
}

/// Business-rule failure raised by application services.
///
/// `message` is the diagnostic text; clients see the translation of `key`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TranslatableError {
    pub message: String,
    pub key: String,
    pub parameters: BTreeMap<String, String>,
    pub status: StatusCode,
}

impl TranslatableError {
    pub fn new(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            key: key.into(),
            parameters: BTreeMap::new(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Translatable for TranslatableError {
    fn translation_key(&self) -> &str {
        &self.key
    }

    fn translation_parameters(&self) -> BTreeMap<String, String> {
        self.parameters.clone()
    }
}

/// Everything a service or provider may fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    AlreadyExists(#[from] EntityAlreadyExists),
    #[error(transparent)]
    NotFound(#[from] EntityNotFound),
    #[error(transparent)]
    Translatable(#[from] TranslatableError),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Translation key and parameters, for the variants that have one
    #[must_use]
    pub fn translation(&self) -> Option<(&str, BTreeMap<String, String>)> {
        match self {
            Self::AlreadyExists(err) => Some((err.translation_key(), err.translation_parameters())),
            Self::NotFound(err) => Some((err.translation_key(), err.translation_parameters())),
            Self::Translatable(err) => Some((err.translation_key(), err.translation_parameters())),
            Self::Pagination(_) | Self::Database(_) => None,
        }
    }
}
