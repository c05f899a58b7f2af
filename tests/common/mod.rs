#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Utc};
use crudbase::notification::entities::{notification, notification_user};
use crudbase::{CrudController, NotificationImportance};
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection, DbErr, Schema};
use sea_orm_migration::prelude::*;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub mod member_entity;
pub mod project_entity;
pub mod project_service;
pub mod user_entity;

use project_service::ProjectService;

/// Log to the test output; filtered with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn project_controller(db: DatabaseConnection) -> CrudController<ProjectService> {
    CrudController::new(ProjectService::new(db))
}

pub fn setup_test_app(controller: CrudController<ProjectService>) -> Router {
    Router::new().nest("/api/v1/projects", controller.router())
}

/// Send one request and decode the JSON body (`Value::Null` when empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    user_entity::ActiveModel {
        id: ActiveValue::Set(id),
        username: ActiveValue::Set(username.to_string()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub struct NotificationSeed<'a> {
    pub subject: &'a str,
    pub content: &'a str,
    pub importance: NotificationImportance,
    pub details: Value,
    pub target_type: &'a str,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert a notification delivered to every user in `recipients`
pub async fn insert_notification(
    db: &DatabaseConnection,
    seed: NotificationSeed<'_>,
    recipients: &[Uuid],
) -> Uuid {
    let id = Uuid::new_v4();
    notification::ActiveModel {
        id: ActiveValue::Set(id),
        subject: ActiveValue::Set(seed.subject.to_string()),
        content: ActiveValue::Set(seed.content.to_string()),
        importance: ActiveValue::Set(seed.importance),
        details: ActiveValue::Set(seed.details),
        target_type: ActiveValue::Set(seed.target_type.to_string()),
        target_id: ActiveValue::Set(seed.target_id),
        created_at: ActiveValue::Set(seed.created_at),
    }
    .insert(db)
    .await
    .unwrap();

    for user_id in recipients {
        notification_user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            notification_id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(*user_id),
            read_at: ActiveValue::Set(None),
        }
        .insert(db)
        .await
        .unwrap();
    }
    id
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTables)]
    }
}

pub struct CreateTables;

#[async_trait::async_trait]
impl MigrationName for CreateTables {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        manager
            .create_table(schema.create_table_from_entity(project_entity::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(user_entity::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(member_entity::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(notification::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(notification_user::Entity))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ["notification_users", "notifications", "project_members", "users", "projects"] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
