use chrono::{DateTime, Utc};
use crudbase::validation::{Validatable, ValidationErrors, validators};
use crudbase::{CrudResource, Identifiable, MergeIntoActiveModel, RequestBody};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member_entity::Entity")]
    Member,
}

impl Related<super::member_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[crudbase::serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Project {
            id: model.id,
            name: model.name,
            code: model.code,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl Identifiable for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

impl RequestBody for ProjectCreate {}

impl Validatable for ProjectCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_not_blank("name", &self.name));
        errors.check(validators::validate_length("code", &self.code, Some(2), Some(4)));
        errors.result()
    }
}

impl From<ProjectCreate> for ActiveModel {
    fn from(body: ProjectCreate) -> Self {
        let now = Utc::now();
        ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(body.name),
            code: ActiveValue::Set(body.code),
            description: ActiveValue::Set(body.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}

impl RequestBody for ProjectUpdate {}

impl Validatable for ProjectUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(validators::validate_not_blank("name", name));
        }
        if let Some(code) = &self.code {
            errors.check(validators::validate_length("code", code, Some(2), Some(4)));
        }
        errors.result()
    }
}

impl MergeIntoActiveModel<ActiveModel> for ProjectUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = ActiveValue::Set(name);
        }
        if let Some(code) = self.code {
            existing.code = ActiveValue::Set(code);
        }
        if let Some(description) = self.description {
            existing.description = ActiveValue::Set(Some(description));
        }
        existing.updated_at = ActiveValue::Set(Utc::now());
        Ok(existing)
    }
}

const DETAIL: &[&str] = &["project:read"];
const LIST: &[&str] = &["project:read", "project:list"];

impl CrudResource for Project {
    type EntityType = Entity;
    type ModelType = Model;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type CreateBody = ProjectCreate;
    type UpdateBody = ProjectUpdate;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "project";
    const RESOURCE_NAME_PLURAL: &'static str = "projects";
    const RESOURCE_DESCRIPTION: &'static str = "Projects for testing";

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("id", Column::Id),
            ("name", Column::Name),
            ("code", Column::Code),
            ("createdAt", Column::CreatedAt),
        ]
    }

    fn serialization_groups() -> Vec<(&'static str, &'static [&'static str])> {
        vec![
            ("id", LIST),
            ("name", LIST),
            ("code", LIST),
            ("description", DETAIL),
            ("createdAt", DETAIL),
            ("updatedAt", DETAIL),
        ]
    }
}
