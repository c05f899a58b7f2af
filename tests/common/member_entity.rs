use crudbase::{HistoryAction, Identifiable};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership of a user in a project; removed members stay as `delete` rows
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub action: HistoryAction,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_entity::Entity",
        from = "Column::ProjectId",
        to = "super::project_entity::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::project_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Members are compared by the user they point to
impl Identifiable for Model {
    fn id(&self) -> Uuid {
        self.user_id
    }
}
