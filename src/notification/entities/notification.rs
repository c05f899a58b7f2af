use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::NotificationImportance;

/// A notification shared by every user it was sent to.
///
/// `subject` and `content` are translation keys (or raw templates) whose
/// `%name%` placeholders are filled from `details`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub importance: NotificationImportance,
    pub details: Json,
    pub target_type: String,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notification_user::Entity")]
    NotificationUser,
}

impl Related<super::notification_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NotificationUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
