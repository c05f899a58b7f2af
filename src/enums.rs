use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What happened to a tracked record, typically a pivot row linking two entities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    #[sea_orm(string_value = "create")]
    Create,
    #[sea_orm(string_value = "update")]
    Update,
    #[sea_orm(string_value = "delete")]
    Delete,
}

impl HistoryAction {
    /// Whether the record is still live
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

/// Importance of a notification, ordered from least to most important.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum NotificationImportance {
    #[sea_orm(string_value = "low")]
    Low,
    #[default]
    #[sea_orm(string_value = "normal")]
    Normal,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_ordering() {
        assert!(NotificationImportance::Urgent > NotificationImportance::High);
        assert!(NotificationImportance::Normal > NotificationImportance::Low);
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(
            serde_json::to_value(NotificationImportance::High).unwrap(),
            serde_json::json!("high")
        );
        assert_eq!(
            serde_json::to_value(HistoryAction::Delete).unwrap(),
            serde_json::json!("delete")
        );
        assert_eq!(HistoryAction::Update.to_value(), "update".to_string());
    }

    #[test]
    fn test_history_action_liveness() {
        assert!(HistoryAction::Create.is_active());
        assert!(!HistoryAction::Delete.is_active());
    }
}
