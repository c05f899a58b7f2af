//! Per-user notifications: storage entities, the read repository, the
//! provider that translates and links them, and the HTTP routes.

pub mod entities;
pub mod provider;
pub mod repository;
pub mod routes;

pub use provider::{
    NotificationGroup, NotificationGroupResponse, NotificationProvider, NotificationResponse,
    NotificationView,
};
pub use repository::{NotificationRead, NotificationReadRepository, SeaOrmNotificationRepository};
pub use routes::{CurrentUser, UnreadCount, notification_router};
