//! Runtime settings for controllers and the notification provider.
//!
//! Both structs deserialize with defaults for every missing key, so they can
//! be embedded in an application's own configuration file.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ERROR_DOMAIN: &str = "errors";
pub const DEFAULT_NOTIFICATION_DOMAIN: &str = "notifications";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    /// Page size used when a list request carries no `limit`
    pub default_limit: u64,
    /// Upper bound applied to the requested `limit`
    pub max_limit: u64,
    /// Translation domain of user-facing error messages
    pub translation_domain: String,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            default_limit: 25,
            max_limit: 100,
            translation_domain: DEFAULT_ERROR_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub default_limit: u64,
    pub max_limit: u64,
    /// Translation domain of notification subjects and contents
    pub translation_domain: String,
    /// Prefix of the URLs built for notification targets
    pub link_base_path: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            translation_domain: DEFAULT_NOTIFICATION_DOMAIN.to_string(),
            link_base_path: "/api".to_string(),
        }
    }
}
