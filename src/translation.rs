//! Translation contract and a small in-memory catalog.
//!
//! Messages are templates with `%name%` placeholders. Parameters may be
//! given with or without the surrounding `%`.

use std::collections::{BTreeMap, HashMap};

/// Translator contract consumed by the controller and the notification provider
pub trait Translator: Send + Sync {
    /// Translate `key` within `domain`, substituting `parameters`.
    fn trans(&self, key: &str, parameters: &BTreeMap<String, String>, domain: &str) -> String;
}

/// Replace every `%name%` placeholder of `template` with its parameter value.
///
/// The template is scanned once, so substituted values are never themselves
/// interpolated. Placeholders without a parameter are kept as written.
#[must_use]
pub fn interpolate(template: &str, parameters: &BTreeMap<String, String>) -> String {
    let values: HashMap<&str, &str> = parameters
        .iter()
        .map(|(name, value)| {
            let bare = name
                .strip_prefix('%')
                .and_then(|inner| inner.strip_suffix('%'))
                .unwrap_or(name.as_str());
            (bare, value.as_str())
        })
        .collect();

    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        message.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let known = after
            .find('%')
            .and_then(|end| values.get(&after[..end]).map(|value| (end, *value)));
        match known {
            Some((end, value)) => {
                message.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                message.push('%');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}

/// Translator backed by per-domain `key -> template` maps.
///
/// An unknown key is used as its own template, so an empty catalog behaves
/// as an identity translator that still interpolates parameters.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    domains: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the messages of the built-in error keys
    #[must_use]
    pub fn with_defaults() -> Self {
        let domain = crate::config::DEFAULT_ERROR_DOMAIN;
        Self::new()
            .with_message(
                domain,
                crate::service::errors::ALREADY_EXISTS_KEY,
                "%entity% already exists",
            )
            .with_message(
                domain,
                crate::service::errors::NOT_FOUND_KEY,
                "%entity% not found",
            )
    }

    #[must_use]
    pub fn with_message(
        mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(domain, key, template);
        self
    }

    pub fn insert(
        &mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.domains
            .entry(domain.into())
            .or_default()
            .insert(key.into(), template.into());
    }
}

impl Translator for MessageCatalog {
    fn trans(&self, key: &str, parameters: &BTreeMap<String, String>, domain: &str) -> String {
        let template = self
            .domains
            .get(domain)
            .and_then(|messages| messages.get(key))
            .map_or(key, String::as_str);
        interpolate(template, parameters)
    }
}
