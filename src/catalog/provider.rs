use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub public_access: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub name: String,
    #[serde(default)]
    pub size_bytes: u64,
    /// `None` when the service did not report a timestamp.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content_type: String,
}

/// Catalog level a fetch was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Subscriptions,
    Accounts,
    Containers,
    Blobs,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Subscriptions => "subscriptions",
            Scope::Accounts => "accounts",
            Scope::Containers => "containers",
            Scope::Blobs => "blobs",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed catalog fetch, tagged with the level that was being loaded.
#[derive(Debug, thiserror::Error)]
#[error("Error loading {scope}: {source}")]
pub struct ProviderError {
    pub scope: Scope,
    #[source]
    pub source: anyhow::Error,
}

impl ProviderError {
    pub fn new(scope: Scope, source: anyhow::Error) -> Self {
        Self { scope, source }
    }
}

/// Data source for the browser.
///
/// Implementations only list; every call returns entries in the order they
/// should be displayed. Failures are plain `anyhow` errors, the caller
/// attaches the [`Scope`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    async fn list_accounts(&self, subscription_id: &str) -> Result<Vec<Account>>;

    async fn list_containers(&self, account: &str) -> Result<Vec<Container>>;

    async fn list_blobs(&self, account: &str, container: &str) -> Result<Vec<Blob>>;

    /// Short label shown in the status bar.
    fn name(&self) -> String {
        "catalog".to_string()
    }
}
