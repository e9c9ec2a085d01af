//! In-memory catalog provider.
//!
//! Backs the browser with either the built-in demo catalog or a JSON fixture
//! file, so the UI can be driven without any cloud credentials.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::provider::{Account, Blob, CatalogProvider, Container, Subscription};

/// Whole catalog as nested records. This is also the fixture file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<AccountData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub containers: Vec<ContainerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerData {
    pub name: String,
    #[serde(default)]
    pub public_access: String,
    #[serde(default)]
    pub blobs: Vec<Blob>,
}

pub struct StaticProvider {
    label: String,
    data: CatalogData,
}

impl StaticProvider {
    pub fn new(label: impl Into<String>, data: CatalogData) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }

    /// Demo catalog used when no fixture is configured.
    pub fn sample() -> Self {
        Self::new("sample", sample_catalog())
    }

    /// Load a catalog from a JSON fixture file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog fixture {}", path.display()))?;
        let data: CatalogData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog fixture {}", path.display()))?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "fixture".to_string());
        tracing::info!(
            path = %path.display(),
            subscriptions = data.subscriptions.len(),
            "loaded catalog fixture"
        );
        Ok(Self::new(label, data))
    }

    fn account(&self, name: &str) -> Option<&AccountData> {
        self.data
            .subscriptions
            .iter()
            .flat_map(|s| s.accounts.iter())
            .find(|a| a.name == name)
    }
}

// Unknown keys list as empty rather than failing, like a freshly created
// account or container would.
#[async_trait]
impl CatalogProvider for StaticProvider {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        Ok(self
            .data
            .subscriptions
            .iter()
            .map(|s| Subscription {
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect())
    }

    async fn list_accounts(&self, subscription_id: &str) -> Result<Vec<Account>> {
        Ok(self
            .data
            .subscriptions
            .iter()
            .find(|s| s.id == subscription_id)
            .map(|s| {
                s.accounts
                    .iter()
                    .map(|a| Account {
                        name: a.name.clone(),
                        region: a.region.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_containers(&self, account: &str) -> Result<Vec<Container>> {
        Ok(self
            .account(account)
            .map(|a| {
                a.containers
                    .iter()
                    .map(|c| Container {
                        name: c.name.clone(),
                        public_access: c.public_access.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_blobs(&self, account: &str, container: &str) -> Result<Vec<Blob>> {
        Ok(self
            .account(account)
            .and_then(|a| a.containers.iter().find(|c| c.name == container))
            .map(|c| c.blobs.clone())
            .unwrap_or_default())
    }

    fn name(&self) -> String {
        self.label.clone()
    }
}

fn blob(name: &str, size_bytes: u64, ymdhm: (i32, u32, u32, u32, u32), content_type: &str) -> Blob {
    let (y, mo, d, h, mi) = ymdhm;
    Blob {
        name: name.to_string(),
        size_bytes,
        modified: Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single(),
        content_type: content_type.to_string(),
    }
}

fn sample_catalog() -> CatalogData {
    let dev = AccountData {
        name: "acme-dev".to_string(),
        region: "westeurope".to_string(),
        containers: vec![
            ContainerData {
                name: "images".to_string(),
                public_access: "private".to_string(),
                blobs: vec![
                    blob("hero.jpg", 312_844, (2024, 5, 12, 10, 5), "image/jpeg"),
                    blob("logo.svg", 4_821, (2024, 4, 2, 14, 20), "image/svg+xml"),
                ],
            },
            ContainerData {
                name: "logs".to_string(),
                public_access: "private".to_string(),
                blobs: vec![
                    blob("2024-05-10.log", 982_304, (2024, 5, 10, 3, 12), "text/plain"),
                    blob("2024-05-11.log", 1_048_576, (2024, 5, 11, 3, 12), "text/plain"),
                ],
            },
        ],
    };
    let prod = AccountData {
        name: "acme-prod".to_string(),
        region: "eastus".to_string(),
        containers: vec![
            ContainerData {
                name: "backups".to_string(),
                public_access: "private".to_string(),
                blobs: vec![blob(
                    "db-2024-05-01.bak",
                    358_717_440,
                    (2024, 5, 1, 1, 1),
                    "application/octet-stream",
                )],
            },
            ContainerData {
                name: "public".to_string(),
                public_access: "blob".to_string(),
                blobs: vec![
                    blob("robots.txt", 58, (2024, 3, 1, 9, 0), "text/plain"),
                    blob("index.html", 2_214, (2024, 3, 1, 9, 0), "text/html"),
                ],
            },
        ],
    };

    CatalogData {
        subscriptions: vec![
            SubscriptionData {
                id: "00000000-0000-0000-0000-000000000001".to_string(),
                name: "Development".to_string(),
                accounts: vec![dev],
            },
            SubscriptionData {
                id: "00000000-0000-0000-0000-000000000002".to_string(),
                name: "Production".to_string(),
                accounts: vec![prod],
            },
        ],
    }
}
