use crate::core::{Catalog, ConfigProvider, OtherService, Package, Storage, UnavailableService};
use crate::utils::error::{AdvisorError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PlansDocument {
    #[serde(default)]
    plans: Option<Vec<Package>>,
}

#[derive(Debug, Deserialize)]
struct OtherServicesDocument {
    #[serde(default)]
    other_services: Option<Vec<OtherService>>,
}

#[derive(Debug, Deserialize)]
struct UnavailableServicesDocument {
    #[serde(default)]
    unavailable_services: Option<Vec<UnavailableService>>,
}

pub const DEFAULT_PACKAGES_FILE: &str = "01-frontend-services.json";
pub const DEFAULT_SERVICES_FILE: &str = "02-other-services.json";
pub const DEFAULT_UNAVAILABLE_FILE: &str = "03-unavailable-services.json";

/// Relative paths of the three catalog documents.
#[derive(Debug, Clone)]
pub struct CatalogFiles {
    pub packages: String,
    pub services: String,
    pub unavailable: String,
}

impl CatalogFiles {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            packages: config.packages_file().to_string(),
            services: config.services_file().to_string(),
            unavailable: config.unavailable_file().to_string(),
        }
    }
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES_FILE.to_string(),
            services: DEFAULT_SERVICES_FILE.to_string(),
            unavailable: DEFAULT_UNAVAILABLE_FILE.to_string(),
        }
    }
}

pub struct CatalogStore<S: Storage> {
    storage: S,
    files: CatalogFiles,
}

impl<S: Storage> CatalogStore<S> {
    pub fn new(storage: S, files: CatalogFiles) -> Self {
        Self { storage, files }
    }

    /// Reads all three documents. Only the primary package document is required;
    /// the other two fall back to empty sections.
    pub async fn load(&self) -> Result<Catalog> {
        let packages = self.load_packages().await?;

        let other_services = self
            .load_optional::<OtherServicesDocument>(&self.files.services)
            .await
            .and_then(|doc| doc.other_services)
            .unwrap_or_default();

        let unavailable_services = self
            .load_optional::<UnavailableServicesDocument>(&self.files.unavailable)
            .await
            .and_then(|doc| doc.unavailable_services)
            .unwrap_or_default();

        let catalog = Catalog {
            packages,
            other_services,
            unavailable_services,
        };
        tracing::info!("{}", catalog.summary_line());
        Ok(catalog)
    }

    async fn load_packages(&self) -> Result<Vec<Package>> {
        let path = &self.files.packages;
        let bytes = self.storage.read_file(path).await.map_err(|e| match e {
            AdvisorError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                AdvisorError::CatalogNotFound { path: path.clone() }
            }
            other => AdvisorError::CatalogUnreadable {
                path: path.clone(),
                message: other.to_string(),
            },
        })?;

        let document: PlansDocument = parse_document(path, &bytes)?;
        match document.plans {
            Some(plans) => {
                tracing::debug!("Parsed {} packages from {}", plans.len(), path);
                Ok(plans)
            }
            None => {
                tracing::warn!("{} has no \"plans\" collection; package list is empty", path);
                Ok(Vec::new())
            }
        }
    }

    async fn load_optional<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let bytes = match self.storage.read_file(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Skipping optional catalog file {}: {}", path, e);
                return None;
            }
        };

        match parse_document(path, &bytes) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Ignoring optional catalog file: {}", e);
                None
            }
        }
    }
}

fn parse_document<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| AdvisorError::CatalogParse {
        path: path.to_string(),
        message: e.to_string(),
    })
}
