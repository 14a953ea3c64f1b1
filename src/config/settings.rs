use crate::adapters::ollama::{DEFAULT_HOST, DEFAULT_MODEL};
use crate::config::toml_config::AdvisorToml;
use crate::core::catalog::{DEFAULT_PACKAGES_FILE, DEFAULT_SERVICES_FILE, DEFAULT_UNAVAILABLE_FILE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Fully resolved settings: built-in defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorSettings {
    pub data_dir: String,
    pub packages_file: String,
    pub services_file: String,
    pub unavailable_file: String,
    pub prompt_template: Option<String>,
    pub model_host: String,
    pub model_name: String,
    pub timeout_secs: u64,
    pub model_enabled: bool,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            packages_file: DEFAULT_PACKAGES_FILE.to_string(),
            services_file: DEFAULT_SERVICES_FILE.to_string(),
            unavailable_file: DEFAULT_UNAVAILABLE_FILE.to_string(),
            prompt_template: None,
            model_host: DEFAULT_HOST.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            model_enabled: true,
        }
    }
}

impl AdvisorSettings {
    pub fn apply_toml(mut self, file: &AdvisorToml) -> Self {
        let catalog = &file.catalog;
        if let Some(v) = &catalog.data_dir {
            self.data_dir = v.clone();
        }
        if let Some(v) = &catalog.packages_file {
            self.packages_file = v.clone();
        }
        if let Some(v) = &catalog.services_file {
            self.services_file = v.clone();
        }
        if let Some(v) = &catalog.unavailable_file {
            self.unavailable_file = v.clone();
        }
        if let Some(v) = &file.prompt.template_file {
            self.prompt_template = Some(v.clone());
        }
        if let Some(v) = &file.model.host {
            self.model_host = v.clone();
        }
        if let Some(v) = &file.model.name {
            self.model_name = v.clone();
        }
        if let Some(v) = file.model.timeout_seconds {
            self.timeout_secs = v;
        }
        if let Some(v) = file.model.enabled {
            self.model_enabled = v;
        }
        self
    }
}

impl ConfigProvider for AdvisorSettings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn packages_file(&self) -> &str {
        &self.packages_file
    }

    fn services_file(&self) -> &str {
        &self.services_file
    }

    fn unavailable_file(&self) -> &str {
        &self.unavailable_file
    }

    fn prompt_template(&self) -> Option<&str> {
        self.prompt_template.as_deref()
    }

    fn model_host(&self) -> &str {
        &self.model_host
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn model_enabled(&self) -> bool {
        self.model_enabled
    }
}

impl Validate for AdvisorSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog.data_dir", &self.data_dir)?;
        validation::validate_path("catalog.packages_file", &self.packages_file)?;
        validation::validate_path("catalog.services_file", &self.services_file)?;
        validation::validate_path("catalog.unavailable_file", &self.unavailable_file)?;
        if let Some(template) = &self.prompt_template {
            validation::validate_path("prompt.template_file", template)?;
        }

        // Model settings are irrelevant in keyword-only mode.
        if self.model_enabled {
            validation::validate_url("model.host", &self.model_host)?;
            validation::validate_non_empty_string("model.name", &self.model_name)?;
            validation::validate_positive_number("model.timeout_seconds", self.timeout_secs, 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = AdvisorSettings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.request_timeout(), Duration::from_secs(120));
        assert_eq!(settings.model_name(), "llama3.1:8b");
        assert!(settings.prompt_template().is_none());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file = AdvisorToml::from_toml_str(
            r#"
[catalog]
packages_file = "packages.json"

[model]
name = "mistral"
enabled = false
"#,
        )
        .unwrap();

        let settings = AdvisorSettings::default().apply_toml(&file);

        assert_eq!(settings.packages_file, "packages.json");
        assert_eq!(settings.services_file, "02-other-services.json");
        assert_eq!(settings.model_name, "mistral");
        assert!(!settings.model_enabled());
    }

    #[test]
    fn test_default_files_match_catalog_defaults() {
        let settings = AdvisorSettings::default();
        let files = crate::core::catalog::CatalogFiles::from_config(&settings);
        let defaults = crate::core::catalog::CatalogFiles::default();

        assert_eq!(files.packages, defaults.packages);
        assert_eq!(files.services, defaults.services);
        assert_eq!(files.unavailable, defaults.unavailable);
    }

    #[test]
    fn test_validation_rejects_bad_host() {
        let settings = AdvisorSettings {
            model_host: "not a url".to_string(),
            ..AdvisorSettings::default()
        };

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_offline_skips_model_validation() {
        let settings = AdvisorSettings {
            model_host: String::new(),
            timeout_secs: 0,
            model_enabled: false,
            ..AdvisorSettings::default()
        };

        assert!(settings.validate().is_ok());
    }
}
