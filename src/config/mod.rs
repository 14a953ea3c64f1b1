pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::AdvisorSettings;
#[cfg(feature = "cli")]
use toml_config::AdvisorToml;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "package-advisor")]
#[command(about = "Interactive advisor that matches business needs to website packages")]
pub struct CliConfig {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the catalog files and prompt template
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Primary package catalog (required at startup)
    #[arg(long)]
    pub packages_file: Option<String>,

    /// Other services catalog
    #[arg(long)]
    pub services_file: Option<String>,

    /// Unavailable services catalog
    #[arg(long)]
    pub unavailable_file: Option<String>,

    /// Prompt template with a {packages_text} placeholder; built-in template when omitted
    #[arg(long)]
    pub prompt_template: Option<String>,

    /// Model server address
    #[arg(long, env = "OLLAMA_HOST")]
    pub ollama_host: Option<String>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Model request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Keyword matching only, never contact the model
    #[arg(long)]
    pub offline: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the `--config` file if given, then explicit flags.
    pub fn resolve(&self) -> Result<AdvisorSettings> {
        let mut settings = AdvisorSettings::default();

        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path);
            settings = settings.apply_toml(&AdvisorToml::from_file(path)?);
        }

        Ok(self.apply_flags(settings))
    }

    fn apply_flags(&self, mut settings: AdvisorSettings) -> AdvisorSettings {
        if let Some(v) = &self.data_dir {
            settings.data_dir = v.clone();
        }
        if let Some(v) = &self.packages_file {
            settings.packages_file = v.clone();
        }
        if let Some(v) = &self.services_file {
            settings.services_file = v.clone();
        }
        if let Some(v) = &self.unavailable_file {
            settings.unavailable_file = v.clone();
        }
        if let Some(v) = &self.prompt_template {
            settings.prompt_template = Some(v.clone());
        }
        if let Some(v) = &self.ollama_host {
            settings.model_host = v.clone();
        }
        if let Some(v) = &self.model {
            settings.model_name = v.clone();
        }
        if let Some(v) = self.timeout_secs {
            settings.timeout_secs = v;
        }
        if self.offline {
            settings.model_enabled = false;
        }
        settings
    }
}
