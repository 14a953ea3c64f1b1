pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ollama::OllamaClient;
pub use config::{cli::LocalStorage, settings::AdvisorSettings};
pub use core::{
    advisor::Advisor,
    catalog::{CatalogFiles, CatalogStore},
    prompt::{PromptBuilder, TemplateSource},
    session::{Session, SessionState, TurnOutcome},
};
pub use utils::error::{AdvisorError, Result};
