use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Model request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    #[error("Catalog file {path} is malformed: {message}")]
    CatalogParse { path: String, message: String },

    #[error("Catalog file {path} could not be read: {message}")]
    CatalogUnreadable { path: String, message: String },

    #[error("Prompt unavailable: {reason}")]
    PromptUnavailable { reason: String },

    #[error("Malformed model response: {message}")]
    ModelResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Prompt,
    Model,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a startup failure of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::CatalogNotFound { .. }
            | AdvisorError::CatalogParse { .. }
            | AdvisorError::CatalogUnreadable { .. } => ErrorCategory::Catalog,
            AdvisorError::PromptUnavailable { .. } => ErrorCategory::Prompt,
            AdvisorError::ApiError(_) | AdvisorError::ModelResponse { .. } => {
                ErrorCategory::Model
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::ConfigValidationError { .. } => ErrorCategory::Config,
            AdvisorError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Catalog => ErrorSeverity::Critical,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Model | ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Prompt => ErrorSeverity::Low,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::CatalogNotFound { .. } => {
                "Check --data-dir and --packages-file point at an existing catalog file"
            }
            AdvisorError::CatalogParse { .. } => {
                "Fix the JSON syntax of the catalog file; packages live under a top-level \"plans\" array"
            }
            AdvisorError::CatalogUnreadable { .. } => {
                "Check that the catalog file is readable by the current user"
            }
            AdvisorError::PromptUnavailable { .. } => {
                "Make sure the prompt template exists and contains exactly one {packages_text} placeholder"
            }
            AdvisorError::ApiError(_) => {
                "Is the model server running? Try `ollama serve` or set --ollama-host / OLLAMA_HOST"
            }
            AdvisorError::ModelResponse { .. } => {
                "Check that the configured model is pulled on the server and try again"
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::ConfigValidationError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
            AdvisorError::IoError(_) => {
                "Check file permissions and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::CatalogNotFound { path } => {
                format!("The package catalog could not be found at {}", path)
            }
            AdvisorError::CatalogParse { path, .. } => {
                format!("The package catalog at {} is not valid JSON", path)
            }
            AdvisorError::CatalogUnreadable { path, .. } => {
                format!("The package catalog at {} could not be read", path)
            }
            AdvisorError::PromptUnavailable { .. } => {
                "Automated advice is unavailable right now; showing keyword matches only".to_string()
            }
            AdvisorError::ApiError(_) | AdvisorError::ModelResponse { .. } => {
                "The advisor is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_are_critical() {
        let err = AdvisorError::CatalogNotFound {
            path: "data/packages.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Catalog);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("data/packages.json"));
    }

    #[test]
    fn test_model_errors_are_recoverable() {
        let err = AdvisorError::ModelResponse {
            message: "missing message.content".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert!(err.severity() < ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "The advisor is temporarily unavailable"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = AdvisorError::InvalidConfigValueError {
            field: "model.host".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'ftp://x' for model.host: Unsupported URL scheme: ftp"
        );
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_exit_codes_by_severity() {
        let prompt = AdvisorError::PromptUnavailable {
            reason: "template missing".to_string(),
        };
        let io = AdvisorError::IoError(std::io::Error::other("disk"));
        let config = AdvisorError::ConfigError {
            message: "bad".to_string(),
        };
        let catalog = AdvisorError::CatalogUnreadable {
            path: "plans.json".to_string(),
            message: "permission denied".to_string(),
        };

        assert_eq!(prompt.severity().exit_code(), 0);
        assert_eq!(io.severity().exit_code(), 2);
        assert_eq!(config.severity().exit_code(), 1);
        assert_eq!(catalog.severity().exit_code(), 3);
    }
}
