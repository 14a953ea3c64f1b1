use serde::{Deserialize, Serialize};

/// A website package from the primary catalog. Field order is the order used
/// when the package block is rendered into the system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub price: String,
    pub r#type: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Package {
    /// Features that describe page counts or page types.
    pub fn page_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|f| f.to_lowercase().contains("page"))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherService {
    pub service: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableService {
    pub service: String,
    pub description: String,
}

/// Everything the advisor knows about. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub packages: Vec<Package>,
    pub other_services: Vec<OtherService>,
    pub unavailable_services: Vec<UnavailableService>,
}

impl Catalog {
    pub fn summary_line(&self) -> String {
        format!(
            "Loaded {} packages, {} other services, {} unavailable services",
            self.packages.len(),
            self.other_services.len(),
            self.unavailable_services.len()
        )
    }
}

/// One turn's free-text input and the tokens derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub raw: String,
    pub tokens: Vec<String>,
}

/// A package picked by the keyword matcher. Borrows from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch<'a> {
    pub package: &'a Package,
    pub matched_features: Vec<&'a str>,
}

/// What happened to the model side of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    /// The model's answer, verbatim.
    Answer(String),
    /// Keyword-only mode; the model was never asked.
    Disabled,
    PromptUnavailable { reason: String },
    ModelUnavailable { reason: String },
}

impl Advice {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Advice::Answer(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Advice::PromptUnavailable { .. } | Advice::ModelUnavailable { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    pub query: Query,
    pub matches: Vec<KeywordMatch<'a>>,
    pub advice: Advice,
}
