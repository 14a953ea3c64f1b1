use crate::core::{Catalog, ChatModel, OtherService, Package, Storage, UnavailableService};
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockStorage {
    files: HashMap<String, Vec<u8>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.as_bytes().to_vec());
        self
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            AdvisorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }
}

/// Answers every question with the same text and remembers what it was asked.
#[derive(Clone, Default)]
pub struct FixedModel {
    answer: String,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FixedModel {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for FixedModel {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((system_prompt.to_string(), user_query.to_string()));
        }
        Ok(self.answer.clone())
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

/// Always fails as if the server were down.
#[derive(Clone, Default)]
pub struct FailingModel {
    attempts: Arc<AtomicUsize>,
}

impl FailingModel {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FailingModel {
    async fn complete(&self, _system_prompt: &str, _user_query: &str) -> Result<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AdvisorError::ModelResponse {
            message: "connection refused".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

pub fn package(name: &str, price: &str, kind: &str, features: &[&str]) -> Package {
    Package {
        name: name.to_string(),
        price: price.to_string(),
        r#type: kind.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        support: None,
        updates: None,
        note: None,
    }
}

pub fn sample_catalog() -> Catalog {
    let mut business = package(
        "Business",
        "$1,299",
        "Dynamic Website",
        &["15 pages", "Blog", "SEO setup", "Contact form", "Analytics"],
    );
    business.support = Some("Priority email".to_string());
    business.updates = Some("Monthly".to_string());
    business.note = Some("Most popular".to_string());

    Catalog {
        packages: vec![
            package("Starter", "$499", "Static Website", &["5 pages", "contact form"]),
            business,
            package(
                "E-Commerce",
                "$2,499",
                "Online Store",
                &["Product catalog", "Payment gateway", "Inventory management", "Shopping cart"],
            ),
        ],
        other_services: vec![OtherService {
            service: "Logo Design".to_string(),
            description: "Custom brand logo".to_string(),
            features: vec!["3 concepts".to_string(), "2 revisions".to_string()],
            notes: Some("Delivered in 5 working days".to_string()),
        }],
        unavailable_services: vec![UnavailableService {
            service: "Mobile Apps".to_string(),
            description: "We only build websites".to_string(),
        }],
    }
}
