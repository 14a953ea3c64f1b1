use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// The remote recommendation service: one system text, one user text, one answer.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn packages_file(&self) -> &str;
    fn services_file(&self) -> &str;
    fn unavailable_file(&self) -> &str;
    fn prompt_template(&self) -> Option<&str>;
    fn model_host(&self) -> &str;
    fn model_name(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn model_enabled(&self) -> bool;
}
