pub mod advisor;
pub mod catalog;
pub mod matcher;
pub mod prompt;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    Advice, Catalog, KeywordMatch, OtherService, Package, Query, Recommendation,
    UnavailableService,
};
pub use crate::domain::ports::{ChatModel, ConfigProvider, Storage};
pub use crate::utils::error::Result;
