use crate::core::matcher;
use crate::core::prompt::PromptBuilder;
use crate::core::{Advice, Catalog, ChatModel, Query, Recommendation, Storage};

/// Combines keyword matches with a single model call per turn.
pub struct Advisor<S: Storage, M: ChatModel> {
    prompt: PromptBuilder<S>,
    model: Option<M>,
}

impl<S: Storage, M: ChatModel> Advisor<S, M> {
    pub fn new(prompt: PromptBuilder<S>, model: M) -> Self {
        Self {
            prompt,
            model: Some(model),
        }
    }

    /// Keyword matches only; the model is never contacted.
    pub fn offline(prompt: PromptBuilder<S>) -> Self {
        Self {
            prompt,
            model: None,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.model.is_none()
    }

    pub async fn recommend<'a>(&self, catalog: &'a Catalog, input: &str) -> Recommendation<'a> {
        let query = Query::parse(input);
        let matches = matcher::search(&catalog.packages, &query);
        tracing::debug!(
            tokens = ?query.tokens,
            matched = matches.len(),
            "Keyword pass finished"
        );

        let advice = match &self.model {
            None => Advice::Disabled,
            Some(model) => self.ask_model(model, catalog, &query).await,
        };

        Recommendation {
            query,
            matches,
            advice,
        }
    }

    async fn ask_model(&self, model: &M, catalog: &Catalog, query: &Query) -> Advice {
        let system_prompt = match self.prompt.build(&catalog.packages).await {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Skipping model call: {}", e);
                return Advice::PromptUnavailable {
                    reason: e.to_string(),
                };
            }
        };

        tracing::debug!("Asking model {}", model.model_name());
        match model.complete(system_prompt.as_str(), &query.raw).await {
            Ok(answer) => Advice::Answer(answer),
            Err(e) => {
                tracing::warn!(
                    category = ?e.category(),
                    "Model call failed: {}",
                    e
                );
                Advice::ModelUnavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
