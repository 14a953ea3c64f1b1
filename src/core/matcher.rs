use crate::core::{KeywordMatch, Package, Query};

/// Tokens shorter than this are treated as noise ("a", "to", "is").
pub const MIN_TOKEN_LEN: usize = 3;

/// Upper bound on features reported per matched package.
pub const MAX_MATCHED_FEATURES: usize = 3;

impl Query {
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for word in raw.split_whitespace() {
            let token = word
                .trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase();
            if token.chars().count() >= MIN_TOKEN_LEN && !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        Self {
            raw: raw.to_string(),
            tokens,
        }
    }

    fn hits(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.tokens.iter().any(|token| text.contains(token.as_str()))
    }
}

/// Substring filter over the packages, in catalog order. A package matches when a
/// token appears in one of its features or in its name and type.
pub fn search<'a>(packages: &'a [Package], query: &Query) -> Vec<KeywordMatch<'a>> {
    if query.tokens.is_empty() {
        return Vec::new();
    }

    packages
        .iter()
        .filter_map(|package| {
            let matched_features: Vec<&str> = package
                .features
                .iter()
                .filter(|feature| query.hits(feature))
                .map(String::as_str)
                .take(MAX_MATCHED_FEATURES)
                .collect();

            let header = format!("{} {}", package.name, package.r#type);
            if matched_features.is_empty() && !query.hits(&header) {
                return None;
            }

            Some(KeywordMatch {
                package,
                matched_features,
            })
        })
        .collect()
}
