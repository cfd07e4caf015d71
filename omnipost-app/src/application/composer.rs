use omnipost_ai::GeminiClient;

/// Result of the best-effort AI pass over a draft: rewritten text plus
/// suggested hashtags. Either part degrades independently — the text falls
/// back to the input, the tags to empty — so composing stays usable with no
/// key and no network.
#[derive(Debug, Clone)]
pub struct Polished {
    pub text: String,
    pub tags: Vec<String>,
}

impl Polished {
    /// Submission shape: text, blank line, tags joined by spaces.
    pub fn into_content(self) -> String {
        if self.tags.is_empty() {
            self.text
        } else {
            format!("{}\n\n{}", self.text, self.tags.join(" "))
        }
    }
}

/// Compose-side glue between the draft form and the enhancement client.
pub struct Composer {
    ai: GeminiClient,
}

impl Composer {
    pub fn new(ai: GeminiClient) -> Self {
        Self { ai }
    }

    pub async fn polish(&self, text: &str) -> Polished {
        Polished {
            text: self.ai.enhance(text).await,
            tags: self.ai.suggest_tags(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use omnipost_ai::GeminiClient;

    use super::{Composer, Polished};

    #[tokio::test]
    async fn polish_without_key_keeps_text_and_yields_no_tags() {
        let composer = Composer::new(GeminiClient::new(None, "gemini-2.5-flash"));

        let polished = composer.polish("my plain post").await;
        assert_eq!(polished.text, "my plain post");
        assert!(polished.tags.is_empty());
        assert_eq!(polished.into_content(), "my plain post");
    }

    #[test]
    fn content_appends_tags_after_blank_line() {
        let polished = Polished {
            text: "fresh take".to_string(),
            tags: vec!["#fun".to_string(), "#life".to_string()],
        };

        assert_eq!(polished.into_content(), "fresh take\n\n#fun #life");
    }
}
