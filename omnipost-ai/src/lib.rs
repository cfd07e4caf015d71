//! Клиентская библиотека для Gemini `generateContent` API.
//!
//! Используется формой создания поста: переписывает текст («AI Polish») и
//! подбирает хэштеги. Обе публичные операции best-effort: любая ошибка —
//! отсутствие ключа, сеть, не-2xx статус, некорректный ответ — гасится, и
//! вызывающий получает исходный текст либо пустой список тегов. Fallible
//! `try_*`-варианты доступны, если причина сбоя важна.
#![warn(missing_docs)]

mod error;
mod http_client;

pub use error::{AiError, AiResult};

use http_client::HttpClient;
use tracing::warn;

/// Модель по умолчанию.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
/// Клиент Gemini для улучшения текста поста и подбора хэштегов.
///
/// Без API-ключа клиент остаётся полностью рабочим: [`enhance`] возвращает
/// вход без изменений, [`suggest_tags`] — пустой список.
///
/// [`enhance`]: GeminiClient::enhance
/// [`suggest_tags`]: GeminiClient::suggest_tags
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    http: HttpClient,
}

impl GeminiClient {
    /// Создаёт клиент с явным ключом (или без него) и моделью.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            http: HttpClient::new(API_BASE),
        }
    }

    /// Создаёт клиент из окружения: `GEMINI_API_KEY`, `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").ok();
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Переопределяет базовый URL API (тесты, нестандартные развёртывания).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http = HttpClient::new(base_url);
        self
    }

    /// Настроен ли API-ключ.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Переписывает текст поста более живым и лаконичным.
    ///
    /// Любой сбой гасится: возвращается исходный текст.
    pub async fn enhance(&self, text: &str) -> String {
        match self.try_enhance(text).await {
            Ok(enhanced) => enhanced,
            Err(AiError::MissingApiKey) => text.to_string(),
            Err(err) => {
                warn!(error = %err, "enhancement failed, keeping original text");
                text.to_string()
            }
        }
    }

    /// Подбирает 3-5 хэштегов для текста поста.
    ///
    /// Любой сбой или непарсящийся ответ гасится: возвращается пустой список.
    pub async fn suggest_tags(&self, text: &str) -> Vec<String> {
        match self.try_suggest_tags(text).await {
            Ok(tags) => tags,
            Err(AiError::MissingApiKey) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "hashtag suggestion failed");
                Vec::new()
            }
        }
    }

    /// Fallible-вариант [`enhance`](GeminiClient::enhance).
    pub async fn try_enhance(&self, text: &str) -> AiResult<String> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        self.http
            .generate(api_key, &self.model, &enhance_prompt(text), None)
            .await
    }

    /// Fallible-вариант [`suggest_tags`](GeminiClient::suggest_tags).
    pub async fn try_suggest_tags(&self, text: &str) -> AiResult<Vec<String>> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let raw = self
            .http
            .generate(
                api_key,
                &self.model,
                &tags_prompt(text),
                Some("application/json"),
            )
            .await?;
        Ok(parse_tags(&raw))
    }
}

fn enhance_prompt(text: &str) -> String {
    format!(
        "Rewrite the following social media post to be more engaging, witty, and concise. \
         Only return the rewritten text, no explanations. Text: \"{text}\""
    )
}

fn tags_prompt(text: &str) -> String {
    format!(
        "Generate 3-5 relevant, trending hashtags for this post content. Return them as a \
         JSON array of strings (e.g. [\"#fun\", \"#life\"]). Content: \"{text}\""
    )
}

fn parse_tags(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw.trim()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{AiError, DEFAULT_MODEL, GeminiClient, parse_tags};

    #[test]
    fn blank_api_key_counts_as_disabled() {
        assert!(!GeminiClient::new(None, DEFAULT_MODEL).is_enabled());
        assert!(!GeminiClient::new(Some("   ".to_string()), DEFAULT_MODEL).is_enabled());
        assert!(GeminiClient::new(Some("key".to_string()), DEFAULT_MODEL).is_enabled());
    }

    #[tokio::test]
    async fn enhance_without_key_returns_input_unchanged() {
        let client = GeminiClient::new(None, DEFAULT_MODEL);
        assert_eq!(client.enhance("just my post").await, "just my post");
    }

    #[tokio::test]
    async fn suggest_tags_without_key_returns_empty() {
        let client = GeminiClient::new(None, DEFAULT_MODEL);
        assert!(client.suggest_tags("just my post").await.is_empty());
    }

    #[tokio::test]
    async fn try_variants_surface_the_missing_key() {
        let client = GeminiClient::new(None, DEFAULT_MODEL);
        assert!(matches!(
            client.try_enhance("text").await,
            Err(AiError::MissingApiKey)
        ));
        assert!(matches!(
            client.try_suggest_tags("text").await,
            Err(AiError::MissingApiKey)
        ));
    }

    #[test]
    fn parse_tags_accepts_json_array_and_absorbs_garbage() {
        assert_eq!(
            parse_tags(r##" ["#fun", "#life"] "##),
            vec!["#fun".to_string(), "#life".to_string()]
        );
        assert!(parse_tags("not json").is_empty());
        assert!(parse_tags(r##"{"tags": ["#fun"]}"##).is_empty());
    }
}
