use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, AiResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequestDto<'a> {
    contents: Vec<ContentDto<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfigDto<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentDto<'a> {
    parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
struct PartDto<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigDto<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
struct CandidatePartDto {
    text: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для `generateContent` endpoint.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
        )
    }

    /// Отправляет prompt и возвращает текст первого кандидата.
    pub(crate) async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        response_mime_type: Option<&str>,
    ) -> AiResult<String> {
        let payload = GenerateContentRequestDto {
            contents: vec![ContentDto {
                parts: vec![PartDto { text: prompt }],
            }],
            generation_config: response_mime_type
                .map(|mime| GenerationConfigDto {
                    response_mime_type: mime,
                }),
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                message: truncate_body(body),
            });
        }

        let dto = response.json::<GenerateContentResponseDto>().await?;
        first_text(dto).ok_or(AiError::EmptyResponse)
    }
}

fn first_text(dto: GenerateContentResponseDto) -> Option<String> {
    let text = dto
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|part| part.text)?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn truncate_body(body: String) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() <= MAX_CHARS {
        body
    } else {
        body.chars().take(MAX_CHARS).collect()
    }
}
