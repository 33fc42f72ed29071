//! Gemini `generateContent` client.
//!
//! Quests are requested with a JSON response schema; news is free text.
//! Every failure comes back as a [`ProviderError`] for the caller to absorb.

use std::time::Duration;

use indoc::formatdoc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::market::Company;
use crate::quest::{QuestDraft, MAX_GENERATED_REWARD, MIN_GENERATED_REWARD};

pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        Some(text)
    }
}

/// Structured quest as the model is asked to return it.
#[derive(Debug, Deserialize)]
struct QuestReply {
    text: String,
    reward: i64,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Fails on a blank key, an unparsable base URL, or if the HTTP client
    /// cannot be built.
    pub fn new(cfg: &ProviderConfig, api_key: String) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential);
        }
        let mut base = Url::parse(&cfg.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(&format!("v1beta/models/{}:generateContent", cfg.model))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask for one quest.
    pub async fn quest(&self) -> Result<QuestDraft, ProviderError> {
        let prompt = formatdoc! {"
            You are a quest generator for a fun, pixelated pomodoro productivity game.
            Generate a single, simple, actionable quest that a user can complete in the real world.
            The quest should be encouraging and related to productivity, learning, or well-being.
            Keep the quest text under 15 words."};
        let request = GenerateRequest {
            contents: vec![user_turn(prompt)],
            generation_config: GenerationConfig {
                temperature: 0.9,
                top_p: 1.0,
                top_k: 64,
                max_output_tokens: None,
                response_mime_type: Some("application/json"),
                response_schema: Some(json!({
                    "type": "OBJECT",
                    "properties": {
                        "text": {
                            "type": "STRING",
                            "description": "The description of the quest."
                        },
                        "reward": {
                            "type": "INTEGER",
                            "description": format!(
                                "The coin reward for completing the quest, between {MIN_GENERATED_REWARD} and {MAX_GENERATED_REWARD}."
                            )
                        }
                    },
                    "required": ["text", "reward"]
                })),
            },
        };
        let raw = self.generate(&request).await?;
        parse_quest(&raw)
    }

    /// Ask for a short news snippet about an investment in `company`.
    pub async fn news(&self, company: &Company) -> Result<String, ProviderError> {
        let prompt = formatdoc! {"
            You are a financial news reporter in a fun, pixelated productivity game.
            Write a short, exciting, and slightly quirky news snippet (under 30 words)
            about an investment in \"{name}\". Their business is: \"{description}\".",
            name = company.name,
            description = company.description,
        };
        let request = GenerateRequest {
            contents: vec![user_turn(prompt)],
            generation_config: GenerationConfig {
                temperature: 0.8,
                top_p: 1.0,
                top_k: 64,
                max_output_tokens: Some(60),
                response_mime_type: None,
                response_schema: None,
            },
        };
        let text = self.generate(&request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::Malformed("empty news text".into()));
        }
        Ok(text.to_string())
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("response body: {e}")))?;
        parsed
            .into_text()
            .ok_or_else(|| ProviderError::Malformed("no candidate text".into()))
    }
}

fn user_turn(text: String) -> RequestContent {
    RequestContent {
        parts: vec![RequestPart { text }],
    }
}

fn parse_quest(raw: &str) -> Result<QuestDraft, ProviderError> {
    let reply: QuestReply = serde_json::from_str(raw.trim())
        .map_err(|e| ProviderError::Malformed(format!("quest JSON: {e}")))?;
    let text = reply.text.trim();
    if text.is_empty() {
        return Err(ProviderError::Malformed("quest text is empty".into()));
    }
    let reward = u32::try_from(reply.reward)
        .ok()
        .filter(|r| (MIN_GENERATED_REWARD..=MAX_GENERATED_REWARD).contains(r))
        .ok_or_else(|| ProviderError::Malformed(format!("reward {} out of range", reply.reward)))?;
    Ok(QuestDraft {
        text: text.to_string(),
        reward,
    })
}
