use reqwest::{header, Client};
use serde::Deserialize;

use crate::errors::CompletionError;
use crate::models::prompt::Message;

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 800;

pub struct CompletionService {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl CompletionService {
    pub fn new(url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key,
            model,
        }
    }

    /// Sends one chat-completion request and returns the first candidate's
    /// text. A response with no extractable text maps to
    /// `CompletionError::Empty`; a non-2xx status carries the response body
    /// in the error.
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String, CompletionError> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|candidate| candidate.message)
            .and_then(|message| message.content)
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::Empty)
    }
}

// Lenient on purpose: a response missing choices, message, or content is an
// empty completion, not a parse failure.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    message: Option<CandidateMessage>,
}

#[derive(Debug, Deserialize)]
struct CandidateMessage {
    content: Option<String>,
}
