use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::warn;
use reqwest::Client;

use crate::client::history::{ChatMessage, HistoryStore, Role};
use crate::errors::SubmitError;
use crate::models::explain::{ExplainRequest, ExplainResponse};

pub const APOLOGY: &str = "Sorry, there was a problem communicating with the Durga.";

/// Sends explanation requests and keeps the persisted transcript. One
/// submission may be in flight at a time; the pending flag rejects overlap
/// since no request-id reconciliation exists.
pub struct Composer {
    http: Client,
    explain_url: String,
    store: HistoryStore,
    transcript: Mutex<Vec<ChatMessage>>,
    pending: AtomicBool,
}

impl Composer {
    pub fn new(server_url: impl Into<String>, store: HistoryStore) -> Self {
        let server_url = server_url.into();
        let transcript = store.load();
        Self {
            http: Client::new(),
            explain_url: format!("{}/api/explain-code", server_url.trim_end_matches('/')),
            store,
            transcript: Mutex::new(transcript),
            pending: AtomicBool::new(false),
        }
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().unwrap().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Submits one request and appends the user/AI pair to the transcript.
    /// Any transport or non-2xx failure substitutes the apology text, so
    /// the transcript grows by exactly two entries either way. Persistence
    /// failures are logged, never surfaced.
    pub async fn submit(&self, language: &str, input: &str) -> Result<String, SubmitError> {
        if self.pending.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::Pending);
        }

        let reply = match self.explain(language, input).await {
            Ok(explanation) => explanation,
            Err(err) => {
                warn!("explain request failed: {}", err);
                APOLOGY.to_string()
            }
        };

        {
            let mut transcript = self.transcript.lock().unwrap();
            transcript.push(ChatMessage {
                role: Role::User,
                text: input.to_string(),
            });
            transcript.push(ChatMessage {
                role: Role::Ai,
                text: reply.clone(),
            });
            if let Err(err) = self.store.save(&transcript) {
                warn!("failed to persist chat history: {}", err);
            }
        }

        self.pending.store(false, Ordering::SeqCst);
        Ok(reply)
    }

    async fn explain(&self, language: &str, input: &str) -> Result<String, reqwest::Error> {
        let request = ExplainRequest {
            language: language.to_string(),
            code: input.to_string(),
        };

        let response = self
            .http
            .post(&self.explain_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ExplainResponse = response.json().await?;
        Ok(body.explanation)
    }
}
