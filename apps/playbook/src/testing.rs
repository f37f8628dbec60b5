//! Test doubles for the completion and speech seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{CompletionBackend, LlmError};
use crate::speech::{SpeechEngine, SpeechError};

pub enum StubReply {
    Text(String),
    /// Answers every call with the prompt it received.
    EchoPrompt,
    ApiError { status: u16, message: String },
    Unauthorized,
}

pub struct StubCompletion {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubCompletion {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::EchoPrompt => Ok(prompt.to_string()),
            StubReply::ApiError { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            StubReply::Unauthorized => Err(LlmError::Unauthorized {
                status: 401,
                message: "Invalid API Key".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingSpeech {
    pub fail: bool,
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for RecordingSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::EngineFailed {
                program: "stub".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
