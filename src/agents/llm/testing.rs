//! Scripted provider for unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider};
use crate::agents::domain::Message;
use crate::agents::error::{LlmError, LlmResult};

enum Script {
    Reply(String),
    Fail,
    Hang,
}

pub(crate) struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn reply(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self::new(Script::Fail)
    }

    pub(crate) fn hanging() -> Self {
        Self::new(Script::Hang)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> LlmResult<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                finish_reason: FinishReason::Stop,
                usage: None,
            }),
            Script::Fail => Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            Script::Hang => {
                std::future::pending::<()>().await;
                Err(LlmError::Timeout)
            }
        }
    }
}
