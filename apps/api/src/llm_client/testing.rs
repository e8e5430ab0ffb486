//! Test double for `ChatModel`.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatModel, LlmError};

/// Replays a canned reply (or failure) and records every prompt it receives.
pub struct ScriptedModel {
    reply: Result<String, fn() -> LlmError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make: fn() -> LlmError) -> Self {
        Self {
            reply: Err(make),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}
