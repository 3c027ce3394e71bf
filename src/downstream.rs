// Capability interfaces for the stage that consumes the sentence file.
// The reflow pipeline never calls these; they fix the contract its output has to satisfy.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

/// Batch ceiling used when a service does not declare its own
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 100;

pub type Embedding = Vec<f32>;

/// Text embedding service
pub trait Embedder {
    /// Embed one batch; must return one vector per input, in order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Largest batch the service accepts
    fn max_batch_size(&self) -> usize {
        DEFAULT_EMBED_BATCH_SIZE
    }

    /// Embed a single text; empty text yields an empty vector without a service call
    fn embed_one(&self, text: &str) -> Result<Embedding> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow!("Embedding service returned no vector"))
    }

    /// Embed many texts in batches no larger than [`Embedder::max_batch_size`], preserving order
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let batch_size = self.max_batch_size().max(1);
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(batch_size) {
            let vectors = self.embed_batch(batch)?;
            if vectors.len() != batch.len() {
                bail!(
                    "Embedding service returned {} vectors for a batch of {}",
                    vectors.len(),
                    batch.len()
                );
            }
            embeddings.extend(vectors);
        }

        Ok(embeddings)
    }
}

/// One turn of a chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Text generation service
pub trait Generator {
    fn generate(&self, system_prompt: Option<&str>, history: &[ChatMessage]) -> Result<String>;
}

/// Flatten a system prompt and chat history into a single completion prompt
pub fn render_chat_prompt(system_prompt: Option<&str>, history: &[ChatMessage]) -> String {
    let mut prompt = String::new();

    if let Some(system_prompt) = system_prompt.filter(|s| !s.is_empty()) {
        prompt.push_str("System Instructions: ");
        prompt.push_str(system_prompt);
        prompt.push_str("\n\n");
    }

    for message in history {
        prompt.push_str(&message.role.to_uppercase());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }

    prompt.push_str("ASSISTANT:");
    prompt
}
