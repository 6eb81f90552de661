//! Embedding Engine: provider abstraction and asymmetric query/document
//! encoding.
//!
//! Concrete providers:
//! - **[`DisabledProvider`]** — returns errors; used when embeddings are not configured.
//! - **[`OpenAIProvider`]** — calls the OpenAI embeddings API with batching, retry, and backoff.
//! - **`LocalProvider`** — runs models locally via fastembed; no network calls after model download.
//!
//! # Asymmetric encoding
//!
//! Retrieval quality depends on encoding queries and corpus documents with
//! the matching mode of the same model, so the public surface is two
//! distinct operations — [`encode_documents`] and [`encode_query`] — rather
//! than one polymorphic entry point. Mode selection maps to the per-model
//! input framing (E5's `query:`/`passage:` prefixes, Nomic's
//! `search_query:`/`search_document:`, BGE's query instruction); symmetric
//! models like MiniLM and the OpenAI models take no prefix.
//!
//! # Retry Strategy
//!
//! The OpenAI provider uses exponential backoff for transient errors:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::Error;

/// Which side of the retrieval pair a text belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmbedMode {
    /// Corpus-side encoding, used only during index build.
    Document,
    /// Query-side encoding, used only at search time.
    Query,
}

/// Trait for embedding providers.
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"all-minilm-l6-v2"`).
    fn model_name(&self) -> &str;
    /// Returns the embedding vector dimensionality (e.g. `384`).
    fn dims(&self) -> usize;
}

/// Encode a batch of corpus documents.
///
/// Returns one vector per input text, in input order.
pub async fn encode_documents(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    embed_texts(provider, config, texts, EmbedMode::Document).await
}

/// Encode a single search query.
pub async fn encode_query(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    text: &str,
) -> Result<Vec<f32>> {
    let results = embed_texts(provider, config, &[text.to_string()], EmbedMode::Query).await?;
    results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Empty embedding response"))
}

/// Embed a batch of texts with the given mode, dispatching on the
/// configured backend.
async fn embed_texts(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    texts: &[String],
    mode: EmbedMode,
) -> Result<Vec<Vec<f32>>> {
    let framed = frame_texts(provider.model_name(), texts, mode);

    match config.provider.as_str() {
        "openai" => embed_openai(config, &framed).await,
        #[cfg(feature = "local-embeddings-fastembed")]
        "local" => embed_local_fastembed(config, framed).await,
        #[cfg(not(feature = "local-embeddings-fastembed"))]
        "local" => bail!(
            "Local embedding provider requires --features local-embeddings-fastembed"
        ),
        "disabled" => bail!("Embedding provider is disabled"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// Apply the model family's mode prefix to each text.
///
/// Symmetric models return the inputs unchanged.
fn frame_texts(model_name: &str, texts: &[String], mode: EmbedMode) -> Vec<String> {
    let prefix = mode_prefix(model_name, mode);
    if prefix.is_empty() {
        return texts.to_vec();
    }
    texts.iter().map(|t| format!("{}{}", prefix, t)).collect()
}

fn mode_prefix(model_name: &str, mode: EmbedMode) -> &'static str {
    if model_name.starts_with("multilingual-e5") {
        return match mode {
            EmbedMode::Query => "query: ",
            EmbedMode::Document => "passage: ",
        };
    }
    if model_name.starts_with("nomic-embed-text") {
        return match mode {
            EmbedMode::Query => "search_query: ",
            EmbedMode::Document => "search_document: ",
        };
    }
    if model_name.starts_with("bge-") {
        // BGE frames queries with an instruction; passages are raw.
        return match mode {
            EmbedMode::Query => "Represent this sentence for searching relevant passages: ",
            EmbedMode::Document => "",
        };
    }
    ""
}

// ============ Disabled Provider ============

/// A no-op embedding provider that always returns errors.
pub struct DisabledProvider;

impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }
    fn dims(&self) -> usize {
        0
    }
}

// ============ OpenAI Provider ============

/// Embedding provider using the OpenAI API.
///
/// Calls the `POST /v1/embeddings` endpoint with the configured model.
/// Requires the `OPENAI_API_KEY` environment variable to be set.
pub struct OpenAIProvider {
    model: String,
    dims: usize,
}

impl OpenAIProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for OpenAI provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for OpenAI provider"))?;

        if std::env::var("OPENAI_API_KEY").is_err() {
            return Err(Error::ModelUnavailable {
                model,
                reason: "OPENAI_API_KEY environment variable not set".to_string(),
            }
            .into());
        }

        Ok(Self { model, dims })
    }
}

impl EmbeddingProvider for OpenAIProvider {
    fn model_name(&self) -> &str {
        &self.model
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

/// Call the OpenAI embeddings API with retry/backoff.
async fn embed_openai(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let api_key =
        std::env::var("OPENAI_API_KEY").map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("embedding.model required"))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = serde_json::json!({
        "model": model,
        "input": texts,
    });

    let mut last_err = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        let resp = client
            .post("https://api.openai.com/v1/embeddings")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await;

        match resp {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    let json: serde_json::Value = response.json().await?;
                    return parse_openai_response(&json);
                }

                // Rate limited or server error — retry
                if status.as_u16() == 429 || status.is_server_error() {
                    let body_text = response.text().await.unwrap_or_default();
                    last_err = Some(anyhow::anyhow!(
                        "OpenAI API error {}: {}",
                        status,
                        body_text
                    ));
                    continue;
                }

                // Client error (not 429) — don't retry
                let body_text = response.text().await.unwrap_or_default();
                bail!("OpenAI API error {}: {}", status, body_text);
            }
            Err(e) => {
                last_err = Some(e.into());
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Embedding failed after retries")))
}

fn parse_openai_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing data array"))?;

    let mut embeddings = Vec::with_capacity(data.len());

    for item in data {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing embedding"))?;

        let vec: Vec<f32> = embedding
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        embeddings.push(vec);
    }

    Ok(embeddings)
}

// ============ Local Provider (fastembed) ============

/// Embedding provider for local inference via fastembed.
///
/// Models are downloaded on first use from Hugging Face and cached; after
/// that, embedding runs entirely offline.
#[cfg(feature = "local-embeddings-fastembed")]
pub struct LocalProvider {
    model_name: String,
    dims: usize,
}

#[cfg(feature = "local-embeddings-fastembed")]
impl LocalProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let (model_name, dims) = resolve_local_model(config)?;
        Ok(Self { model_name, dims })
    }
}

#[cfg(feature = "local-embeddings-fastembed")]
impl EmbeddingProvider for LocalProvider {
    fn model_name(&self) -> &str {
        &self.model_name
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

#[cfg(feature = "local-embeddings-fastembed")]
fn resolve_local_model(config: &EmbeddingConfig) -> Result<(String, usize)> {
    let model_name = config
        .model
        .clone()
        .unwrap_or_else(|| "all-minilm-l6-v2".to_string());

    // Validates the name up front so a bad config fails before any encode.
    config_to_fastembed_model(&model_name)?;

    let dims = config.dims.unwrap_or(match model_name.as_str() {
        "all-minilm-l6-v2" => 384,
        "bge-small-en-v1.5" => 384,
        "bge-base-en-v1.5" => 768,
        "nomic-embed-text-v1.5" => 768,
        "multilingual-e5-small" => 384,
        "multilingual-e5-base" => 768,
        _ => 384,
    });

    Ok((model_name, dims))
}

#[cfg(feature = "local-embeddings-fastembed")]
fn config_to_fastembed_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name {
        "all-minilm-l6-v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "bge-small-en-v1.5" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        "nomic-embed-text-v1.5" => Ok(fastembed::EmbeddingModel::NomicEmbedTextV15),
        "multilingual-e5-small" => Ok(fastembed::EmbeddingModel::MultilingualE5Small),
        "multilingual-e5-base" => Ok(fastembed::EmbeddingModel::MultilingualE5Base),
        other => Err(Error::ModelUnavailable {
            model: other.to_string(),
            reason: "unknown local model; supported: all-minilm-l6-v2, bge-small-en-v1.5, \
                     bge-base-en-v1.5, nomic-embed-text-v1.5, multilingual-e5-small, \
                     multilingual-e5-base"
                .to_string(),
        }
        .into()),
    }
}

#[cfg(feature = "local-embeddings-fastembed")]
async fn embed_local_fastembed(
    config: &EmbeddingConfig,
    texts: Vec<String>,
) -> Result<Vec<Vec<f32>>> {
    let model_name = config
        .model
        .clone()
        .unwrap_or_else(|| "all-minilm-l6-v2".to_string());

    let fastembed_model = config_to_fastembed_model(&model_name)?;
    let batch_size = config.batch_size;

    tokio::task::spawn_blocking(move || {
        let mut model = fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(fastembed_model).with_show_download_progress(true),
        )
        .map_err(|e| {
            anyhow::Error::from(Error::ModelUnavailable {
                model: model_name.clone(),
                reason: e.to_string(),
            })
        })?;

        let embeddings = model
            .embed(texts, Some(batch_size))
            .map_err(|e| anyhow::anyhow!("Local embedding failed: {}", e))?;

        Ok(embeddings)
    })
    .await?
}

/// Create the appropriate [`EmbeddingProvider`] based on configuration.
///
/// # Errors
///
/// Returns an error for unknown provider names or if the provider cannot
/// be initialized (missing config, API key, or feature flag).
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledProvider)),
        "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
        #[cfg(feature = "local-embeddings-fastembed")]
        "local" => Ok(Box::new(LocalProvider::new(config)?)),
        #[cfg(not(feature = "local-embeddings-fastembed"))]
        "local" => bail!(
            "Local embedding provider requires --features local-embeddings-fastembed"
        ),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors of
/// different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_empty_or_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn e5_models_get_mode_prefixes() {
        let texts = vec!["device offline".to_string()];
        let docs = frame_texts("multilingual-e5-small", &texts, EmbedMode::Document);
        let queries = frame_texts("multilingual-e5-small", &texts, EmbedMode::Query);
        assert_eq!(docs[0], "passage: device offline");
        assert_eq!(queries[0], "query: device offline");
    }

    #[test]
    fn nomic_models_get_search_prefixes() {
        assert_eq!(
            mode_prefix("nomic-embed-text-v1.5", EmbedMode::Query),
            "search_query: "
        );
        assert_eq!(
            mode_prefix("nomic-embed-text-v1.5", EmbedMode::Document),
            "search_document: "
        );
    }

    #[test]
    fn bge_frames_queries_only() {
        assert!(mode_prefix("bge-small-en-v1.5", EmbedMode::Query).starts_with("Represent"));
        assert_eq!(mode_prefix("bge-small-en-v1.5", EmbedMode::Document), "");
    }

    #[test]
    fn symmetric_models_are_unframed() {
        let texts = vec!["device offline".to_string()];
        let framed = frame_texts("all-minilm-l6-v2", &texts, EmbedMode::Query);
        assert_eq!(framed, texts);
        assert_eq!(mode_prefix("text-embedding-3-small", EmbedMode::Document), "");
    }
}
