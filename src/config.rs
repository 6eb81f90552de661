use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub index: IndexConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub bots: BotsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    /// Path to the ticket export JSON.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// Path of the persisted index artifact.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_string(),
            model: None,
            dims: None,
            batch_size: 64,
            max_retries: 5,
            timeout_secs: 30,
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}
fn default_batch_size() -> usize {
    64
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    30
}

/// Automated-system author names whose comments are excluded from the index.
///
/// Matching is exact string equality by default. The ticketing system's
/// auto-replies are posted under fixed external-user names, so exactness is
/// usually what you want; set `normalize = true` to trim surrounding
/// whitespace before comparison.
#[derive(Debug, Deserialize, Clone)]
pub struct BotsConfig {
    #[serde(default = "default_bot_names")]
    pub names: Vec<String>,
    #[serde(default)]
    pub normalize: bool,
}

impl Default for BotsConfig {
    fn default() -> Self {
        Self {
            names: default_bot_names(),
            normalize: false,
        }
    }
}

fn default_bot_names() -> Vec<String> {
    vec![
        "Problème résolu".to_string(),
        "Limitation technique".to_string(),
    ]
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    match config.embedding.provider.as_str() {
        "disabled" | "openai" | "local" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be disabled, openai, or local.",
            other
        ),
    }

    if config.embedding.provider == "openai" {
        if config.embedding.model.is_none() {
            anyhow::bail!("embedding.model must be specified when provider is 'openai'");
        }
        if config.embedding.dims.is_none() || config.embedding.dims == Some(0) {
            anyhow::bail!("embedding.dims must be > 0 when provider is 'openai'");
        }
    }

    if config.embedding.batch_size == 0 {
        anyhow::bail!("embedding.batch_size must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let f = write_config(
            r#"
[corpus]
path = "tickets.json"

[index]
path = "tickets.index"
"#,
        );
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.embedding.provider, "local");
        assert_eq!(cfg.bots.names.len(), 2);
        assert!(!cfg.bots.normalize);
    }

    #[test]
    fn unknown_provider_rejected() {
        let f = write_config(
            r#"
[corpus]
path = "tickets.json"

[index]
path = "tickets.index"

[embedding]
provider = "cohere"
"#,
        );
        let err = load_config(f.path()).unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[test]
    fn openai_requires_model_and_dims() {
        let f = write_config(
            r#"
[corpus]
path = "tickets.json"

[index]
path = "tickets.index"

[embedding]
provider = "openai"
"#,
        );
        assert!(load_config(f.path()).is_err());
    }
}
