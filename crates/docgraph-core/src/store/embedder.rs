//! Embedding generation for record content.

use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::error::StoreError;

/// Trait for embedding generation.
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of text.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// FastEmbed-based embedder, BGE-Small by default.
pub struct FastEmbedder {
    model: TextEmbedding,
    dimension: usize,
    model_name: String,
}

impl FastEmbedder {
    /// Create a new FastEmbed embedder with the default model.
    /// Uses `~/.docgraph/cache/` as the model cache directory.
    pub fn new() -> Result<Self, StoreError> {
        let cache_dir = Self::default_cache_dir();
        Self::with_model_and_cache(EmbeddingModel::BGESmallENV15, cache_dir)
    }

    /// Create an embedder from a configured model name.
    ///
    /// Accepted names: `bge-small-en-v1.5`, `bge-base-en-v1.5`,
    /// `all-minilm-l6-v2`, `nomic-embed-text-v1.5`.
    pub fn from_name(name: &str, cache_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let model = Self::parse_model(name)?;
        Self::with_model_and_cache(model, cache_dir.unwrap_or_else(Self::default_cache_dir))
    }

    /// Create a new FastEmbed embedder with a specific model and cache directory.
    pub fn with_model_and_cache(
        model: EmbeddingModel,
        cache_dir: PathBuf,
    ) -> Result<Self, StoreError> {
        let model_name = format!("{:?}", model);

        std::fs::create_dir_all(&cache_dir).map_err(|e| StoreError::Io {
            path: cache_dir.clone(),
            source: e,
        })?;

        let text_embedding = TextEmbedding::try_new(
            InitOptions::new(model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| StoreError::Embedding(e.to_string()))?;

        // Probe the dimension with a single embedding
        let probe = text_embedding
            .embed(vec!["probe"], None)
            .map_err(|e| StoreError::Embedding(e.to_string()))?;

        let dimension = probe.first().map(|v| v.len()).unwrap_or(384);

        Ok(Self {
            model: text_embedding,
            dimension,
            model_name,
        })
    }

    fn parse_model(name: &str) -> Result<EmbeddingModel, StoreError> {
        match name.to_lowercase().as_str() {
            "bge-small-en-v1.5" | "bge-small" => Ok(EmbeddingModel::BGESmallENV15),
            "bge-base-en-v1.5" | "bge-base" => Ok(EmbeddingModel::BGEBaseENV15),
            "all-minilm-l6-v2" | "minilm" => Ok(EmbeddingModel::AllMiniLML6V2),
            "nomic-embed-text-v1.5" | "nomic" => Ok(EmbeddingModel::NomicEmbedTextV15),
            other => Err(StoreError::Config(format!(
                "Unsupported embedding model: {}",
                other
            ))),
        }
    }

    /// Get the default cache directory: `~/.docgraph/cache/`
    fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".docgraph")
            .join("cache")
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let texts_vec: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();

        self.model
            .embed(texts_vec, None)
            .map_err(|e| StoreError::Embedding(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
