//! Outfit vocabularies and pre-computed label embeddings.
//!
//! Classification runs against two small closed vocabularies. Each gets a
//! label bank: a flat N×512 matrix of text embeddings (one row per label)
//! that is dot-producted against image embeddings for instant scoring.

use crate::error::AnalysisError;

use super::text::ClipTextEncoder;

/// Garment vocabulary scored by the clothing pass.
pub const CLOTHING_ITEMS: &[&str] = &[
    "suit", "t-shirt", "jeans", "dress", "jacket", "shorts", "skirt", "hoodie", "shirt", "sweater",
];

/// Style vocabulary scored by the style pass.
pub const STYLES: &[&str] = &[
    "casual",
    "formal",
    "sporty",
    "elegant",
    "bohemian",
    "streetwear",
];

/// Pre-computed label embeddings for one vocabulary.
///
/// Stores a single flat matrix (N × 512, row-major) for efficient dot
/// product. Labels are encoded bare, without a prompt template, so the
/// scores match what the closed vocabulary was tuned against.
#[derive(Clone)]
pub struct LabelBank {
    labels: Vec<String>,
    /// Flat matrix: N × 512 stored row-major.
    matrix: Vec<f32>,
    embedding_dim: usize,
}

impl LabelBank {
    /// Encode a vocabulary and build its label bank.
    ///
    /// The vocabularies here are small enough to encode in a single ONNX
    /// call at startup.
    pub fn encode(text_encoder: &ClipTextEncoder, labels: &[&str]) -> Result<Self, AnalysisError> {
        let texts: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let embeddings = text_encoder.encode_batch(&texts)?;

        if embeddings.len() != labels.len() {
            return Err(AnalysisError::Inference {
                stage: "text".to_string(),
                message: format!(
                    "Encoded {} embeddings for {} labels",
                    embeddings.len(),
                    labels.len()
                ),
            });
        }

        let embedding_dim = embeddings.first().map_or(512, |e| e.len());
        let mut matrix: Vec<f32> = Vec::with_capacity(labels.len() * embedding_dim);
        for emb in &embeddings {
            matrix.extend_from_slice(emb);
        }

        tracing::debug!(
            "Label bank ready: {} labels x {} dims",
            labels.len(),
            embedding_dim
        );

        Ok(Self {
            labels: texts,
            matrix,
            embedding_dim,
        })
    }

    /// Create a label bank from a pre-computed matrix (for tests and benches).
    pub fn from_raw(labels: Vec<String>, matrix: Vec<f32>, embedding_dim: usize) -> Self {
        assert_eq!(
            matrix.len(),
            embedding_dim * labels.len(),
            "Matrix size ({}) does not match {} labels x {} dim",
            matrix.len(),
            labels.len(),
            embedding_dim,
        );
        Self {
            labels,
            matrix,
            embedding_dim,
        }
    }

    /// Get the label at a row index.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Get the flat matrix for batch dot product.
    pub fn matrix(&self) -> &[f32] {
        &self.matrix
    }

    /// Get the embedding dimension (512).
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Get the number of labels in the bank.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the bank holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
