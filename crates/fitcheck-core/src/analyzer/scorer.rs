//! Zero-shot scoring of image embeddings against a label bank.
//!
//! Computes dot products between a single image embedding and all label
//! embeddings in the bank, applies CLIP's softmax scoring, and returns the
//! top labels.

use crate::math::softmax;
use crate::types::ScoredLabel;

use super::labels::LabelBank;

/// CLIP's learned logit scale (`logit_scale.exp()` for ViT-B/32).
///
/// Amplifies small cosine differences before the softmax so the winning
/// label separates from the rest.
const LOGIT_SCALE: f32 = 100.0;

/// Score an image embedding against every label in the bank.
///
/// Returns all labels with softmax probabilities, sorted descending. Both
/// image and label embeddings are L2-normalized, so dot product = cosine
/// similarity.
pub fn score(bank: &LabelBank, image_embedding: &[f32]) -> Vec<ScoredLabel> {
    let n = bank.len();
    let dim = bank.embedding_dim();
    let matrix = bank.matrix();
    debug_assert_eq!(image_embedding.len(), dim);

    let mut logits: Vec<f32> = Vec::with_capacity(n);
    for i in 0..n {
        let offset = i * dim;
        let cosine: f32 = (0..dim)
            .map(|j| image_embedding[j] * matrix[offset + j])
            .sum();
        logits.push(LOGIT_SCALE * cosine);
    }

    let probabilities = softmax(&logits);

    let mut scored: Vec<ScoredLabel> = probabilities
        .into_iter()
        .enumerate()
        .filter_map(|(idx, score)| bank.label(idx).map(|label| ScoredLabel::new(label, score)))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Score and keep the `k` most probable labels.
pub fn top_k(bank: &LabelBank, image_embedding: &[f32], k: usize) -> Vec<ScoredLabel> {
    let mut scored = score(bank, image_embedding);
    scored.truncate(k);
    scored
}
