//! CLIP text encoder for generating label embeddings.
//!
//! Loads the CLIP text ONNX model and BPE tokenizer, encodes label strings
//! to 512-dimensional vectors aligned with the vision tower's space.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Value;

use crate::error::AnalysisError;

/// CLIP context length (fixed sequence length of the text tower).
const MAX_LENGTH: usize = 77;

/// CLIP pads with the end-of-text token. The pooled embedding is taken at
/// the first end-of-text position, so trailing pads do not disturb it.
const PAD_TOKEN_ID: i64 = 49407;

/// CLIP text encoder wrapper.
///
/// Uses the same `Mutex<Session>` pattern as the vision encoder.
pub struct ClipTextEncoder {
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
    embedding_dim: usize,
}

impl ClipTextEncoder {
    /// Load the text encoder from the model directory.
    ///
    /// Expects `text_model.onnx` and `tokenizer.json` in `model_dir`.
    pub fn new(model_dir: &Path) -> Result<Self, AnalysisError> {
        let text_model_path = model_dir.join("text_model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !text_model_path.exists() {
            return Err(AnalysisError::Model {
                name: "text encoder".to_string(),
                message: format!(
                    "Text encoder not found at {:?}. Run `fitcheck models download` first.",
                    text_model_path
                ),
            });
        }

        if !tokenizer_path.exists() {
            return Err(AnalysisError::Model {
                name: "tokenizer".to_string(),
                message: format!(
                    "Tokenizer not found at {:?}. Run `fitcheck models download` first.",
                    tokenizer_path
                ),
            });
        }

        let session = Session::builder()
            .map_err(|e| AnalysisError::Model {
                name: "text encoder".to_string(),
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(&text_model_path)
            .map_err(|e| AnalysisError::Model {
                name: "text encoder".to_string(),
                message: format!("Failed to load text encoder model: {e}"),
            })?;

        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            AnalysisError::Model {
                name: "tokenizer".to_string(),
                message: format!("Failed to load tokenizer: {e}"),
            }
        })?;

        tracing::debug!(
            "Loaded CLIP text encoder (inputs: {:?}, outputs: {:?})",
            session
                .inputs()
                .iter()
                .map(|i| i.name())
                .collect::<Vec<_>>(),
            session
                .outputs()
                .iter()
                .map(|o| o.name())
                .collect::<Vec<_>>()
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            embedding_dim: 512,
        })
    }

    /// Encode a batch of label strings to normalized embeddings.
    ///
    /// Returns a Vec of 512-dim f32 vectors, one per input text.
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AnalysisError> {
        let batch_size = texts.len();
        if batch_size == 0 {
            return Ok(vec![]);
        }

        // Tokenize all texts
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| AnalysisError::Inference {
                stage: "text".to_string(),
                message: format!("Tokenization failed: {e}"),
            })?;

        // Build flat input_ids / attention_mask tensors padded to the CLIP
        // context length. The text model takes both inputs.
        let mut input_ids = vec![PAD_TOKEN_ID; batch_size * MAX_LENGTH];
        let mut attention_mask = vec![0i64; batch_size * MAX_LENGTH];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            for (j, &id) in ids.iter().take(MAX_LENGTH).enumerate() {
                input_ids[i * MAX_LENGTH + j] = id as i64;
                attention_mask[i * MAX_LENGTH + j] = 1;
            }
        }

        // Run inference
        let mut session = self.session.lock().map_err(|e| AnalysisError::Inference {
            stage: "text".to_string(),
            message: format!("Text encoder lock poisoned: {e}"),
        })?;

        let shape = vec![batch_size as i64, MAX_LENGTH as i64];
        let input_ids_value = Value::from_array((shape.clone(), input_ids)).map_err(|e| {
            AnalysisError::Inference {
                stage: "text".to_string(),
                message: format!("Failed to create input tensor: {e}"),
            }
        })?;
        let attention_mask_value =
            Value::from_array((shape, attention_mask)).map_err(|e| AnalysisError::Inference {
                stage: "text".to_string(),
                message: format!("Failed to create attention mask tensor: {e}"),
            })?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_value,
                "attention_mask" => attention_mask_value,
            ])
            .map_err(|e| AnalysisError::Inference {
                stage: "text".to_string(),
                message: format!("Text encoder inference failed: {e}"),
            })?;

        // Extract text_embeds by name: the projected embedding aligned with
        // the vision tower.
        let text_embeds = outputs
            .iter()
            .find(|(name, _)| *name == "text_embeds")
            .ok_or_else(|| AnalysisError::Inference {
                stage: "text".to_string(),
                message: "Text encoder did not produce text_embeds".to_string(),
            })?;

        let (_shape, data) =
            text_embeds
                .1
                .try_extract_tensor::<f32>()
                .map_err(|e| AnalysisError::Inference {
                    stage: "text".to_string(),
                    message: format!("Failed to extract text_embeds: {e}"),
                })?;

        // Split flat output into per-text embeddings and L2-normalize
        let embeddings: Vec<Vec<f32>> = data
            .chunks(self.embedding_dim)
            .map(crate::math::l2_normalize)
            .collect();

        Ok(embeddings)
    }

    /// Check whether the text encoder model files exist.
    pub fn model_exists(model_dir: &Path) -> bool {
        model_dir.join("text_model.onnx").exists() && model_dir.join("tokenizer.json").exists()
    }
}
