//! CLIP vision tower session management and inference.
//!
//! Loads the CLIP visual encoder exported to ONNX format and runs inference
//! to produce 512-dimensional projected image embeddings.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;

use crate::error::AnalysisError;

/// Wraps an ONNX Runtime session for the CLIP vision tower.
///
/// Uses a `Mutex` because `Session::run` requires `&mut self`.
pub struct ClipVisionSession {
    session: Mutex<Session>,
    /// Name of the input tensor (detected from model metadata).
    input_name: String,
}

impl ClipVisionSession {
    /// Load the CLIP vision encoder from an ONNX file.
    pub fn load(model_path: &Path) -> Result<Self, AnalysisError> {
        let session = Session::builder()
            .map_err(|e| AnalysisError::Model {
                name: model_path.display().to_string(),
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(model_path)
            .map_err(|e| AnalysisError::Model {
                name: model_path.display().to_string(),
                message: format!("Failed to load ONNX model: {e}"),
            })?;

        // Detect the input tensor name from model metadata.
        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "pixel_values".to_string());

        tracing::debug!(
            "Loaded CLIP vision model from {:?} (input: {:?}, outputs: {:?})",
            model_path,
            input_name,
            session
                .outputs()
                .iter()
                .map(|o| o.name())
                .collect::<Vec<_>>()
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }

    /// Run inference on a preprocessed image tensor and return the embedding.
    ///
    /// Input shape: \[1, 3, image_size, image_size\] (NCHW, CLIP-normalized).
    /// Output: L2-normalized embedding vector (512 floats from image_embeds).
    pub fn embed(&self, preprocessed: &Array4<f32>) -> Result<Vec<f32>, AnalysisError> {
        // Convert ndarray to (shape, flat_data) for ort (avoids ndarray feature dependency).
        let shape: Vec<i64> = preprocessed.shape().iter().map(|&d| d as i64).collect();
        let flat_data: Vec<f32> = preprocessed.iter().copied().collect();

        let input_value =
            Value::from_array((shape, flat_data)).map_err(|e| AnalysisError::Inference {
                stage: "vision".to_string(),
                message: format!("Failed to create input tensor: {e}"),
            })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_value];

        let mut session = self.session.lock().map_err(|e| AnalysisError::Inference {
            stage: "vision".to_string(),
            message: format!("Session lock poisoned: {e}"),
        })?;

        let outputs = session.run(inputs).map_err(|e| AnalysisError::Inference {
            stage: "vision".to_string(),
            message: format!("ONNX inference failed: {e}"),
        })?;

        // Extract image_embeds by name: the projected embedding aligned with
        // the text tower. The other outputs (last_hidden_state, pooler_output)
        // are NOT in the shared space and must not be scored against labels.
        let image_embeds = outputs
            .iter()
            .find(|(name, _)| *name == "image_embeds")
            .ok_or_else(|| AnalysisError::Inference {
                stage: "vision".to_string(),
                message: "Model did not produce image_embeds".to_string(),
            })?;

        let (shape, data) =
            image_embeds
                .1
                .try_extract_tensor::<f32>()
                .map_err(|e| AnalysisError::Inference {
                    stage: "vision".to_string(),
                    message: format!("Failed to extract image_embeds tensor: {e}"),
                })?;

        // image_embeds is [1, 512]; extract the single embedding vector.
        let mut raw = match shape.len() {
            1 => data.to_vec(),
            2 => {
                let dim = shape[1] as usize;
                data[..dim].to_vec()
            }
            _ => {
                return Err(AnalysisError::Inference {
                    stage: "vision".to_string(),
                    message: format!("Unexpected image_embeds shape: {:?}", shape),
                });
            }
        };

        crate::math::l2_normalize_in_place(&mut raw);
        Ok(raw)
    }
}
