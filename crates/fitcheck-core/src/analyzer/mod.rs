//! Zero-shot outfit classification.
//!
//! This module converts an outfit photo into top garment and style labels
//! using CLIP vision and text towers running locally via ONNX Runtime. Both
//! vocabularies are encoded into label banks once at startup; each request
//! then costs one vision inference plus two small dot products.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fitcheck_core::analyzer::{Classify, OutfitAnalyzer};
//! use fitcheck_core::config::Config;
//!
//! let config = Config::default();
//! let analyzer = OutfitAnalyzer::load(&config.model, &config.model_dir())?;
//! let result = analyzer.classify(&image_bytes)?;
//! println!("{}", result.feedback());
//! ```

pub mod labels;
pub mod preprocess;
pub mod scorer;
pub(crate) mod text;
pub(crate) mod vision;

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::DynamicImage;

use crate::config::ModelConfig;
use crate::error::AnalysisError;
use crate::types::ClassificationResult;

pub use labels::{LabelBank, CLOTHING_ITEMS, STYLES};

use self::preprocess::preprocess;
use self::text::ClipTextEncoder;
use self::vision::ClipVisionSession;

/// The vision tower ONNX model filename.
const VISION_MODEL_FILENAME: &str = "vision_model.onnx";

/// Labels kept per vocabulary; the advice sentences use all three.
const TOP_K: usize = 3;

/// Classification seam between the server and the model runtime.
///
/// The server holds this as a trait object so handler tests can swap in a
/// canned classifier without model files on disk. Classification is
/// CPU-bound and synchronous; callers on the async runtime should wrap it
/// in `spawn_blocking`.
pub trait Classify: Send + Sync {
    /// Classify an outfit photo from raw image bytes.
    fn classify(&self, image_bytes: &[u8]) -> Result<ClassificationResult, AnalysisError>;
}

/// Zero-shot outfit classifier backed by CLIP.
pub struct OutfitAnalyzer {
    vision: ClipVisionSession,
    garment_bank: LabelBank,
    style_bank: LabelBank,
    image_size: u32,
}

impl OutfitAnalyzer {
    /// Load the CLIP towers and encode both vocabularies.
    ///
    /// Expects `vision_model.onnx`, `text_model.onnx`, and `tokenizer.json`
    /// under `{model_dir}/{model_name}/`.
    pub fn load(config: &ModelConfig, model_dir: &Path) -> Result<Self, AnalysisError> {
        let dir = Self::model_path(config, model_dir);
        let vision_path = dir.join(VISION_MODEL_FILENAME);

        if !vision_path.exists() {
            return Err(AnalysisError::Model {
                name: config.name.clone(),
                message: format!(
                    "Vision model not found at {:?}. Run `fitcheck models download` first.",
                    vision_path
                ),
            });
        }

        tracing::info!("Loading CLIP model from {:?}", dir);
        let start = Instant::now();
        let vision = ClipVisionSession::load(&vision_path)?;
        let text_encoder = ClipTextEncoder::new(&dir)?;

        // The text tower is only needed to build the banks; it is dropped
        // once both vocabularies are encoded.
        let garment_bank = LabelBank::encode(&text_encoder, CLOTHING_ITEMS)?;
        let style_bank = LabelBank::encode(&text_encoder, STYLES)?;

        tracing::info!(
            garment_labels = garment_bank.len(),
            style_labels = style_bank.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Outfit analyzer ready"
        );

        Ok(Self {
            vision,
            garment_bank,
            style_bank,
            image_size: config.image_size,
        })
    }

    /// Classify a decoded outfit photo.
    pub fn analyze(&self, image: &DynamicImage) -> Result<ClassificationResult, AnalysisError> {
        let tensor = preprocess(image, self.image_size);
        let embedding = self.vision.embed(&tensor)?;

        let garments = scorer::top_k(&self.garment_bank, &embedding, TOP_K);
        let styles = scorer::top_k(&self.style_bank, &embedding, TOP_K);

        Ok(ClassificationResult { garments, styles })
    }

    /// Check whether all model files exist on disk.
    pub fn model_exists(config: &ModelConfig, model_dir: &Path) -> bool {
        let dir = Self::model_path(config, model_dir);
        dir.join(VISION_MODEL_FILENAME).exists() && ClipTextEncoder::model_exists(&dir)
    }

    /// Get the expected model directory path.
    pub fn model_path(config: &ModelConfig, model_dir: &Path) -> PathBuf {
        model_dir.join(&config.name)
    }
}

impl Classify for OutfitAnalyzer {
    fn classify(&self, image_bytes: &[u8]) -> Result<ClassificationResult, AnalysisError> {
        let image = decode_image(image_bytes)?;
        self.analyze(&image)
    }
}

/// Decode an image from an in-memory byte buffer with format detection.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AnalysisError> {
    use std::io::Cursor;

    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AnalysisError::Decode {
            message: format!("Cannot detect image format: {}", e),
        })?;
    reader.decode().map_err(|e| AnalysisError::Decode {
        message: e.to_string(),
    })
}
