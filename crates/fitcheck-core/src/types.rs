//! Core data types for the fitcheck outfit analysis service.
//!
//! These types carry an image through classification and into the advice
//! payload returned to the client.

use serde::{Deserialize, Serialize};

/// A vocabulary label with its softmax probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// The label text (e.g., "jeans", "casual")
    pub label: String,

    /// Probability from 0.0 to 1.0, softmaxed within the label's vocabulary
    pub score: f32,
}

impl ScoredLabel {
    /// Create a new scored label.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Zero-shot classification output for one outfit photo.
///
/// Each list holds the top three labels of its vocabulary, highest
/// probability first. The analyzer always produces exactly three entries
/// per list; the sentence builders fall back to "unknown" if handed less.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Top garment labels (from the clothing vocabulary)
    pub garments: Vec<ScoredLabel>,

    /// Top style labels (from the style vocabulary)
    pub styles: Vec<ScoredLabel>,
}

impl ClassificationResult {
    /// The style feedback sentence shown to the user and fed to the
    /// outfit-suggestion prompt.
    pub fn feedback(&self) -> String {
        let style = |i: usize| self.styles.get(i).map_or("unknown", |s| s.label.as_str());
        format!(
            "This outfit is {}! It also works well for {} and {}.",
            style(0),
            style(1),
            style(2)
        )
    }

    /// The garment sentence fed to the remix prompt.
    pub fn outfit_description(&self) -> String {
        let garment = |i: usize| self.garments.get(i).map_or("unknown", |g| g.label.as_str());
        format!(
            "The outfit includes a {}, {}, and {}.",
            garment(0),
            garment(1),
            garment(2)
        )
    }
}

/// The advice payload returned by the upload endpoint.
///
/// All three fields are always present. When a downstream call fails its
/// field carries an error sentence instead of advice, so the client can
/// render whatever succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitAdvice {
    /// Style feedback sentence derived from classification
    pub feedback: String,

    /// LLM-generated outfit suggestions for the detected style
    pub recommendations: String,

    /// LLM-generated ways to remix the detected garments
    pub remixing_suggestions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ClassificationResult {
        ClassificationResult {
            garments: vec![
                ScoredLabel::new("jacket", 0.41),
                ScoredLabel::new("jeans", 0.22),
                ScoredLabel::new("t-shirt", 0.11),
            ],
            styles: vec![
                ScoredLabel::new("casual", 0.52),
                ScoredLabel::new("streetwear", 0.21),
                ScoredLabel::new("sporty", 0.12),
            ],
        }
    }

    #[test]
    fn test_feedback_sentence() {
        let result = sample_result();
        assert_eq!(
            result.feedback(),
            "This outfit is casual! It also works well for streetwear and sporty."
        );
    }

    #[test]
    fn test_outfit_description_sentence() {
        let result = sample_result();
        assert_eq!(
            result.outfit_description(),
            "The outfit includes a jacket, jeans, and t-shirt."
        );
    }

    #[test]
    fn test_short_lists_fall_back_to_unknown() {
        let result = ClassificationResult {
            garments: vec![ScoredLabel::new("dress", 0.9)],
            styles: vec![],
        };
        assert_eq!(
            result.feedback(),
            "This outfit is unknown! It also works well for unknown and unknown."
        );
        assert_eq!(
            result.outfit_description(),
            "The outfit includes a dress, unknown, and unknown."
        );
    }

    #[test]
    fn test_advice_field_names() {
        let advice = OutfitAdvice {
            feedback: "This outfit is casual!".to_string(),
            recommendations: "1. **Casual Chic**".to_string(),
            remixing_suggestions: "1. **Streetwear Edge**".to_string(),
        };
        let json = serde_json::to_string(&advice).unwrap();
        assert!(json.contains("\"feedback\""));
        assert!(json.contains("\"recommendations\""));
        assert!(json.contains("\"remixing_suggestions\""));

        let parsed: OutfitAdvice = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.recommendations, "1. **Casual Chic**");
    }

    #[test]
    fn test_scored_label_roundtrip() {
        let label = ScoredLabel::new("hoodie", 0.37);
        let json = serde_json::to_string(&label).unwrap();
        let parsed: ScoredLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.label, "hoodie");
        assert!((parsed.score - 0.37).abs() < 1e-6);
    }
}
