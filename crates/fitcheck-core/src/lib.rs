//! Fitcheck Core - outfit analysis and styling suggestions.
//!
//! Fitcheck takes an outfit photo as input and produces structured advice:
//! a style feedback sentence plus two sets of LLM-generated suggestions.
//!
//! # Architecture
//!
//! A thin pipeline with no database dependencies:
//!
//! ```text
//! Photo → Decode → Classify (CLIP zero-shot) → Feedback sentence
//!                                            → LLM: outfit suggestions
//!                                            → LLM: remix suggestions → JSON
//! ```
//!
//! Classification runs locally via ONNX Runtime against two closed
//! vocabularies (garments and styles); the suggestion calls go to
//! OpenRouter's chat completions API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fitcheck_core::analyzer::{Classify, OutfitAnalyzer};
//! use fitcheck_core::llm::OpenRouterClient;
//! use fitcheck_core::Config;
//!
//! let config = Config::load()?;
//! let analyzer = OutfitAnalyzer::load(&config.model, &config.model_dir())?;
//! let suggester = OpenRouterClient::from_config(&config.openrouter)?;
//!
//! let result = analyzer.classify(&photo_bytes)?;
//! let recommendations = suggester.outfit_suggestions(&result.feedback()).await?;
//! ```

// Module declarations
pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod math;
pub mod types;

// Re-exports for convenient access
pub use analyzer::{Classify, OutfitAnalyzer};
pub use config::Config;
pub use error::{AnalysisError, ConfigError, FitcheckError, LlmError, Result};
pub use llm::OpenRouterClient;
pub use types::{ClassificationResult, OutfitAdvice, ScoredLabel};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
