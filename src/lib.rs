//! # Glyph Recognizer
//!
//! Identifies hand-drawn 2D glyphs captured as coordinate traces from a
//! position sensor, by comparing them against a library of previously
//! recorded reference shapes.
//!
//! ## Overview
//!
//! A raw trace is a temporal sequence of (x, y) samples of arbitrary length.
//! Before any comparison it is reduced to a canonical shape: outliers
//! removed, noise smoothed away, both axes standardized, and the whole
//! sequence resampled to a fixed number of points. Canonical shapes are
//! compared with a Procrustes-aligned covariance score, and the classifier
//! returns the best-scoring reference label when its similarity clears a
//! confidence threshold.
//!
//! ## Quick Start
//!
//! ```no_run
//! use glyph_recognizer::matching::PatternClassifier;
//! use glyph_recognizer::pipeline::ShapePreprocessor;
//! use glyph_recognizer::store::{JsonPatternStore, PatternStore};
//! use glyph_recognizer::trace::RawTrace;
//!
//! let store = JsonPatternStore::new("patterns.json".into());
//! let classifier = PatternClassifier::new(ShapePreprocessor::default(), 0.75);
//!
//! // Record a reference shape under a label.
//! let circle = RawTrace::load("circle.json".as_ref()).unwrap();
//! classifier.store_pattern(&store, "O", &circle).unwrap();
//!
//! // Identify a new drawing.
//! let drawing = RawTrace::load("drawing.json".as_ref()).unwrap();
//! match classifier.classify_pattern(&store, &drawing).unwrap() {
//!     Some(m) => println!("matched '{}' ({:.4})", m.label, m.similarity),
//!     None => println!("no reliable match"),
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`trace`]: raw/canonical trace types and the coordinate-source seam
//! - [`pipeline`]: outlier removal, smoothing, standardization, resampling
//! - [`matching`]: Procrustes alignment, similarity scoring, classification
//! - [`store`]: the reference library and its JSON persistence
//! - [`game`]: tic-tac-toe played by drawing symbols and digits
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌───────────┐   ┌───────────┐   ┌─────────────┐
//! │ raw trace  │──▶│ outlier   │──▶│ Gaussian  │──▶│ standardize │
//! │ (sensor)   │   │ filter    │   │ smoothing │   │ per axis    │
//! └────────────┘   └───────────┘   └───────────┘   └─────────────┘
//!                                                         │
//!                                                         ▼
//! ┌────────────┐   ┌───────────┐   ┌───────────┐   ┌─────────────┐
//! │ best label │◀──│ covariance│◀──│ Procrustes│◀──│ resample to │
//! │ or no match│   │ score     │   │ alignment │   │ N points    │
//! └────────────┘   └───────────┘   └───────────┘   └─────────────┘
//! ```

pub mod trace;
pub mod pipeline;
pub mod matching;
pub mod store;
pub mod game;
pub mod app;

// Re-export commonly used types
pub use matching::{Match, PatternClassifier};
pub use pipeline::ShapePreprocessor;
pub use store::{JsonPatternStore, PatternStore, ReferenceLibrary};
pub use trace::{CanonicalShape, CoordinateSource, RawTrace, TracePoint};

/// Result type alias for the glyph recognizer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the glyph recognizer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Trace too short to interpolate. Retryable: re-prompt for input.
    #[error("Input trace has {0} point(s); at least 2 are required")]
    TraceTooShort(usize),

    #[error("Input trace contains a non-finite coordinate at index {0}")]
    NonFiniteCoordinate(usize),

    #[error("Reference label must not be empty")]
    EmptyLabel,

    #[error("Canonical shape error: {0}")]
    Shape(String),

    #[error("Sensor error: {0}")]
    Sensor(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the caller should re-prompt for a new trace instead of
    /// treating the failure as fatal.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::TraceTooShort(_) | Error::NonFiniteCoordinate(_) | Error::Sensor(_)
        )
    }
}
