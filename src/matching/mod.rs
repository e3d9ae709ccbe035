//! Shape alignment and classification
//!
//! Compares canonical shapes with a Procrustes-aligned covariance score and
//! picks the best-matching reference above a confidence threshold:
//! - Procrustes superimposition (translate, scale, rotate best-fit)
//! - per-axis covariance scoring averaged over x and y
//! - nearest-reference classification with confidence gating

pub mod classifier;
pub mod procrustes;
pub mod similarity;

pub use classifier::{Match, PatternClassifier, DEFAULT_CONFIDENCE_THRESHOLD};
pub use procrustes::{superimpose, Superimposition};
pub use similarity::{score, ScoreOutcome};
