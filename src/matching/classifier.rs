//! Nearest-Reference Classification
//!
//! Canonicalizes a query trace once, scores it against every stored
//! reference, and accepts the best label only when its similarity clears
//! the confidence threshold. References are canonicalized at store time and
//! trusted as-is at query time.

use super::similarity;
use crate::pipeline::ShapePreprocessor;
use crate::store::{PatternStore, ReferenceLibrary};
use crate::trace::{CanonicalShape, RawTrace};
use tracing::{debug, info};

/// Default minimum similarity required to accept a classification
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// An accepted classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub label: String,
    pub similarity: f64,
}

/// Stateless request-response classifier over a reference library.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    preprocessor: ShapePreprocessor,
    confidence_threshold: f64,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self {
            preprocessor: ShapePreprocessor::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl PatternClassifier {
    pub fn new(preprocessor: ShapePreprocessor, confidence_threshold: f64) -> Self {
        Self {
            preprocessor,
            confidence_threshold,
        }
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn preprocessor(&self) -> &ShapePreprocessor {
        &self.preprocessor
    }

    /// Classify a raw trace against an in-memory library.
    ///
    /// Returns `Ok(None)` when the library is empty (no scoring happens at
    /// all) or when the best similarity falls strictly below the
    /// confidence threshold. Ties keep the earliest reference in library
    /// insertion order; the policy is arbitrary but deterministic.
    pub fn classify(
        &self,
        raw: &RawTrace,
        library: &ReferenceLibrary,
    ) -> crate::Result<Option<Match>> {
        if library.is_empty() {
            info!("No reference patterns available");
            return Ok(None);
        }

        let query = self.preprocessor.preprocess(raw)?;

        let mut best: Option<Match> = None;
        for (label, reference) in library.iter() {
            let outcome = similarity::score(reference, &query);
            debug!(
                label,
                similarity = outcome.similarity,
                "Reference compared"
            );
            if best
                .as_ref()
                .map_or(true, |b| outcome.similarity > b.similarity)
            {
                best = Some(Match {
                    label: label.to_string(),
                    similarity: outcome.similarity,
                });
            }
        }

        // Library is non-empty, so a best candidate always exists.
        let Some(best) = best else {
            return Ok(None);
        };

        if best.similarity < self.confidence_threshold {
            info!(
                best_label = %best.label,
                similarity = best.similarity,
                threshold = self.confidence_threshold,
                "Confidence too low; no reliable match"
            );
            return Ok(None);
        }
        Ok(Some(best))
    }

    /// Canonicalize a trace and persist it under `label`.
    ///
    /// The stored form is the pipeline output, so query-time comparisons
    /// never re-preprocess references.
    pub fn store_pattern(
        &self,
        store: &dyn PatternStore,
        label: &str,
        raw: &RawTrace,
    ) -> crate::Result<CanonicalShape> {
        let shape = self.preprocessor.preprocess(raw)?;
        store.save(label, &shape)?;
        info!(label, points = shape.len(), "Stored reference pattern");
        Ok(shape)
    }

    /// Load the library from `store` and classify against it.
    pub fn classify_pattern(
        &self,
        store: &dyn PatternStore,
        raw: &RawTrace,
    ) -> crate::Result<Option<Match>> {
        let library = store.load();
        self.classify(raw, &library)
    }
}
