//! Configuration Management

use crate::matching::{PatternClassifier, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::pipeline::{
    outlier_filter, resample, smoothing, GaussianSmoother, LinearResampler, OutlierFilter,
    ShapePreprocessor,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preprocessing settings
    pub pipeline: PipelineConfig,
    /// Matching settings
    pub matching: MatchingConfig,
    /// Reference store settings
    pub store: StoreConfig,
    /// Sensor settings
    pub sensor: SensorConfig,
}

/// Preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Z-score magnitude marking a point as an outlier
    pub outlier_zscore_threshold: f64,
    /// Keep the unfiltered trace when filtering leaves this many points or fewer
    pub outlier_min_points: usize,
    /// Gaussian smoothing sigma, in samples
    pub smoothing_sigma: f64,
    /// Canonical shape length after resampling
    pub canonical_points: usize,
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity required to accept a classification
    pub confidence_threshold: f64,
}

/// Reference store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Library file path; defaults under the home directory when unset
    pub library_path: Option<PathBuf>,
}

/// Sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Seconds to wait for a drawing before reading back an empty trace
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            outlier_zscore_threshold: outlier_filter::DEFAULT_ZSCORE_THRESHOLD,
            outlier_min_points: outlier_filter::DEFAULT_MIN_POINTS,
            smoothing_sigma: smoothing::DEFAULT_SIGMA,
            canonical_points: resample::DEFAULT_CANONICAL_LEN,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl StoreConfig {
    /// Resolve the library path, falling back to the default location.
    pub fn resolved_library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(Config::default_library_path)
    }
}

impl Config {
    /// Check value ranges before the config is used anywhere.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.pipeline.outlier_zscore_threshold <= 0.0 {
            return Err(crate::Error::Config(format!(
                "outlier_zscore_threshold must be positive, got {}",
                self.pipeline.outlier_zscore_threshold
            )));
        }
        if self.pipeline.smoothing_sigma <= 0.0 {
            return Err(crate::Error::Config(format!(
                "smoothing_sigma must be positive, got {}",
                self.pipeline.smoothing_sigma
            )));
        }
        if self.pipeline.canonical_points < 2 {
            return Err(crate::Error::Config(format!(
                "canonical_points must be at least 2, got {}",
                self.pipeline.canonical_points
            )));
        }
        if !(-1.0..=1.0).contains(&self.matching.confidence_threshold) {
            return Err(crate::Error::Config(format!(
                "confidence_threshold must be in [-1, 1], got {}",
                self.matching.confidence_threshold
            )));
        }
        if self.sensor.timeout_secs == 0 {
            return Err(crate::Error::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the preprocessing pipeline these settings describe.
    pub fn preprocessor(&self) -> ShapePreprocessor {
        ShapePreprocessor::new(
            OutlierFilter::new(
                self.pipeline.outlier_zscore_threshold,
                self.pipeline.outlier_min_points,
            ),
            GaussianSmoother::new(self.pipeline.smoothing_sigma),
            LinearResampler::new(self.pipeline.canonical_points),
        )
    }

    /// Build the classifier these settings describe.
    pub fn classifier(&self) -> PatternClassifier {
        PatternClassifier::new(self.preprocessor(), self.matching.confidence_threshold)
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        Self::app_dir().join("config.toml")
    }

    /// Get default reference library path
    pub fn default_library_path() -> PathBuf {
        Self::app_dir().join("patterns.json")
    }

    fn app_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".glyph_recognizer"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pipeline.canonical_points, 100);
        assert_eq!(config.pipeline.outlier_zscore_threshold, 2.0);
        assert_eq!(config.matching.confidence_threshold, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[pipeline]"));
        assert!(toml.contains("[matching]"));
        assert!(toml.contains("[sensor]"));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.matching.confidence_threshold = 0.6;
        config.pipeline.canonical_points = 64;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.matching.confidence_threshold, 0.6);
        assert_eq!(loaded.pipeline.canonical_points, 64);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nconfidence_threshold = 0.5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.matching.confidence_threshold, 0.5);
        assert_eq!(config.pipeline.canonical_points, 100);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nconfidence_threshold = 1.5\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        let mut config = Config::default();
        config.pipeline.smoothing_sigma = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_resolved_library_path_override() {
        let store = StoreConfig {
            library_path: Some(PathBuf::from("/tmp/custom.json")),
        };
        assert_eq!(
            store.resolved_library_path(),
            PathBuf::from("/tmp/custom.json")
        );

        let default_path = StoreConfig::default().resolved_library_path();
        assert!(default_path.to_string_lossy().contains("patterns.json"));
    }
}
