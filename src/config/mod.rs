//! Configuration with YAML loading and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Field range checks via `validator`
//! - Runtime semantic validation
//!
//! Every field has a default, so an empty document is a valid configuration.
//! An unrecognized algorithm name is not an error; it selects bubble sort.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::algorithms::Algorithm;
use crate::engine::guard::GuardConfig;
use crate::engine::rng::DataRng;
use crate::engine::Value;
use crate::error::{SortError, SortResult};
use crate::renderers::frame::{FrameOptions, DEFAULT_LABEL_THRESHOLD};

/// Largest input the visualizer accepts.
pub const MAX_SIZE: usize = 1000;

/// Longest accepted per-step delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 10_000;

/// Top-level visualizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Sorting variant to play.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Number of generated values.
    #[validate(range(max = MAX_SIZE))]
    #[serde(default = "default_size")]
    pub size: usize,

    /// Pause after each rendered step, in milliseconds.
    #[validate(range(max = MAX_DELAY_MS))]
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Seed for input generation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Smallest generated value.
    #[validate(range(min = 1))]
    #[serde(default = "default_min_value")]
    pub min_value: Value,

    /// Width of the generated value range.
    #[validate(range(min = 1))]
    #[serde(default = "default_value_range")]
    pub value_range: Value,

    /// Inputs up to this size get value labels.
    #[serde(default = "default_label_threshold")]
    pub label_threshold: usize,

    /// Step guard (stop-on-error) configuration.
    #[serde(default)]
    pub guard: GuardConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_size() -> usize {
    50
}

const fn default_delay_ms() -> u64 {
    50
}

const fn default_seed() -> u64 {
    42
}

const fn default_min_value() -> Value {
    5
}

const fn default_value_range() -> Value {
    400
}

const fn default_label_threshold() -> usize {
    DEFAULT_LABEL_THRESHOLD
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            algorithm: Algorithm::default(),
            size: default_size(),
            delay_ms: default_delay_ms(),
            seed: default_seed(),
            min_value: default_min_value(),
            value_range: default_value_range(),
            label_threshold: default_label_threshold(),
            guard: GuardConfig::default(),
        }
    }
}

impl VisualizerConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::default()
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for out-of-range fields and `Config` for
    /// inconsistent combinations.
    pub fn check(&self) -> SortResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate constraints that span fields.
    fn validate_semantic(&self) -> SortResult<()> {
        if self.min_value.checked_add(self.value_range).is_none() {
            return Err(SortError::config(format!(
                "value range [{}, {} + {}) overflows",
                self.min_value, self.min_value, self.value_range
            )));
        }
        if !self.schema_version.starts_with("1.") {
            return Err(SortError::config(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }
        Ok(())
    }

    /// Per-step delay as a duration.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Frame layout derived from this configuration.
    #[must_use]
    pub const fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            label_threshold: self.label_threshold,
        }
    }

    /// Generator seeded from this configuration.
    #[must_use]
    pub fn rng(&self) -> DataRng {
        DataRng::new(self.seed)
    }

    /// Generate the input sequence described by this configuration.
    #[must_use]
    pub fn generate_input(&self) -> Vec<Value> {
        self.rng()
            .generate(self.size, self.min_value, self.value_range)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VisualizerConfigBuilder {
    algorithm: Option<Algorithm>,
    size: Option<usize>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
    values: Option<(Value, Value)>,
    label_threshold: Option<usize>,
    guard: Option<GuardConfig>,
}

impl VisualizerConfigBuilder {
    /// Set the sorting variant.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the number of values.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the per-step delay in milliseconds.
    #[must_use]
    pub const fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the generated value range `[min, min + range)`.
    #[must_use]
    pub const fn values(mut self, min: Value, range: Value) -> Self {
        self.values = Some((min, range));
        self
    }

    /// Set the label threshold.
    #[must_use]
    pub const fn label_threshold(mut self, threshold: usize) -> Self {
        self.label_threshold = Some(threshold);
        self
    }

    /// Set the step guard configuration.
    #[must_use]
    pub const fn guard(mut self, guard: GuardConfig) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VisualizerConfig {
        let mut config = VisualizerConfig::default();

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some((min, range)) = self.values {
            config.min_value = min;
            config.value_range = range;
        }
        if let Some(threshold) = self.label_threshold {
            config.label_threshold = threshold;
        }
        if let Some(guard) = self.guard {
            config.guard = guard;
        }

        config
    }
}
