//! Request latency estimation from per-model generation throughput.
//!
//! Throughputs are read from a JSON document of the form
//!
//! ```json
//! {"models": [{"provider": "openai", "name": "gpt-4o", "throughput": 95.2}]}
//! ```
//!
//! Models missing from the table fall back to [`DEFAULT_THROUGHPUT`].

use crate::errors::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Throughput used for models without a measured value, in tokens per second.
pub const DEFAULT_THROUGHPUT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputEntry {
    pub provider: String,
    pub name: String,
    /// Output tokens generated per second.
    pub throughput: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThroughputDocument {
    pub models: Vec<ThroughputEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LatencyEstimator {
    throughputs: HashMap<(String, String), f64>,
    default_throughput: f64,
}

impl Default for LatencyEstimator {
    fn default() -> Self {
        Self {
            throughputs: HashMap::new(),
            default_throughput: DEFAULT_THROUGHPUT,
        }
    }
}

impl LatencyEstimator {
    /// Builds an estimator from a parsed document.
    ///
    /// Later entries for the same provider and model replace earlier ones.
    pub fn from_document(document: ThroughputDocument) -> CatalogResult<Self> {
        let mut throughputs = HashMap::with_capacity(document.models.len());
        for entry in document.models {
            let context = format!("{}/{}", entry.provider, entry.name);
            validate_throughput(&context, entry.throughput)?;
            if throughputs
                .insert((entry.provider, entry.name), entry.throughput)
                .is_some()
            {
                warn!(model = %context, "duplicate throughput entry");
            }
        }
        debug!(models = throughputs.len(), "loaded throughput table");
        Ok(Self {
            throughputs,
            ..Self::default()
        })
    }

    pub fn from_json_str(source: &str) -> CatalogResult<Self> {
        Self::from_document(serde_json::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_json_str(&source)
    }

    /// Replaces the fallback throughput used for unknown models.
    pub fn with_default_throughput(mut self, throughput: f64) -> CatalogResult<Self> {
        validate_throughput("default", throughput)?;
        self.default_throughput = throughput;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.throughputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throughputs.is_empty()
    }

    /// Measured throughput of a model, or the default for unknown models.
    #[must_use]
    pub fn throughput(&self, provider: &str, model: &str) -> f64 {
        match self
            .throughputs
            .get(&(provider.to_string(), model.to_string()))
        {
            Some(throughput) => *throughput,
            None => {
                debug!(provider, model, "no measured throughput, using default");
                self.default_throughput
            }
        }
    }

    /// Estimated generation time in seconds.
    ///
    /// `throughput_override` replaces the table value, as in expert mode.
    pub fn estimate(
        &self,
        provider: &str,
        model: &str,
        output_tokens: u32,
        throughput_override: Option<f64>,
    ) -> CatalogResult<f64> {
        let throughput = match throughput_override {
            Some(value) => {
                validate_throughput("override", value)?;
                value
            }
            None => self.throughput(provider, model),
        };
        Ok(f64::from(output_tokens) / throughput)
    }
}

fn validate_throughput(context: &str, value: f64) -> CatalogResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidThroughput {
            context: context.to_string(),
            value,
        })
    }
}
