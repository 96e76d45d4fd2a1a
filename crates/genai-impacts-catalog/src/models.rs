//! Model catalogue
//!
//! Reads the estimator's model repository and exposes, for each model, the
//! information the dashboard selectors and expert mode need: display names,
//! parameter counts and architecture warnings.
//!
//! # Document format
//!
//! ```json
//! {"models": [
//!     {"provider": "openai", "name": "gpt-4o",
//!      "architecture": {"type": "moe",
//!                       "parameters": {"total": {"min": 440, "max": 720},
//!                                      "active": {"min": 22, "max": 72}}},
//!      "warnings": ["model-arch-not-released"]}
//! ]}
//! ```
//!
//! Parameter counts are expressed in billions. Dense models carry a single
//! count which is both their total and active size. Models with another
//! architecture type are skipped.

use crate::errors::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Warning code for models whose architecture has not been disclosed.
pub const ARCH_NOT_RELEASED: &str = "model-arch-not-released";
/// Warning code for multimodal models, whose text-only estimate is approximate.
pub const ARCH_MULTIMODAL: &str = "model-arch-multimodal";

/// Models offered in the calculator selector.
pub const MAIN_MODELS: &[&str] = &[
    // OpenAI
    "gpt-3.5-turbo",
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4o-mini",
    "o1",
    "o1-mini",
    "o3-mini",
    "gpt-4.1-nano",
    "gpt-4.1-mini",
    "gpt-4.1",
    "o4-mini",
    "gpt-5-nano",
    "gpt-5-mini",
    "gpt-5",
    // Anthropic
    "claude-3-5-haiku-latest",
    "claude-3-5-sonnet-latest",
    "claude-3-7-sonnet-latest",
    "claude-opus-4-0",
    "claude-opus-4-1",
    "claude-sonnet-4-0",
    "claude-sonnet-4-5",
    "claude-haiku-4-5",
    // Cohere
    "command-a-03-2025",
    "command-r",
    "command-r-08-2024",
    "command-r-plus-08-2024",
    "command-r7b-12-2024",
    // Mistral AI
    "codestral-latest",
    "devstral-medium-latest",
    "devstral-small-latest",
    "magistral-medium-latest",
    "magistral-small-latest",
    "ministral-3b-latest",
    "ministral-8b-latest",
    "mistral-large-latest",
    "mistral-medium-latest",
    "mistral-small-latest",
    "mistral-tiny-latest",
    "open-mistral-7b",
    "open-mistral-nemo",
    "open-mixtral-8x22b",
    "open-mixtral-8x7b",
    // Google
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-flash",
    "gemini-2.5-pro",
];

/// Display name of a provider identifier, or the identifier itself when unknown.
#[must_use]
pub fn provider_display_name(provider: &str) -> &str {
    match provider {
        "anthropic" => "Anthropic",
        "cohere" => "Cohere",
        "google_genai" => "Google",
        "mistralai" => "Mistral AI",
        "openai" => "OpenAI",
        other => other,
    }
}

/// Removes `latest` and turns `-` and `_` into spaces.
///
/// ```
/// use genai_impacts_catalog::models::clean_model_name;
///
/// assert_eq!(clean_model_name("claude-3-5-sonnet"), "claude 3 5 sonnet");
/// assert_eq!(clean_model_name("mistral-large-latest"), "mistral large ");
/// ```
#[must_use]
pub fn clean_model_name(name: &str) -> String {
    name.replace("latest", "").replace(['-', '_'], " ")
}

/// A parameter count, in billions, possibly known only as a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterCount {
    Exact(f64),
    Range { min: f64, max: f64 },
}

impl ParameterCount {
    /// The exact count, or the middle of the range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        match self {
            ParameterCount::Exact(value) => *value,
            ParameterCount::Range { min, max } => (min + max) / 2.0,
        }
    }

    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self, ParameterCount::Range { .. })
    }

    fn validate(&self, model: &str) -> CatalogResult<()> {
        let valid = match self {
            ParameterCount::Exact(value) => value.is_finite() && *value > 0.0,
            ParameterCount::Range { min, max } => {
                min.is_finite() && max.is_finite() && *min > 0.0 && min <= max
            }
        };
        if valid {
            Ok(())
        } else {
            Err(CatalogError::InvalidModel {
                model: model.to_string(),
                reason: format!("invalid parameter count {self:?}"),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureType {
    Dense,
    Moe,
}

/// One catalogue entry, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRecord {
    pub provider: String,
    pub provider_display: String,
    pub name: String,
    pub display_name: String,
    pub architecture: ArchitectureType,
    pub total_parameters: ParameterCount,
    pub active_parameters: ParameterCount,
    pub warning_architecture: bool,
    pub warning_multimodal: bool,
}

#[derive(Deserialize)]
struct RawDocument {
    models: Vec<RawModel>,
}

#[derive(Deserialize)]
struct RawModel {
    provider: String,
    name: String,
    architecture: RawArchitecture,
    #[serde(default)]
    warnings: Vec<RawWarning>,
}

#[derive(Deserialize)]
struct RawArchitecture {
    #[serde(rename = "type")]
    kind: String,
    parameters: Value,
}

#[derive(Deserialize)]
struct MoeParameters {
    total: ParameterCount,
    active: ParameterCount,
}

/// Warnings appear either as bare codes or as `{"code": ...}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawWarning {
    Code(String),
    Object { code: String },
}

impl RawWarning {
    fn code(&self) -> &str {
        match self {
            RawWarning::Code(code) | RawWarning::Object { code } => code,
        }
    }
}

impl RawModel {
    /// Converts a raw entry, returning `None` for unsupported architectures.
    fn into_record(self) -> CatalogResult<Option<ModelRecord>> {
        let invalid = |e: serde_json::Error| CatalogError::InvalidModel {
            model: self.name.clone(),
            reason: e.to_string(),
        };

        let (architecture, total, active) = match self.architecture.kind.as_str() {
            "dense" => {
                let count: ParameterCount =
                    serde_json::from_value(self.architecture.parameters.clone()).map_err(invalid)?;
                (ArchitectureType::Dense, count, count)
            }
            "moe" => {
                let counts: MoeParameters =
                    serde_json::from_value(self.architecture.parameters.clone()).map_err(invalid)?;
                (ArchitectureType::Moe, counts.total, counts.active)
            }
            other => {
                warn!(
                    model = %self.name,
                    architecture = other,
                    "skipping unsupported architecture"
                );
                return Ok(None);
            }
        };
        total.validate(&self.name)?;
        active.validate(&self.name)?;

        let has_warning = |code: &str| self.warnings.iter().any(|w| w.code() == code);
        Ok(Some(ModelRecord {
            provider_display: provider_display_name(&self.provider).to_string(),
            display_name: clean_model_name(&self.name),
            architecture,
            total_parameters: total,
            active_parameters: active,
            warning_architecture: has_warning(ARCH_NOT_RELEASED),
            warning_multimodal: has_warning(ARCH_MULTIMODAL),
            provider: self.provider,
            name: self.name,
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelCatalog {
    models: Vec<ModelRecord>,
}

impl ModelCatalog {
    /// Parses a model repository document.
    ///
    /// With `main_only`, models outside [`MAIN_MODELS`] are left out.
    pub fn from_json_str(source: &str, main_only: bool) -> CatalogResult<Self> {
        let document: RawDocument = serde_json::from_str(source)?;
        let total = document.models.len();

        let mut models = Vec::new();
        for raw in document.models {
            if main_only && !MAIN_MODELS.contains(&raw.name.as_str()) {
                continue;
            }
            if let Some(record) = raw.into_record()? {
                models.push(record);
            }
        }
        debug!(total, kept = models.len(), main_only, "loaded model catalogue");
        Ok(Self { models })
    }

    pub fn from_path(path: impl AsRef<Path>, main_only: bool) -> CatalogResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_json_str(&source, main_only)
    }

    pub fn models(&self) -> &[ModelRecord] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Provider display names, sorted and deduplicated.
    pub fn providers(&self) -> Vec<&str> {
        self.models
            .iter()
            .map(|m| m.provider_display.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Models of one provider, selected by display name.
    pub fn models_for_provider<'a>(
        &'a self,
        provider_display: &'a str,
    ) -> impl Iterator<Item = &'a ModelRecord> + 'a {
        self.models
            .iter()
            .filter(move |m| m.provider_display == provider_display)
    }

    /// Looks up a model by provider and model display names, as chosen in
    /// the selectors.
    pub fn find(&self, provider_display: &str, display_name: &str) -> Option<&ModelRecord> {
        self.models
            .iter()
            .find(|m| m.provider_display == provider_display && m.display_name == display_name)
    }

    /// Looks up a model by its raw provider and model identifiers.
    pub fn get(&self, provider: &str, name: &str) -> Option<&ModelRecord> {
        self.models
            .iter()
            .find(|m| m.provider == provider && m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_clean_model_name() {
        assert_eq!(clean_model_name("claude-3-5-sonnet"), "claude 3 5 sonnet");
        assert_eq!(clean_model_name("text_embedding_v3"), "text embedding v3");
        assert_eq!(clean_model_name("gpt4"), "gpt4");
        assert_eq!(clean_model_name(""), "");

        let cleaned = clean_model_name("claude-3-5-sonnet-latest");
        assert!(!cleaned.contains("latest"));
        assert!(cleaned.starts_with("claude 3 5 sonnet"));
    }

    #[test]
    fn test_provider_display_name() {
        assert_eq!(provider_display_name("anthropic"), "Anthropic");
        assert_eq!(provider_display_name("cohere"), "Cohere");
        assert_eq!(provider_display_name("google_genai"), "Google");
        assert_eq!(provider_display_name("mistralai"), "Mistral AI");
        assert_eq!(provider_display_name("openai"), "OpenAI");
        assert_eq!(provider_display_name("huggingface_hub"), "huggingface_hub");
    }

    #[test]
    fn test_parameter_midpoint() {
        assert_eq!(ParameterCount::Exact(1700.0).midpoint(), 1700.0);
        let range = ParameterCount::Range {
            min: 440.0,
            max: 720.0,
        };
        assert!(range.is_range());
        assert!(is_close!(range.midpoint(), 580.0));
    }

    #[test]
    fn test_dense_model() {
        let catalog = ModelCatalog::from_json_str(
            r#"{"models": [{"provider": "openai", "name": "gpt-4",
                "architecture": {"type": "dense", "parameters": 1700}, "warnings": []}]}"#,
            true,
        )
        .unwrap();

        let model = catalog.get("openai", "gpt-4").unwrap();
        assert_eq!(model.provider_display, "OpenAI");
        assert_eq!(model.display_name, "gpt 4");
        assert_eq!(model.architecture, ArchitectureType::Dense);
        assert_eq!(model.total_parameters, ParameterCount::Exact(1700.0));
        assert_eq!(model.active_parameters, model.total_parameters);
        assert!(!model.warning_architecture);
        assert!(!model.warning_multimodal);
    }

    #[test]
    fn test_warnings_as_objects() {
        let catalog = ModelCatalog::from_json_str(
            r#"{"models": [{"provider": "google_genai", "name": "gemini-2.5-pro",
                "architecture": {"type": "dense", "parameters": {"min": 100, "max": 500}},
                "warnings": [{"code": "model-arch-not-released"}, {"code": "model-arch-multimodal"}]}]}"#,
            false,
        )
        .unwrap();

        let model = &catalog.models()[0];
        assert!(model.warning_architecture);
        assert!(model.warning_multimodal);
        assert!(is_close!(model.total_parameters.midpoint(), 300.0));
    }

    #[test]
    fn test_invalid_parameters() {
        let result = ModelCatalog::from_json_str(
            r#"{"models": [{"provider": "openai", "name": "gpt-4",
                "architecture": {"type": "dense", "parameters": {"min": 500, "max": 100}}}]}"#,
            false,
        );
        assert!(matches!(result, Err(CatalogError::InvalidModel { .. })));

        let result = ModelCatalog::from_json_str(
            r#"{"models": [{"provider": "openai", "name": "gpt-4",
                "architecture": {"type": "moe", "parameters": 1700}}]}"#,
            false,
        );
        assert!(matches!(result, Err(CatalogError::InvalidModel { .. })));
    }
}
