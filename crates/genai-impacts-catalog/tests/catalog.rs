//! Loading catalogues from disk and combining them as the calculator does.

use approx::assert_relative_eq;
use genai_impacts_catalog::{
    default_scenario, ArchitectureType, CatalogError, LatencyEstimator, ModelCatalog,
};
use std::path::PathBuf;
use tempfile::TempDir;

const MODELS: &str = r#"{
    "models": [
        {"type": "model", "provider": "openai", "name": "gpt-4o-mini",
         "architecture": {"type": "moe",
                          "parameters": {"total": {"min": 20, "max": 60}, "active": {"min": 4, "max": 12}}},
         "warnings": ["model-arch-not-released"]},
        {"type": "model", "provider": "mistralai", "name": "mistral-small-latest",
         "architecture": {"type": "dense", "parameters": 22}},
        {"type": "model", "provider": "mistralai", "name": "open-mixtral-8x7b",
         "architecture": {"type": "moe", "parameters": {"total": 46.7, "active": 12.9}}},
        {"type": "model", "provider": "huggingface_hub", "name": "tiny-research-model",
         "architecture": {"type": "dense", "parameters": 1.1}},
        {"type": "model", "provider": "openai", "name": "gpt-image-1",
         "architecture": {"type": "diffusion", "parameters": 10}}
    ]
}"#;

const THROUGHPUTS: &str = r#"{
    "models": [
        {"provider": "openai", "name": "gpt-4o-mini", "throughput": 125.0},
        {"provider": "mistralai", "name": "mistral-small-latest", "throughput": 100.0}
    ]
}"#;

/// Writes `contents` into a fresh directory removed when the guard drops.
fn write_fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

mod models {
    use super::*;

    #[test]
    fn test_main_models_filter() {
        let main = ModelCatalog::from_json_str(MODELS, true).unwrap();
        assert_eq!(main.len(), 3);
        assert!(main.get("huggingface_hub", "tiny-research-model").is_none());

        let all = ModelCatalog::from_json_str(MODELS, false).unwrap();
        // The diffusion model is skipped, not rejected
        assert_eq!(all.len(), 4);
        assert_eq!(
            all.providers(),
            vec!["Mistral AI", "OpenAI", "huggingface_hub"]
        );
    }

    #[test]
    fn test_moe_parameters() {
        let catalog = ModelCatalog::from_json_str(MODELS, true).unwrap();

        let mini = catalog.find("OpenAI", "gpt 4o mini").unwrap();
        assert_eq!(mini.architecture, ArchitectureType::Moe);
        assert!(mini.warning_architecture);
        assert_relative_eq!(mini.total_parameters.midpoint(), 40.0);
        assert_relative_eq!(mini.active_parameters.midpoint(), 8.0);

        let mixtral = catalog.get("mistralai", "open-mixtral-8x7b").unwrap();
        assert!(!mixtral.total_parameters.is_range());
        assert_relative_eq!(mixtral.active_parameters.midpoint(), 12.9);
    }

    #[test]
    fn test_models_for_provider() {
        let catalog = ModelCatalog::from_json_str(MODELS, true).unwrap();
        let names: Vec<_> = catalog
            .models_for_provider("Mistral AI")
            .map(|m| m.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["mistral small ", "open mixtral 8x7b"]);
    }

    #[test]
    fn test_from_path() {
        let (dir, path) = write_fixture("models.json", MODELS);
        let catalog = ModelCatalog::from_path(&path, false).unwrap();
        assert_eq!(catalog.len(), 4);

        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            ModelCatalog::from_json_str(r#"{"models": {}}"#, true),
            Err(CatalogError::Json(_))
        ));
    }
}

mod latency {
    use super::*;

    /// The calculator estimates latency for the selected model and scenario.
    #[test]
    fn test_latency_for_default_scenario() {
        let (_dir, path) = write_fixture("throughputs.json", THROUGHPUTS);
        let estimator = LatencyEstimator::from_path(&path).unwrap();

        let catalog = ModelCatalog::from_json_str(MODELS, true).unwrap();
        let tokens = default_scenario().output_tokens;

        let seconds: Vec<f64> = catalog
            .models()
            .iter()
            .map(|m| estimator.estimate(&m.provider, &m.name, tokens, None).unwrap())
            .collect();
        // 250 tokens at 125, 100 and the default 80 tokens/s
        assert_relative_eq!(seconds[0], 2.0);
        assert_relative_eq!(seconds[1], 2.5);
        assert_relative_eq!(seconds[2], 3.125);
    }
}
