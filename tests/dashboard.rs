//! The calculator flow: pick a scenario and a model, format the estimator's
//! impacts and derive the equivalences shown beneath them.

use approx::assert_relative_eq;
use genai_impacts::catalog::{scenarios, LatencyEstimator};
use genai_impacts::equivalences::{EnergyProduction, PhysicalActivity};
use genai_impacts::formatting::FormattedEstimate;
use genai_impacts::{format_impacts, Criterion, EquivalenceEngine, Impacts};

const ESTIMATOR_OUTPUT: &str = r#"{
    "energy": {"min": 0.0012, "mean": 0.0035, "max": 0.009},
    "gwp": {"min": 0.0007, "mean": 0.0019, "max": 0.005},
    "adpe": {"min": 1.1e-8, "mean": 2.4e-8, "max": 5.2e-8},
    "pe": {"min": 0.014, "mean": 0.038, "max": 0.1},
    "wcf": {"min": 0.009, "mean": 0.021, "max": 0.06},
    "usage": {"energy": {"min": 0.001, "mean": 0.003, "max": 0.008}},
    "embodied": {"gwp": 0.0001}
}"#;

#[test]
fn test_calculator_flow() {
    let scenario = scenarios::scenario_by_label("Write an article summary (250 output tokens)")
        .unwrap();
    let latency = LatencyEstimator::default()
        .estimate("openai", "gpt-4o", scenario.output_tokens, None)
        .unwrap();
    assert_relative_eq!(latency, 3.125);

    let impacts: Impacts = serde_json::from_str(ESTIMATOR_OUTPUT).unwrap();
    let (formatted, usage, embodied) = format_impacts(impacts).unwrap();
    assert!(formatted.ranges);
    assert!(usage.energy.is_some());
    assert!(embodied.gwp.is_some());

    let expected_units = [
        (Criterion::Energy, "Wh"),
        (Criterion::Gwp, "gCO2eq"),
        (Criterion::Adpe, "µgSbeq"),
        (Criterion::Pe, "kJ"),
        (Criterion::Wcf, "mL"),
    ];
    for (criterion, unit) in expected_units {
        let estimate = formatted.get(criterion);
        assert_eq!(estimate.unit().to_string(), unit, "{criterion}");
        assert!(matches!(estimate, FormattedEstimate::Range { .. }));
    }

    let summary = EquivalenceEngine::default().summarize(&formatted).unwrap();
    // 3.5 Wh = 12.6 kJ, well below one running kilometre
    assert_eq!(summary.physical_activity, PhysicalActivity::Walking);
    assert_eq!(summary.distance.unit().to_string(), "m");
    assert_relative_eq!(summary.distance.magnitude(), 12.6 / 196.0 * 1000.0, max_relative = 1e-9);

    // 3.5 Wh × 29.2e9 = 102.2 GWh, about 24 wind turbines
    assert_eq!(summary.electricity_production, EnergyProduction::Wind);
    assert_relative_eq!(summary.plant_count, 102.2 / 4.2, max_relative = 1e-9);
    assert_relative_eq!(summary.flights, 0.0019 * 29.2e9 / 1770.0, max_relative = 1e-9);
}

#[test]
fn test_summary_serializes_for_display() {
    let impacts: Impacts = serde_json::from_str(ESTIMATOR_OUTPUT).unwrap();
    let (formatted, _, _) = format_impacts(impacts).unwrap();
    let summary = EquivalenceEngine::default().summarize(&formatted).unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["physical_activity"], "walking");
    assert_eq!(json["electricity_production"], "wind");
    assert!(json["streaming"].as_str().unwrap().ends_with(" min"));

    let json = serde_json::to_value(&formatted).unwrap();
    assert_eq!(json["energy"]["kind"], "range");
    assert!(json["energy"]["mean"].as_str().unwrap().ends_with(" Wh"));
}
