//! Suite statistics derived from cucumber JSON results.

use serde::Serialize;

use super::types::{Feature, Scenario, StepStatus};

/// Scenario outcome precedence: any failed step fails the scenario,
/// otherwise any skipped step marks it skipped, otherwise it passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    Failed,
    Skipped,
}

pub fn scenario_outcome(scenario: &Scenario) -> ScenarioOutcome {
    let has_status = |status: StepStatus| {
        scenario
            .steps
            .iter()
            .any(|step| step.result.as_ref().map(|r| r.status) == Some(status))
    };
    if has_status(StepStatus::Failed) {
        ScenarioOutcome::Failed
    } else if has_status(StepStatus::Skipped) {
        ScenarioOutcome::Skipped
    } else {
        ScenarioOutcome::Passed
    }
}

/// Whole-suite roll-up. Serialized as the summary payload of the JSON
/// report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteStats {
    pub total_features: usize,
    pub total_scenarios: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Total step duration in milliseconds, rounded
    pub duration: u64,
    /// Passed scenarios as a rounded percentage of all scenarios
    pub pass_rate: u32,
}

pub fn suite_stats(features: &[Feature]) -> SuiteStats {
    let mut stats = SuiteStats {
        total_features: features.len(),
        total_scenarios: 0,
        passed: 0,
        failed: 0,
        skipped: 0,
        duration: 0,
        pass_rate: 0,
    };
    let mut duration_ns: u64 = 0;

    for feature in features {
        for scenario in &feature.elements {
            stats.total_scenarios += 1;
            match scenario_outcome(scenario) {
                ScenarioOutcome::Passed => stats.passed += 1,
                ScenarioOutcome::Failed => stats.failed += 1,
                ScenarioOutcome::Skipped => stats.skipped += 1,
            }
            for step in &scenario.steps {
                if let Some(result) = &step.result {
                    duration_ns += result.duration.unwrap_or(0);
                }
            }
        }
    }

    stats.duration = (duration_ns as f64 / 1_000_000.0).round() as u64;
    stats.pass_rate = if stats.total_scenarios > 0 {
        ((stats.passed as f64 / stats.total_scenarios as f64) * 100.0).round() as u32
    } else {
        0
    };
    stats
}

/// Per-feature roll-up backing one row of the HTML report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStats {
    pub name: String,
    pub scenarios: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl FeatureStats {
    pub fn status(&self) -> ScenarioOutcome {
        if self.failed > 0 {
            ScenarioOutcome::Failed
        } else if self.skipped > 0 {
            ScenarioOutcome::Skipped
        } else {
            ScenarioOutcome::Passed
        }
    }
}

pub fn feature_stats(feature: &Feature) -> FeatureStats {
    let mut stats = FeatureStats {
        name: feature.name.clone(),
        scenarios: feature.elements.len(),
        passed: 0,
        failed: 0,
        skipped: 0,
    };
    for scenario in &feature.elements {
        match scenario_outcome(scenario) {
            ScenarioOutcome::Passed => stats.passed += 1,
            ScenarioOutcome::Failed => stats.failed += 1,
            ScenarioOutcome::Skipped => stats.skipped += 1,
        }
    }
    stats
}
