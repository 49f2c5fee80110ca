//! Configuration System
//!
//! Strongly-typed simulation parameters with defaults, partial TOML override,
//! and eager validation: a run never starts with an invalid configuration.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// How hires are ranked when the organization selects from the applicant pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionCriteria {
    /// Descending conscientiousness
    Conscientiousness,
    /// Descending attraction to the organization
    Fit,
    /// Uniform random permutation of the pool
    Random,
}

/// Attrition policy applied each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnoverType {
    /// Leave immediately when satisfaction drops below `turnover_threshold`
    Threshold,
    /// One Bernoulli draw per agent with a satisfaction-dependent probability
    Probabilistic,
}

/// Diversity index fed into satisfaction and attraction scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiversityMetric {
    /// Blau's Index: 1 - sum(p_i^2)
    Blau,
    /// Shannon entropy: -sum(p_i * ln(p_i))
    Shannon,
}

/// All tunable parameters for a single simulation run.
///
/// Deserializes from a flat TOML file; any omitted field takes its default,
/// so a tuning file only needs to name what it changes.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of time steps to simulate
    pub n_steps: u64,
    /// Number of employees seeded at step 0
    pub initial_size: usize,
    /// Ordered identity category labels; agents are assigned uniformly
    pub identity_categories: Vec<String>,
    /// Hires per cycle as a fraction of active organization size, in [0, 1]
    pub growth_rate: f64,
    /// Steps between hiring cycles
    pub hiring_frequency: u64,
    /// Ranking policy for hiring
    pub selection_criteria: SelectionCriteria,
    /// Interaction partners drawn per active agent per step
    pub n_interactions_per_step: u32,
    /// Trailing window (in steps) of interactions feeding satisfaction
    pub interaction_window: u64,
    /// Satisfaction below which agents leave under the threshold policy
    pub turnover_threshold: f64,
    /// Which attrition policy runs
    pub turnover_type: TurnoverType,
    /// Base rate for the probabilistic attrition policy, in [0, 1]
    pub base_turnover_rate: f64,
    /// Weight on satisfaction inside the probabilistic leave formula
    pub turnover_satisfaction_weight: f64,
    /// Fresh applicants generated each hiring cycle (and seeded at step 0)
    pub n_new_applicants: usize,
    /// Applicants below this attraction are dropped from the pool
    pub applicant_attraction_threshold: f64,
    /// Hiring cycles an applicant survives before aging out
    pub max_application_time: u32,
    /// Diversity index used by the satisfaction and attraction formulas
    pub diversity_metric: DiversityMetric,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_steps: 100,
            initial_size: 100,
            identity_categories: ["A", "B", "C", "D", "E"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            growth_rate: 0.05,
            hiring_frequency: 10,
            selection_criteria: SelectionCriteria::Fit,
            n_interactions_per_step: 5,
            interaction_window: 10,
            turnover_threshold: -5.0,
            turnover_type: TurnoverType::Threshold,
            base_turnover_rate: 0.1,
            turnover_satisfaction_weight: 1.0,
            n_new_applicants: 20,
            applicant_attraction_threshold: 0.0,
            max_application_time: 3,
            diversity_metric: DiversityMetric::Blau,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter once, before the run starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_steps == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "n_steps",
                value: 0.0,
            });
        }
        if self.initial_size == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "initial_size",
                value: 0.0,
            });
        }
        if self.identity_categories.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }
        if !(0.0..=1.0).contains(&self.growth_rate) {
            return Err(ConfigError::OutOfRange {
                parameter: "growth_rate",
                value: self.growth_rate,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.hiring_frequency == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "hiring_frequency",
                value: 0.0,
            });
        }
        if self.n_interactions_per_step == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "n_interactions_per_step",
                value: 0.0,
            });
        }
        if self.interaction_window == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "interaction_window",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.base_turnover_rate) {
            return Err(ConfigError::OutOfRange {
                parameter: "base_turnover_rate",
                value: self.base_turnover_rate,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.n_new_applicants == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "n_new_applicants",
                value: 0.0,
            });
        }
        if self.max_application_time == 0 {
            return Err(ConfigError::NonPositive {
                parameter: "max_application_time",
                value: 0.0,
            });
        }
        if !self.turnover_threshold.is_finite() {
            return Err(ConfigError::NotFinite {
                parameter: "turnover_threshold",
            });
        }
        if !self.turnover_satisfaction_weight.is_finite() {
            return Err(ConfigError::NotFinite {
                parameter: "turnover_satisfaction_weight",
            });
        }
        if !self.applicant_attraction_threshold.is_finite() {
            return Err(ConfigError::NotFinite {
                parameter: "applicant_attraction_threshold",
            });
        }
        Ok(())
    }

    /// Number of configured identity categories
    pub fn n_categories(&self) -> usize {
        self.identity_categories.len()
    }
}

/// Configuration error, naming the parameter that failed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(String),
    #[error("could not parse configuration: {0}")]
    Parse(String),
    #[error("{parameter} must be positive (got {value})")]
    NonPositive { parameter: &'static str, value: f64 },
    #[error("{parameter} must be in [{min}, {max}] (got {value})")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{parameter} must be a finite number")]
    NotFinite { parameter: &'static str },
    #[error("identity_categories must not be empty")]
    EmptyCategories,
}
