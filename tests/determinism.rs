//! Determinism and cross-step invariant tests
//!
//! Whole-run properties: identical results for identical seeds, divergence
//! across seeds, and the state-machine invariants that must hold at every
//! step of a run.

use asa_sim::{
    DiversityMetric, RunState, SelectionCriteria, Simulation, SimulationConfig, TurnoverType,
};

fn deterministic_config() -> SimulationConfig {
    SimulationConfig {
        n_steps: 30,
        initial_size: 40,
        hiring_frequency: 5,
        n_new_applicants: 15,
        growth_rate: 0.1,
        // Non-random ranking so the whole run is seed-determined
        selection_criteria: SelectionCriteria::Conscientiousness,
        turnover_type: TurnoverType::Probabilistic,
        base_turnover_rate: 0.3,
        ..Default::default()
    }
}

#[test]
fn test_same_seed_produces_identical_runs() {
    let mut first = Simulation::new(deterministic_config(), 42).unwrap();
    let mut second = Simulation::new(deterministic_config(), 42).unwrap();

    first.run();
    second.run();

    let first_metrics = serde_json::to_string(first.metrics()).unwrap();
    let second_metrics = serde_json::to_string(second.metrics()).unwrap();
    assert_eq!(first_metrics, second_metrics);

    let first_table = serde_json::to_string(&first.agent_table()).unwrap();
    let second_table = serde_json::to_string(&second.agent_table()).unwrap();
    assert_eq!(first_table, second_table);
}

#[test]
fn test_different_seeds_diverge() {
    let mut first = Simulation::new(deterministic_config(), 42).unwrap();
    let mut second = Simulation::new(deterministic_config(), 43).unwrap();

    first.run();
    second.run();

    let first_table = serde_json::to_string(&first.agent_table()).unwrap();
    let second_table = serde_json::to_string(&second.agent_table()).unwrap();
    assert_ne!(first_table, second_table);
}

#[test]
fn test_departures_are_permanent() {
    let mut sim = Simulation::new(deterministic_config(), 7).unwrap();

    let mut ever_inactive: Vec<String> = Vec::new();
    while sim.run_state() != RunState::Completed {
        sim.step();
        let table = sim.agent_table();
        for id in &ever_inactive {
            let row = table.iter().find(|r| &r.id == id).expect("agent record kept");
            assert!(!row.is_active, "agent {} came back after departing", id);
        }
        for row in table.iter().filter(|r| !r.is_active) {
            if !ever_inactive.contains(&row.id) {
                ever_inactive.push(row.id.clone());
            }
        }
    }
    assert!(!ever_inactive.is_empty(), "run produced no departures to check");
}

#[test]
fn test_category_proportions_sum_to_one_every_step() {
    let mut sim = Simulation::new(deterministic_config(), 11).unwrap();

    while sim.run_state() != RunState::Completed {
        sim.step();
        let table = sim.agent_table();
        let active: Vec<_> = table.iter().filter(|r| r.is_active).collect();
        if active.is_empty() {
            continue;
        }
        let mut counts = std::collections::HashMap::new();
        for row in &active {
            *counts.entry(row.identity_category.clone()).or_insert(0usize) += 1;
        }
        let total: f64 = counts
            .values()
            .map(|&c| c as f64 / active.len() as f64)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_hire_steps_never_in_future() {
    let mut sim = Simulation::new(deterministic_config(), 5).unwrap();
    sim.run();

    let final_step = sim.current_step();
    for row in sim.agent_table() {
        assert!(row.hire_step <= final_step);
    }
}

#[test]
fn test_metrics_row_per_step_under_both_diversity_metrics() {
    for metric in [DiversityMetric::Blau, DiversityMetric::Shannon] {
        let config = SimulationConfig {
            diversity_metric: metric,
            ..deterministic_config()
        };
        let mut sim = Simulation::new(config, 13).unwrap();
        sim.run();

        assert_eq!(sim.metrics().len(), 30);
        for row in sim.metrics() {
            assert!(row.blau_index >= 0.0 && row.blau_index <= 1.0);
            assert!(row.shannon_index >= 0.0);
        }
    }
}

#[test]
fn test_threshold_runs_are_deterministic_without_rng_in_attrition() {
    // Threshold attrition consumes no randomness, so two runs differing only
    // in turnover threshold still hire identically until attrition differs
    let config = SimulationConfig {
        turnover_type: TurnoverType::Threshold,
        turnover_threshold: f64::MIN,
        ..deterministic_config()
    };
    let mut first = Simulation::new(config.clone(), 3).unwrap();
    let mut second = Simulation::new(config, 3).unwrap();

    let first_report = first.run();
    let second_report = second.run();

    assert_eq!(first_report.total_hires, second_report.total_hires);
    assert_eq!(first_report.total_departures, 0);
}
