//! Population Composition
//!
//! Category proportions and diversity indices over the active population.
//! An empty population is a defined no-op: proportions of zero and an index
//! of zero, never an error.

use crate::config::DiversityMetric;

/// Proportion of each category; all zeros when the population is empty
pub fn category_proportions(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&c| c as f64 / total as f64)
        .collect()
}

/// Blau's Index: 1 - sum(p_i^2).
///
/// Probability that two randomly drawn members differ in category.
pub fn blau(proportions: &[f64]) -> f64 {
    let sum_sq: f64 = proportions.iter().map(|p| p * p).sum();
    if sum_sq == 0.0 {
        // Empty population
        0.0
    } else {
        1.0 - sum_sq
    }
}

/// Shannon entropy: -sum(p_i * ln(p_i)), skipping empty categories
pub fn shannon(proportions: &[f64]) -> f64 {
    -proportions
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.ln())
        .sum::<f64>()
}

/// The configured diversity index over the given proportions
pub fn diversity_index(metric: DiversityMetric, proportions: &[f64]) -> f64 {
    match metric {
        DiversityMetric::Blau => blau(proportions),
        DiversityMetric::Shannon => shannon(proportions),
    }
}
