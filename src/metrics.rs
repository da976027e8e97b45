// src/metrics.rs
//! Demand index: how much a proven project currently needs help.
//!
//! ```text
//! demand_index = (new_open_issues + 1) * ln(new_stars_30d + 1) / ln(stars + 2)
//! ```
//!
//! Rises with fresh issues and fresh stars, falls as the total star count
//! grows. `ln(stars + 2) >= ln 2 > 0`, so the result is finite and
//! non-negative for every input.

/// Raw counts a demand index is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandInputs {
    pub stars: u64,
    pub new_stars_30d: u64,
    pub new_open_issues: u64,
    /// Carried for completeness; the index does not weight it.
    pub contributors: u64,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn demand_index(inputs: &DemandInputs) -> f64 {
    let issues = inputs.new_open_issues as f64 + 1.0;
    let momentum = (inputs.new_stars_30d as f64 + 1.0).ln();
    let scale = (inputs.stars as f64 + 2.0).ln();
    issues * momentum / scale
}

impl DemandInputs {
    #[must_use]
    pub fn demand_index(&self) -> f64 {
        demand_index(self)
    }
}
