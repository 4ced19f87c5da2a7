//! Degree-based eligibility of controller candidates

use crate::error::{PlacementError, Result};

/// Nodes whose degree reaches the rounded average degree ρ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleSet {
    rho: usize,
    mask: Vec<bool>,
}

/// Rounded mean degree. Halves round to even, so a mean of 2.5 gives 2.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn degree_threshold(degrees: &[usize]) -> usize {
    if degrees.is_empty() {
        return 0;
    }
    let total: usize = degrees.iter().sum();
    (total as f64 / degrees.len() as f64).round_ties_even() as usize
}

/// Compute ρ and mark every node with degree >= ρ
pub fn eligible_nodes(degrees: &[usize]) -> EligibleSet {
    let rho = degree_threshold(degrees);
    let mask: Vec<bool> = degrees.iter().map(|&d| d >= rho).collect();
    log::debug!(
        "Eligibility threshold rho = {}: {} of {} nodes eligible",
        rho,
        mask.iter().filter(|&&e| e).count(),
        degrees.len()
    );
    EligibleSet { rho, mask }
}

impl EligibleSet {
    pub fn rho(&self) -> usize {
        self.rho
    }

    pub fn contains(&self, node: usize) -> bool {
        self.mask.get(node).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.mask.iter().filter(|&&e| e).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.mask.iter().any(|&e| e)
    }

    /// Eligible node indices in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &e)| e)
            .map(|(i, _)| i)
    }

    /// Fail where an eligible node is mandatory
    pub fn require_non_empty(&self) -> Result<&Self> {
        if self.is_empty() {
            return Err(PlacementError::NoEligibleNodes { rho: self.rho });
        }
        Ok(self)
    }

    /// Eligible members of `pool`, or the whole pool when none qualify
    pub fn filter_or_all(&self, pool: &[usize]) -> Vec<usize> {
        let eligible: Vec<usize> = pool.iter().copied().filter(|&n| self.contains(n)).collect();
        if eligible.is_empty() {
            pool.to_vec()
        } else {
            eligible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_rounded_mean() {
        // star with five leaves: 10 / 6 = 1.67
        assert_eq!(degree_threshold(&[5, 1, 1, 1, 1, 1]), 2);
        // path of five: 8 / 5 = 1.6
        assert_eq!(degree_threshold(&[1, 2, 2, 2, 1]), 2);
        assert_eq!(degree_threshold(&[]), 0);
    }

    #[test]
    fn threshold_rounds_halves_to_even() {
        assert_eq!(degree_threshold(&[2, 3]), 2);
        assert_eq!(degree_threshold(&[3, 4]), 4);
    }

    #[test]
    fn star_only_admits_the_hub() {
        let eligible = eligible_nodes(&[5, 1, 1, 1, 1, 1]);
        assert_eq!(eligible.iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(eligible.rho(), 2);
    }

    #[test]
    fn empty_set_fails_when_required() {
        let eligible = EligibleSet {
            rho: 3,
            mask: vec![false, false],
        };
        assert_eq!(
            eligible.require_non_empty(),
            Err(PlacementError::NoEligibleNodes { rho: 3 })
        );
    }

    #[test]
    fn filter_falls_back_to_the_full_pool() {
        let eligible = eligible_nodes(&[3, 1, 1, 3]);
        assert_eq!(eligible.filter_or_all(&[0, 1]), vec![0]);
        assert_eq!(eligible.filter_or_all(&[1, 2]), vec![1, 2]);
    }

    #[test]
    fn raising_a_degree_only_adds_that_node() {
        let before = eligible_nodes(&[2, 2, 2, 1, 3]);
        let after = eligible_nodes(&[2, 2, 2, 2, 3]);

        assert_eq!(before.rho(), after.rho());
        assert!(!before.contains(3));
        assert!(after.contains(3));
        assert!(before.iter().all(|n| after.contains(n)));
    }
}
