//! Configuration management for controller placement

use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};

/// Default refinement iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default seed for runs that do not supply their own random source
pub const DEFAULT_SEED: u64 = 42;

/// Non-negative weights of the composite initial-center score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityWeights {
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
}

impl Default for CentralityWeights {
    fn default() -> Self {
        Self {
            degree: 0.4,
            betweenness: 0.3,
            closeness: 0.3,
        }
    }
}

impl CentralityWeights {
    pub fn new(degree: f64, betweenness: f64, closeness: f64) -> Self {
        Self {
            degree,
            betweenness,
            closeness,
        }
    }

    /// Reject negative or non-finite weights, and the all-zero vector
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("degree", self.degree),
            ("betweenness", self.betweenness),
            ("closeness", self.closeness),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(PlacementError::InvalidWeights(format!(
                    "{} weight must be a finite non-negative number, got {}",
                    name, w
                )));
            }
        }
        if weights.iter().all(|&(_, w)| w == 0.0) {
            return Err(PlacementError::InvalidWeights(
                "at least one centrality weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the first controller is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InitialCenterPolicy {
    /// Highest degree among eligible nodes
    DegreeFirst,
    /// Highest weighted degree/betweenness/closeness score among eligible nodes
    WeightedComposite(CentralityWeights),
}

/// How each further seed controller is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextCenterPolicy {
    /// Deterministic: maximize distance to the nearest existing controller
    FarthestPoint,
    /// Stochastic: sample proportionally to squared nearest-controller distance
    KMeansPlusPlus,
}

/// How two consecutive controller sets are compared for convergence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConvergenceMode {
    /// Same set of nodes, in any order
    #[default]
    Unordered,
    /// Same node at every position
    Positional,
}

/// When the Assign/Update loop runs relative to seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefinementSchedule {
    /// Seed all k controllers, then refine once
    #[default]
    AfterSeeding,
    /// Refine after every added controller
    AfterEachSeed,
}

/// Parameters of a placement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Policy for the first controller
    pub initial: InitialCenterPolicy,

    /// Policy for subsequent seed controllers
    pub next: NextCenterPolicy,

    /// Controller set comparison used to detect the fixed point
    pub convergence: ConvergenceMode,

    /// Whether refinement happens once or after every seed
    pub schedule: RefinementSchedule,

    /// Upper bound on Assign/Update iterations per refinement
    pub max_iterations: usize,

    /// Seed for runs that build their own random source
    pub seed: u64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::advanced()
    }
}

impl PlacementConfig {
    /// Degree-first initial center with farthest-point seeding
    pub fn advanced() -> Self {
        Self {
            initial: InitialCenterPolicy::DegreeFirst,
            next: NextCenterPolicy::FarthestPoint,
            convergence: ConvergenceMode::default(),
            schedule: RefinementSchedule::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }

    /// Weighted-composite initial center with k-means++ seeding
    pub fn enhanced(weights: CentralityWeights) -> Self {
        Self {
            initial: InitialCenterPolicy::WeightedComposite(weights),
            next: NextCenterPolicy::KMeansPlusPlus,
            ..Self::advanced()
        }
    }

    pub fn with_convergence(mut self, convergence: ConvergenceMode) -> Self {
        self.convergence = convergence;
        self
    }

    pub fn with_schedule(mut self, schedule: RefinementSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// True when the run consumes random draws
    pub fn is_stochastic(&self) -> bool {
        self.next == NextCenterPolicy::KMeansPlusPlus
    }

    /// True when the initial policy reads betweenness and closeness
    pub fn needs_centrality(&self) -> bool {
        matches!(self.initial, InitialCenterPolicy::WeightedComposite(_))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PlacementError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if let InitialCenterPolicy::WeightedComposite(weights) = &self.initial {
            weights.validate()?;
        }
        Ok(())
    }
}
